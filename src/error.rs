//! Error Module

use crossbeam_channel::{RecvError, RecvTimeoutError, SendError};
use std::fmt;
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Which worker thread an error came from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Role {
    Producer,
    Consumer,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::Producer => "producer",
            Role::Consumer => "consumer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything that can stop a pipeline run from finishing normally. In the default
/// configuration none of these happen; they exist so that a broken worker turns into an
/// error instead of a hang.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Producer tried to send but the consumer end was already dropped.
    #[error("item channel disconnected before all items were sent")]
    Disconnected,
    /// Consumer could not write an item to its sink.
    #[error("unable to write item to output: {0}")]
    Output(#[from] io::Error),
    /// Completion sender was dropped without ever signaling.
    #[error("consumer exited without signaling completion")]
    ConsumerAborted,
    /// Completion wait deadline elapsed.
    #[error("no completion signal after {0:?}")]
    Timeout(Duration),
    #[error("{0} thread panicked")]
    WorkerPanicked(Role),
    /// OS refused to create a worker thread.
    #[error("unable to spawn {0} thread: {1}")]
    Spawn(Role, #[source] io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl<T> From<SendError<T>> for PipelineError {
    fn from(_: SendError<T>) -> PipelineError {
        PipelineError::Disconnected
    }
}

/// A failed blocking receive on the completion channel only ever means the sender was
/// dropped unused.
impl From<RecvError> for PipelineError {
    fn from(_: RecvError) -> PipelineError {
        PipelineError::ConsumerAborted
    }
}

/// Caller must substitute the real deadline; crossbeam does not hand it back.
pub(crate) fn from_recv_timeout(e: RecvTimeoutError, deadline: Duration) -> PipelineError {
    match e {
        RecvTimeoutError::Timeout => PipelineError::Timeout(deadline),
        RecvTimeoutError::Disconnected => PipelineError::ConsumerAborted,
    }
}
