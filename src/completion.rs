//! One-shot completion signal. Both halves are consumed by use, so a second signal or a
//! second wait does not type check.
use crossbeam_channel as cc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{self, PipelineError};

/// Create a connected pair of completion halves.
pub fn oneshot() -> (DoneSender, DoneReceiver) {
    let (sender, receiver) = cc::bounded(1);
    (DoneSender { sender }, DoneReceiver { receiver })
}

/// Sending half. Dropping it without calling `send` wakes the waiter with
/// `PipelineError::ConsumerAborted`.
#[derive(Debug)]
pub struct DoneSender {
    sender: cc::Sender<()>,
}

impl DoneSender {
    pub fn send(self) {
        debug!("Signaling completion.");
        // Capacity one and a single send, so this never blocks. A missing receiver means
        // the coordinator already gave up waiting.
        if self.sender.send(()).is_err() {
            warn!("Completion signaled after the coordinator stopped waiting.");
        }
    }
}

#[derive(Debug)]
pub struct DoneReceiver {
    receiver: cc::Receiver<()>,
}

impl DoneReceiver {
    /// Block until the signal arrives.
    pub fn wait(self) -> error::Result<()> {
        debug!("Waiting for completion signal.");
        self.receiver.recv()?;
        Ok(())
    }

    /// Block until the signal arrives or `deadline` elapses.
    pub fn wait_timeout(self, deadline: Duration) -> error::Result<()> {
        debug!("Waiting up to {:?} for completion signal.", deadline);
        self.receiver
            .recv_timeout(deadline)
            .map_err(|e| error::from_recv_timeout(e, deadline))
    }

    /// `wait` or `wait_timeout` depending on whether a deadline is set.
    pub fn wait_for(self, deadline: Option<Duration>) -> error::Result<()> {
        match deadline {
            Some(d) => self.wait_timeout(d),
            None => self.wait(),
        }
    }
}
