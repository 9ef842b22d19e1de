//! Wrapper around std::thread::Builder. Names each worker thread after its role and runs
//! it inside a tracing span so log lines from the two workers can be told apart.
use std::thread::JoinHandle;
use tracing::{error, event, span, Level};

use crate::error::{self, PipelineError, Role};

/// Handle to a running worker. Joining turns a panic into `PipelineError::WorkerPanicked`.
pub struct Worker<T> {
    role: Role,
    handle: JoinHandle<error::Result<T>>,
}

/// Spawn `f` on a new OS thread named after `role`.
pub fn spawn<F, T>(role: Role, f: F) -> error::Result<Worker<T>>
where
    F: FnOnce() -> error::Result<T>,
    F: Send + 'static,
    T: Send + 'static,
{
    let _e = span!(Level::DEBUG, "worker::spawn()", role = role.name()).entered();

    let handle = std::thread::Builder::new()
        .name(role.name().to_string())
        .spawn(move || {
            // Spans are thread-local, so this one covers the whole life of the worker.
            let _e = span!(Level::INFO, "Worker", role = role.name()).entered();
            event!(Level::DEBUG, "Worker started.");
            let res = f();
            match &res {
                Ok(_) => event!(Level::DEBUG, "Worker finished."),
                Err(e) => error!(%e, "Worker failed."),
            }
            res
        })
        .map_err(|e| PipelineError::Spawn(role, e))?;

    Ok(Worker { role, handle })
}

impl<T> Worker<T> {
    pub fn role(&self) -> Role {
        self.role
    }

    pub fn join(self) -> error::Result<T> {
        match self.handle.join() {
            Ok(res) => res,
            Err(_) => {
                error!("{} thread panicked.", self.role);
                Err(PipelineError::WorkerPanicked(self.role))
            }
        }
    }
}
