//! Wires the item channel and the completion signal, starts both workers, and blocks until
//! the consumer reports it is done.
use crossbeam_channel as cc;
use std::io::Write;
use tracing::{debug, info, span, Level};

use crate::completion;
use crate::config::Config;
use crate::consumer::Consumer;
use crate::error::{self, PipelineError, Role};
use crate::jitter::Jitter;
use crate::producer::Producer;
use crate::worker;

/// Outcome of a finished run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Report {
    /// Items the consumer wrote to its sink.
    pub items: usize,
}

pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    pub fn new(config: Config) -> Pipeline {
        Pipeline { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run producer and consumer to completion, the consumer writing to `sink`.
    ///
    /// Returns once the completion signal has been received and both workers joined. With
    /// a deadline configured, returns `PipelineError::Timeout` instead of waiting forever;
    /// the workers are then left running and are reclaimed at process exit.
    pub fn run<W>(&self, sink: W) -> error::Result<Report>
    where
        W: Write + Send + 'static,
    {
        let _e = span!(Level::INFO, "Pipeline::run()").entered();
        let config = self.config;
        let jitter = Jitter::new(config.max_jitter);

        let (items_tx, items_rx) = cc::bounded(config.capacity);
        let (done_tx, done_rx) = completion::oneshot();
        debug!(
            "Item channel created with capacity {}. Starting workers.",
            config.capacity
        );

        let producer = Producer::with_jitter(items_tx, jitter);
        let consumer = Consumer::with_jitter(items_rx, done_tx, sink, jitter);

        let producer = worker::spawn(Role::Producer, move || producer.run())?;
        let consumer = worker::spawn(Role::Consumer, move || consumer.run())?;

        if let Err(e) = done_rx.wait_for(config.deadline) {
            // An aborted consumer has already returned. Report its error rather than ours.
            if let PipelineError::ConsumerAborted = e {
                consumer.join()?;
                producer.join()?;
            }
            return Err(e);
        }
        info!("Completion signal received.");

        // The item channel is closed by now, so neither join can block for long.
        let items = consumer.join()?;
        producer.join()?;
        Ok(Report { items })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new(Config::default())
    }
}
