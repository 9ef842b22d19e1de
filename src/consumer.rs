use crossbeam_channel::Receiver;
use std::io::Write;
use tracing::{debug, trace};

use crate::completion::DoneSender;
use crate::error;
use crate::jitter::Jitter;

/// Sole reader of the item channel. Writes each item as its own line to `out` and
/// signals completion once the channel is closed and empty.
pub struct Consumer<W> {
    items: Receiver<i32>,
    done: DoneSender,
    out: W,
    jitter: Jitter,
}

impl<W: Write> Consumer<W> {
    pub fn new(items: Receiver<i32>, done: DoneSender, out: W) -> Consumer<W> {
        Consumer::with_jitter(items, done, out, Jitter::none())
    }

    pub fn with_jitter(
        items: Receiver<i32>,
        done: DoneSender,
        out: W,
        jitter: Jitter,
    ) -> Consumer<W> {
        Consumer {
            items,
            done,
            out,
            jitter,
        }
    }

    /// Drain the item channel, then signal completion. Returns the number of items seen.
    ///
    /// On a write failure we return early and the `DoneSender` is dropped unsent, which
    /// the coordinator observes as `PipelineError::ConsumerAborted`.
    pub fn run(mut self) -> error::Result<usize> {
        let mut seen = 0;
        loop {
            self.jitter.pause();
            // recv() only fails once the producer hung up and the buffer is empty.
            let item = match self.items.recv() {
                Ok(item) => item,
                Err(_) => break,
            };
            trace!("recv() -> {}", item);
            writeln!(self.out, "{}", item)?;
            seen += 1;
        }
        self.out.flush()?;
        debug!("Item channel drained after {} items.", seen);

        self.done.send();
        Ok(seen)
    }
}
