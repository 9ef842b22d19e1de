use crossbeam_channel::Sender;
use std::ops::Range;
use tracing::{debug, trace};

use crate::error;
use crate::jitter::Jitter;

/// The fixed work: ten integers, ascending.
pub const ITEMS: Range<i32> = 0..10;

/// Sole writer of the item channel. Owns the only `Sender`, so the channel closes when
/// the producer is dropped, on every exit path.
pub struct Producer {
    items: Sender<i32>,
    jitter: Jitter,
}

impl Producer {
    pub fn new(items: Sender<i32>) -> Producer {
        Producer::with_jitter(items, Jitter::none())
    }

    pub fn with_jitter(items: Sender<i32>, jitter: Jitter) -> Producer {
        Producer { items, jitter }
    }

    /// Send every item in `ITEMS` then close the channel.
    pub fn run(self) -> error::Result<()> {
        for i in ITEMS {
            self.jitter.pause();
            trace!("send({})", i);
            self.items.send(i)?;
        }
        debug!("All {} items sent. Closing item channel.", ITEMS.len());
        Ok(())
    }
}

impl Drop for Producer {
    fn drop(&mut self) {
        trace!("Producer dropped; item channel closed.");
    }
}
