//! Helpers shared by the unit tests of every module: in-memory sinks with interesting
//! failure behavior, and a runner that turns a hung pipeline into a test failure instead
//! of a hung test suite.
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::coordinator::{Pipeline, Report};

/// Any run taking longer than this is treated as a deadlock.
pub(crate) const RUN_LIMIT: Duration = Duration::from_secs(10);

/// Run `pipeline` on a helper thread and give up after `RUN_LIMIT`.
pub(crate) fn run_bounded<W>(pipeline: Pipeline, sink: W) -> Result<Report>
where
    W: Write + Send + 'static,
{
    let (s, r) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let _ = s.send(pipeline.run(sink));
    });

    match r.recv_timeout(RUN_LIMIT) {
        Ok(res) => Ok(res?),
        Err(_) => {
            info!("Pipeline did not finish within {:?}.", RUN_LIMIT);
            Err(anyhow!("pipeline did not terminate within {:?}", RUN_LIMIT))
        }
    }
}

/// Parse a sink's contents back into the items it received, one per line.
pub(crate) fn lines(out: &[u8]) -> Vec<i32> {
    String::from_utf8_lossy(out)
        .lines()
        .map(|l| l.parse().expect("sink line is not an integer"))
        .collect()
}

/// Cloneable sink: the pipeline writes through one clone, the test reads the other.
#[derive(Clone, Default)]
pub(crate) struct SharedSink(Arc<Mutex<Vec<u8>>>);

impl SharedSink {
    pub(crate) fn new() -> SharedSink {
        SharedSink::default()
    }

    pub(crate) fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Every write fails.
pub(crate) struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Every write stalls for the given duration, then discards its input.
pub(crate) struct SlowWriter(pub(crate) Duration);

impl Write for SlowWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        thread::sleep(self.0);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
