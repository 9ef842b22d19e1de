//! A single producer feeds the integers 0 through 9 to a single consumer over an item
//! channel. The consumer writes each one out, then fires a one-shot completion signal
//! that the coordinator is blocked on.
//!
//! ```no_run
//! use prodcon::{Config, Pipeline};
//!
//! let report = Pipeline::new(Config::default()).run(std::io::stdout()).unwrap();
//! assert_eq!(report.items, 10);
//! ```
use std::error::Error;
use tracing_subscriber::EnvFilter;

pub mod completion;
pub mod config;
pub mod consumer;
pub mod coordinator;
pub mod error;
pub mod jitter;
pub mod producer;
#[cfg(test)]
mod test;
pub mod worker;

pub use crate::config::{Config, CONFIG};
pub use crate::coordinator::{Pipeline, Report};
pub use crate::error::{PipelineError, Role};

/// Install the global tracing subscriber. Output goes to stderr so stdout carries nothing
/// but items. Filtering follows `RUST_LOG`; with it unset only errors are shown.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
}

#[cfg(test)]
mod tracing_test {
    use super::init_tracing;
    use rusty_fork::rusty_fork_test;

    rusty_fork_test! {
    #[test]
    fn subscriber_installs_once() {
        std::env::set_var("RUST_LOG", "trace");
        assert!(init_tracing().is_ok());
        assert!(init_tracing().is_err());
    }

    #[test]
    /// A run with every log level enabled must leave stdout-style output untouched.
    fn traced_run_has_same_output() {
        use crate::producer::ITEMS;
        use crate::test::{lines, run_bounded, SharedSink};
        use crate::Pipeline;

        std::env::set_var("RUST_LOG", "trace");
        init_tracing().unwrap();

        let sink = SharedSink::new();
        run_bounded(Pipeline::default(), sink.clone()).unwrap();
        assert_eq!(lines(&sink.contents()), ITEMS.collect::<Vec<_>>());
    }
    }
}
