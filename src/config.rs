//! Runtime knobs read from the environment. Every knob defaults to the plain behavior:
//! rendezvous item channel, unbounded completion wait, no injected delay.
use lazy_static::lazy_static;
use std::env::{var, VarError};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const CAPACITY_VAR: &str = "PRODCON_CAPACITY";
pub const DEADLINE_VAR: &str = "PRODCON_DEADLINE_MS";
pub const JITTER_VAR: &str = "PRODCON_JITTER_US";

lazy_static! {
    /// Process wide configuration. Initialized from the environment on first access.
    pub static ref CONFIG: Config = {
        debug!("Initializing CONFIG lazy static.");
        let config = Config::from_env();
        info!("Config {:?} selected.", config);
        config
    };
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Config {
    /// Item channel buffer size. Zero means every send waits for the matching receive.
    pub capacity: usize,
    /// How long the coordinator waits for the completion signal. `None` waits forever.
    pub deadline: Option<Duration>,
    /// Upper bound of the random delay injected before each channel operation.
    pub max_jitter: Duration,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            capacity: 0,
            deadline: None,
            max_jitter: Duration::from_micros(0),
        }
    }
}

impl Config {
    pub fn from_env() -> Config {
        let default = Config::default();
        Config {
            capacity: read_var(CAPACITY_VAR).unwrap_or(default.capacity),
            deadline: read_var(DEADLINE_VAR)
                .map(Duration::from_millis)
                .or(default.deadline),
            max_jitter: read_var(JITTER_VAR)
                .map(Duration::from_micros)
                .unwrap_or(default.max_jitter),
        }
    }

    pub fn with_capacity(self, capacity: usize) -> Config {
        Config { capacity, ..self }
    }

    pub fn with_deadline(self, deadline: Duration) -> Config {
        Config {
            deadline: Some(deadline),
            ..self
        }
    }

    pub fn with_max_jitter(self, max_jitter: Duration) -> Config {
        Config { max_jitter, ..self }
    }
}

/// Unset variables are silently ignored; garbage is reported and ignored.
fn read_var<T: FromStr>(name: &str) -> Option<T> {
    match var(name) {
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                warn!("Unable to parse {}={:?}. Using default.", name, value);
                None
            }
        },
        Err(VarError::NotPresent) => None,
        Err(e @ VarError::NotUnicode(_)) => {
            warn!("{} value is not valid unicode: {}, using default.", name, e);
            None
        }
    }
}
