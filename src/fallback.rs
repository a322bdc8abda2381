//! Ordered fallback chains and the upstream error type they absorb.
//!
//! A chain is a list of named stages tried in order. Each stage either
//! produces a value (chain stops), misses (`Ok(None)`, try the next one) or
//! fails (`Err`, logged and try the next one). When every stage is exhausted
//! the caller-supplied default is returned, so a chain never errors.

use thiserror::Error;
use tracing::{debug, warn};

/// Failures of an upstream data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("provider returned status {status}{}", message_suffix(.message))]
    Status {
        status: String,
        message: Option<String>,
    },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("no API key configured")]
    MissingApiKey,
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

impl From<ureq::Error> for ProviderError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(code, _) => Self::Status {
                status: format!("HTTP {}", code),
                message: None,
            },
            ureq::Error::Transport(t) => {
                let timed_out = std::error::Error::source(&t)
                    .and_then(|s| s.downcast_ref::<std::io::Error>())
                    .is_some_and(|io| {
                        matches!(
                            io.kind(),
                            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
                        )
                    });
                if timed_out {
                    Self::Timeout
                } else {
                    Self::Network(t.to_string())
                }
            }
        }
    }
}

impl From<std::io::Error> for ProviderError {
    /// `ureq` reports body decoding failures as `io::Error`.
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => Self::Timeout,
            _ => Self::InvalidResponse(e.to_string()),
        }
    }
}

type StageFn<'a, T> = Box<dyn FnOnce() -> Result<Option<T>, ProviderError> + 'a>;

struct Stage<'a, T> {
    name: &'static str,
    run: StageFn<'a, T>,
}

/// First-success-wins sequence of fallible sources.
pub struct FallbackChain<'a, T> {
    label: &'static str,
    stages: Vec<Stage<'a, T>>,
}

impl<'a, T> FallbackChain<'a, T> {
    /// Start an empty chain. `label` names the chain in log output.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            stages: Vec::new(),
        }
    }

    /// Append a stage that is tried after every stage added before it.
    pub fn then<F>(mut self, name: &'static str, run: F) -> Self
    where
        F: FnOnce() -> Result<Option<T>, ProviderError> + 'a,
    {
        self.stages.push(Stage {
            name,
            run: Box::new(run),
        });
        self
    }

    /// Run the stages in order; the first `Ok(Some(_))` wins.
    ///
    /// Returns the winning stage name alongside the value, or `None` when every
    /// stage missed or failed.
    pub fn run(self) -> Option<(&'static str, T)> {
        let label = self.label;
        for stage in self.stages {
            match (stage.run)() {
                Ok(Some(value)) => {
                    debug!(chain = label, stage = stage.name, "fallback stage succeeded");
                    return Some((stage.name, value));
                }
                Ok(None) => {
                    debug!(chain = label, stage = stage.name, "fallback stage missed");
                }
                Err(e) => {
                    warn!(chain = label, stage = stage.name, error = %e, "fallback stage failed");
                }
            }
        }
        None
    }

    /// Run the chain, producing `default()` when no stage succeeds.
    pub fn resolve_or<D>(self, default: D) -> T
    where
        D: FnOnce() -> T,
    {
        let label = self.label;
        match self.run() {
            Some((_, value)) => value,
            None => {
                debug!(chain = label, "all fallback stages exhausted, using default");
                default()
            }
        }
    }
}
