//! Declarative robin configuration.
//!
//! Lets a service pick boundedness and buffer policy from a config file
//! instead of code:
//!
//! ```json
//! { "max_len": 8, "buffer": { "policy": "fifo", "capacity": 32 } }
//! ```
//!
//! Building from a config follows the constructor rules: `max_len == 0` is
//! unbounded and any buffer section is ignored.

use std::error::Error;
use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::buffer::{Buffer, FifoBuffer, LifoBuffer};
use crate::robin::Robin;

/// Pop order of the overflow buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BufferPolicy {
    /// Most recently overflowed value is promoted first ([`LifoBuffer`]).
    #[default]
    Lifo,
    /// Oldest overflowed value is promoted first ([`FifoBuffer`]).
    Fifo,
}

/// Overflow buffer section.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BufferConfig {
    #[serde(default)]
    pub policy: BufferPolicy,
    pub capacity: usize,
}

/// Robin configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobinConfig {
    /// Maximum number of values; 0 means unbounded.
    #[serde(default)]
    pub max_len: usize,
    #[serde(default)]
    pub buffer: Option<BufferConfig>,
}

/// Errors from loading a [`RobinConfig`].
#[derive(Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// The input is not valid JSON for a `RobinConfig`.
    Parse(serde_json::Error),
    /// A buffer section declared capacity 0.
    ZeroBufferCapacity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid robin config: {err}"),
            Self::ZeroBufferCapacity => write!(f, "buffer capacity must be positive"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::ZeroBufferCapacity => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl RobinConfig {
    /// Unbounded robin.
    pub const fn unbounded() -> Self {
        Self {
            max_len: 0,
            buffer: None,
        }
    }

    /// Bounded robin with an optional buffer.
    pub const fn bounded(max_len: usize, buffer: Option<BufferConfig>) -> Self {
        Self { max_len, buffer }
    }

    /// Parses and validates a JSON config.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects a buffer section with capacity 0.
    ///
    /// Unbounded configs are not checked: their buffer is never built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.buffer {
            Some(buffer) if self.max_len > 0 && buffer.capacity == 0 => {
                Err(ConfigError::ZeroBufferCapacity)
            }
            _ => Ok(()),
        }
    }

    /// Builds an empty robin with this configuration.
    pub fn build<T>(&self) -> Robin<T, Box<dyn Buffer<T>>>
    where
        T: Eq + Hash + Clone + 'static,
    {
        let buffer = self
            .buffer
            .filter(|_| self.max_len > 0)
            .map(|cfg| -> Box<dyn Buffer<T>> {
                match cfg.policy {
                    BufferPolicy::Lifo => Box::new(LifoBuffer::with_capacity(cfg.capacity)),
                    BufferPolicy::Fifo => Box::new(FifoBuffer::with_capacity(cfg.capacity)),
                }
            });
        Robin::from_parts(self.max_len, buffer)
    }
}
