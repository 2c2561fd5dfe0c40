//! # Fire-Alarm Drill Core Library
//!
//! This library tracks which floors of a building have been checked during a
//! fire-alarm drill. Chat front ends (the `firealarm-bot` binary) are thin
//! layers that turn user commands into calls on the same [`FloorTracker`].
//!
//! ## Architecture
//!
//! - **Tracker**: an in-memory log of floor checks behind a single lock, with
//!   a debounced idle timer that wipes the log after a quiet period
//! - **Input**: parsing of `12`, `7-10` and `3, 5, 9` style floor arguments
//! - **Format**: plain-text rendering of confirmations, summaries and statistics
//! - **Config**: TOML configuration for the tracker, Telegram and logging
//!
//! ## Key Components
//!
//! - [`FloorTracker`]: floor check store and idle expiry
//! - [`FloorStatistics`]: consistent snapshot of drill progress
//! - [`Config`]: application configuration management

pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod tracker;

pub use config::{Config, LoggingConfig, TelegramConfig, TrackerConfig};
pub use error::{ConfigError, CoreError, ValidationError};
pub use input::FloorInput;
pub use tracker::{CheckEvent, CheckLog, FloorRange, FloorStatistics, FloorTracker};
