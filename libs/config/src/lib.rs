//! # Torq Reconciler Configuration
//!
//! Layered settings for the state reconciler service:
//!
//! 1. Built-in defaults
//! 2. Optional TOML file
//! 3. `TORQ_RECONCILER__*` environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use torq_config::ReconcilerSettings;
//!
//! let settings = ReconcilerSettings::load(None).unwrap();
//! assert!(settings.upstream_buffer > 0);
//! ```

pub mod settings;

pub use settings::{ReconcilerSettings, ENV_PREFIX};
