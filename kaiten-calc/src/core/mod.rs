//! Core module
//!
//! # Contents
//!
//! - [`Config`] - environment-driven configuration
//! - [`Calculator`] - application state and page transitions

pub mod config;
pub mod state;

pub use config::Config;
pub use state::{Calculator, Stage};
