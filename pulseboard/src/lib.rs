//! Local dashboard service over an Apple Health export parsing API:
//! a thin records proxy, sleep and vitals summarization, and a
//! data-grounded chat assistant.

pub mod api;
pub mod backend;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod sleep;
pub mod timeparse;
pub mod vitals;

pub use config::Config;
pub use error::{PulseboardError, Result};
