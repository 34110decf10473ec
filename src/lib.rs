//! SecureBank dashboard client.
//!
//! - `api`: HTTP+JSON client for the bank server
//! - `page`: in-memory page model, templates and element bindings
//! - `controller`: login and dashboard page controllers
//! - `cli`: terminal host (Ratatui + Crossterm)

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod page;
pub mod util;

pub use error::{Error, Result};
