//! Hansik - campus cafeteria menu service
//!
//! Two independent flows live in this crate:
//! - A small HTTP API that serves the weekly cafeteria menu from an
//!   immutable table injected at startup
//! - A label detection client used by the `hansik-labels` tool to send a
//!   local image to Google Cloud Vision and print the returned labels

pub mod api;
pub mod config;
pub mod error;
pub mod menu;
pub mod vision;

pub use error::{Error, Result};
