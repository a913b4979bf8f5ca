//! Core types for the ticket overview action row.
//!
//! This crate contains the data structures shared by the action row crates:
//! - Action descriptors and the payload they arrive in
//! - Item identifiers
//! - Overview view modes
//! - Configuration types
//! - Error types

mod action;
mod config;
mod error;
mod item;
mod view_mode;

pub use action::{ActionDescriptor, ActionPayload};
pub use config::{config_dir, ActionRowConfig, BulkConfig, DialogConfig};
pub use error::{ActionRowError, ConfigError};
pub use item::ItemId;
pub use view_mode::ViewMode;
