//! Command Handlers

mod delivery_handlers;

pub use delivery_handlers::{ExportTextHandler, PlayTextHandler};
