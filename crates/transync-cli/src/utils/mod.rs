//! Output helpers.

pub mod ui;
