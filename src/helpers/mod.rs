//! Helper functions shared across content, projects and the API
//!
//! Date parsing and formatting, plus the small text transforms used when
//! turning repository records into display copy.

mod date;
mod text;

pub use date::*;
pub use text::*;
