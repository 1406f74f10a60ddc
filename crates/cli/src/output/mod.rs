//! Output formatters

pub mod github;
pub mod json;
pub mod terminal;
