//! Output formatting for ranked results

pub mod formatter;
pub mod report;
