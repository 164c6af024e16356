//! Rendering of workflow results

pub mod console;
pub mod formatter;
