//! HTML front end: upload form and extraction results.

pub mod handlers;
pub mod templates;
