// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod document;
pub mod tag_result;

pub use document::Document;
pub use tag_result::{TagReport, TagResult};
