// file: src/tagger/mod.rs
// description: keyword matching module exports
// reference: internal module structure

pub mod matcher;

pub use matcher::TagMatcher;
