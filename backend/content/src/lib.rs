//! Mock Content Generator.
//!
//! Nothing here reads the uploaded bytes. `extract` picks a canned paragraph
//! by filename; `summarize` slices the first two sentences out of it.

pub mod generator;
pub mod topics;

pub use generator::{extract, key_points, preview, summarize, PREVIEW_CHARS};
pub use topics::{Topic, DEFAULT_TOPIC, TOPICS};
