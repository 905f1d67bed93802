//! md2notion - Markdown to Notion converter
//!
//! Parses markdown into a store-agnostic element tree, converts the tree into
//! Notion blocks and uploads them to a page within the API's batching and
//! nesting limits.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::pedantic))]
// Allow some pedantic lints that are too strict for this project
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::enum_variant_names)]

pub mod block_model;
pub mod client;
pub mod config;
pub mod converter;
pub mod element_model;
pub mod parser;
pub mod pipeline;
pub mod upload;

pub use pipeline::{markdown_to_blocks, markdown_to_notion, PipelineError, UpdateMode};
