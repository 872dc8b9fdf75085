//! geoqa - Rule-based geography question answering.
//!
//! Questions are answered from a static JSON dataset of Q&A pairs by exact
//! lookup, then Jaccard similarity over character-class tokens, then keyword
//! overlap, with a fixed message when nothing matches.
//!
//! # Modules
//!
//! - [`commands`] - High-level operations (ask, add, list, categories, stats)
//! - [`knowledge`] - Q&A entries and the normalized lookup table
//! - [`matcher`] - Matching stages and the `Answerer` trait
//! - [`tokenizer`] - Ideographic / non-ideographic run tokenizer
//! - [`storage`] - Dataset storage trait and implementations
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface definitions

pub mod cli;
pub mod commands;
pub mod config;
pub mod knowledge;
pub mod matcher;
pub mod storage;
pub mod tokenizer;
