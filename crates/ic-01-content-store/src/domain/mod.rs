//! # Domain Layer
//!
//! Chunking rules, pointer derivation and error types. No storage access.

pub mod config;
pub mod errors;
pub mod pointer;
