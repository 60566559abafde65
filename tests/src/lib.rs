//! # Inscription-Chain Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/          # Criterion benchmarks per component
//! └── src/integration/  # Cross-component scenarios through the runtime facade
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p ic-tests
//!
//! # By scenario
//! cargo test -p ic-tests integration::token_protocol
//!
//! # Benchmarks
//! cargo bench -p ic-tests
//! ```

pub mod fixtures;
pub mod integration;
