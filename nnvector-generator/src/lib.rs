//! Renders nnvector test cases into files.
//!
//! ## Modules
//! - `vectors`: JSON vectors and declaration text per case.
//! - `listing`: generated Rust test listings.
pub mod listing;
pub mod vectors;
