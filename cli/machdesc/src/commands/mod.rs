//! CLI command implementations.

pub mod describe;
pub mod pages;
pub mod validate;
