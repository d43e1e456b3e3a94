//! Bookstore application library
//!
//! Seller and book modules plus the bootstrap that wires them to storage and HTTP.

pub mod app;
pub mod modules;
pub mod utils;

pub use modules::{build_registry, register_all};
