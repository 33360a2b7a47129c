//! Inventory command service integration tests.
//!
//! - Dispatch the built-in product commands in-process
//! - Register extra handlers with the file convention
//! - Serve everything over HTTP (requires the `http` feature)

mod support;
mod basic;
#[cfg(feature = "http")]
mod http;
