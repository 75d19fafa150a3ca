//! Shelf - minimal static file server
//!
//! Core library for request parsing, filesystem resolution, and response emission.

pub mod config;
pub mod http;
pub mod server;
