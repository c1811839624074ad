//! Courier - Minimal HTTP/1.1 echo and file server
//!
//! Core library for request parsing and responder dispatch.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
