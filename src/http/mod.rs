//! HTTP protocol implementation.
//!
//! This module implements the single-request-per-connection HTTP/1.1 core.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and header lookup utilities
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Accumulate bytes until a full request (or a
//!        └──────┬──────┘   malformed one) is in the buffer
//!               │
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch through the responder chain
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               └─ Close (one request per connection, no keep-alive)
//! ```
//!
//! A request that cannot be parsed still produces a well-formed response
//! (the 404 fallback), never a protocol error.

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
