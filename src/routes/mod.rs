//! Request routing
//!
//! This module implements the ordered responder chain: each responder pairs
//! a match predicate with response generation, and the chain delegates to
//! the first responder that matches, falling back to 404.

pub mod chain;
pub mod echo;
pub mod files;

pub use chain::{Responder, ResponderChain};
pub use files::FileRoutes;
