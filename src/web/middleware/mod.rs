//! # Web API Middleware
//!
//! Request-level middleware applied ahead of the handlers.

pub mod auth;
