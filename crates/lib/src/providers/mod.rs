//! # Providers
//!
//! External services the pipeline talks to, and the factory that builds them.

pub mod ai;
pub mod factory;
