//! Foundation types for the developer console.
//!
//! This crate contains the types shared by the interpreter and its hosts:
//! the error taxonomy, configuration, the persisted-state schema, and the
//! output sink vocabulary.

pub mod config;
pub mod error;
pub mod output;
pub mod state;
