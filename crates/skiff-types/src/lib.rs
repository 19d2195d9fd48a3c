//! Foundation types and traits for Skiff.
//!
//! This crate contains the platform-agnostic core types shared by all Skiff
//! crates: key input events, the capability traits the session core requires
//! from its UI and navigation collaborators, and error types.

pub mod error;
pub mod input;
pub mod ui;
