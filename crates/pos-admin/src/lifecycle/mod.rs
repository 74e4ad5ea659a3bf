//! # Lifecycle
//!
//! Starting and stopping the collection actors behind the pages.

pub mod pos_system;

pub use pos_system::*;
