//! Paginated PokeAPI card browser
//!
//! The library exposes the app's modules for the binary and for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod reducer;
pub mod state;
pub mod stats;
