//! Pokemon search TUI built on tui-dispatch
//!
//! The library exposes the state machine, HTTP client and components so
//! they can be exercised from integration tests.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod reducer;
pub mod search;
pub mod state;
