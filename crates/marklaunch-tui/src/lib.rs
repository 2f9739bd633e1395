//! Terminal frontend for the marklaunch bookmark picker.
//!
//! Bridges crossterm input into session events and draws the session's view
//! with ratatui. All picker semantics live in `marklaunch-core`.

pub mod app;
pub mod cli;
pub mod colors;
pub mod logging;
pub mod render;
pub mod report;
