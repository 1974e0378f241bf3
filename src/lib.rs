//! Survey Wizard - a multi-page desirability survey for the terminal
//!
//! The survey model and submission client are usable without the terminal
//! front end; `app` and `ui` wire them to ratatui.

pub mod app;
pub mod config;
pub mod logging;
pub mod submit;
pub mod survey;
pub mod ui;
