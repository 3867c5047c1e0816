//! Exhibit - terminal registration desk for innovation exhibition participants
//!
//! This library exports the core modules for testing and potential reuse.

pub mod app;
pub mod form;
pub mod image;
pub mod logging;
pub mod models;
pub mod storage;
pub mod ui;
