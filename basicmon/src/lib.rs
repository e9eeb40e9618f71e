//! basicmon: a live terminal dashboard of host resource usage.

pub mod app;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod state;
pub mod ui;
