pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod export;
pub mod format;
pub mod logging;
pub mod plan;
pub mod timeline;
pub mod ui;
