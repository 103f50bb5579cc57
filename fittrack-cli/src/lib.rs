// Library exports for the FitTrack CLI
// This allows testing of internal modules

pub mod api;
pub mod charts;
pub mod commands;
pub mod config;
pub mod flows;
pub mod models;
pub mod routing;
pub mod state;
pub mod storage;
pub mod ui;
