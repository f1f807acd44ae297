pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod providers;
pub mod render;
pub mod storage;
pub mod terminal;
pub mod types;
pub mod utils;
pub mod workout;
