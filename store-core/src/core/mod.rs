//! Configuration for the store core

mod config;

pub use config::Config;
