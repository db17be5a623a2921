// Engine library root

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod ingestion;
pub mod models;
pub mod notify;
pub mod services;
pub mod signals;
pub mod state;
