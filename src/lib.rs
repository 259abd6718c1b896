pub mod cli;
pub mod config;
pub mod error;
pub mod estimator;
pub mod init;
pub mod models;
pub mod presentation;
pub mod services;
pub mod translation;
pub mod utils;

pub use error::SentiscopeError;
