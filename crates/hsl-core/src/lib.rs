//! Shared types for the headline sentiment service and its dashboard client.
//!
//! Holds the sentiment [`Label`] domain, the JSON wire types exchanged over
//! HTTP, and the environment-driven [`AppConfig`].

pub mod app_config;
pub mod config;
pub mod label;
pub mod wire;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use label::Label;
pub use wire::{ScoreRequest, ScoreResponse, StatusResponse};
