//! Core library for homelink.
//!
//! Provides the authenticated API client for the smart-home REST
//! service, the session/token management behind it, configuration
//! handling, and the wire models for every resource the service
//! exposes.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ClientError};
pub use config::Config;
