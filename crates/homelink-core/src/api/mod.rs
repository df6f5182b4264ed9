//! REST API client module for the smart-home service.
//!
//! This module provides the `ApiClient` for communicating with the
//! server: login/logout/refresh, the bearer-token request path with
//! its single silent retry on 401, and one method per resource
//! operation.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ClientError;
