//! Session state for the authenticated client.
//!
//! This module provides:
//! - `Token`: the opaque credential shape the server issues
//! - `TokenStore`: ordered access/refresh token history with last-wins reads
//! - `SessionState`: the token store plus the refresh-enabled flag and
//!   the mutable base URL
//!
//! Tokens live in memory only; they are cleared on logout and gone when
//! the process exits.

pub mod session;

pub use session::{SessionState, Token, TokenStore};
