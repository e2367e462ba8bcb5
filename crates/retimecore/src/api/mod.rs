//! Media update service and its authentication

pub mod client;
pub mod token;

pub use client::{GoProApiClient, MediaUpdateService};
pub use token::{extract_access_token, resolve_access_token, AccessToken};
