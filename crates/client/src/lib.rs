//! Sheets API client, shared by every command.
//!
//! This crate is the single source of truth for the Sheets wire contract:
//! service-account auth, tab metadata, value reads/writes, and the
//! batchUpdate request fragments.
//!
//! No CLI concepts. No retries. No caching; callers re-fetch metadata
//! whenever they need a sheet id.

pub mod auth;
pub mod client;
pub mod requests;

pub use auth::{fetch_access_token, ServiceAccountKey};
pub use client::{ApiError, SheetsApi, SheetsClient, TabMeta, UpdateSummary, ValueRange};
