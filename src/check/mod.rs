//! Drift checks.
//!
//! - [`runner`] - invokes the drift CLI once per scope
//! - [`classify`] - turns CLI output into ok / drift / error
//! - [`summary`] - aggregates outcomes into the JSON summary

pub mod classify;
pub mod runner;
pub mod summary;

pub use classify::{
    classify, parse_change_counts, ChangeCounts, CheckStatus, Classification, DRIFT_EXIT_CODE,
};
pub use runner::{ApiCredentials, CheckRunner, API_TOKEN_ENV, API_URL_ENV, DEFAULT_CLI};
pub use summary::{CheckOutcome, CheckSummary};
