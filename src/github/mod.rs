//! GitHub Actions integration.
//!
//! - [`outputs`] - step outputs, job summary and PATH files
//! - [`annotations`] - `::warning::` / `::error::` workflow commands
//! - [`summary`] - Markdown rendering of check results

pub mod annotations;
pub mod outputs;
pub mod summary;

pub use annotations::{escape_data, escape_property, Annotation, Level};
pub use outputs::{format_output, GithubFiles};
pub use summary::render_summary;
