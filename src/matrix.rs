//! GitHub Actions matrix generation.
//!
//! A workflow fans out one job per scope with
//! `strategy.matrix: ${{ fromJSON(needs.resolve.outputs.matrix) }}`.

use serde::{Deserialize, Serialize};

use crate::scope::ResolvedScope;

/// `strategy.matrix` value with one `include` entry per scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matrix {
    pub include: Vec<ResolvedScope>,
}

/// Build a matrix from resolved scopes, keeping their order.
pub fn build_matrix(scopes: &[ResolvedScope]) -> Matrix {
    Matrix {
        include: scopes.to_vec(),
    }
}

impl Matrix {
    /// Compact JSON, as `$GITHUB_OUTPUT` values must fit `fromJSON`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn len(&self) -> usize {
        self.include.len()
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }
}
