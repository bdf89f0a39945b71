//! Scope selection.
//!
//! Exactly one [`FilterMode`] is applied per invocation. Choosing between
//! the environment, single-name and name-list inputs is the caller's job.

use std::fmt;

use crate::config::ScopeConfig;
use crate::error::{DriftError, Result};

/// Which scopes to select from the config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterMode {
    /// Every scope, in source order.
    #[default]
    None,
    /// Scopes whose `environment` equals the value exactly.
    ByEnvironment(String),
    /// The first scope with this name.
    BySingleName(String),
    /// The first scope for each name, in the requested order.
    ByNameList(Vec<String>),
}

impl FilterMode {
    /// Build a filter from the three caller inputs.
    ///
    /// Empty or whitespace-only inputs count as absent, since action inputs
    /// that were never set arrive as empty strings. When more than one input
    /// is present the first in the order environment, scope, scopes wins;
    /// the CLI rejects that combination with `ConflictingFilters` before
    /// it gets here.
    pub fn from_inputs(
        environment: Option<&str>,
        scope: Option<&str>,
        scopes: Option<&str>,
    ) -> Self {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|s| !s.is_empty())
        }

        if let Some(env) = present(environment) {
            FilterMode::ByEnvironment(env.to_string())
        } else if let Some(name) = present(scope) {
            FilterMode::BySingleName(name.to_string())
        } else if let Some(list) = present(scopes) {
            FilterMode::ByNameList(split_name_list(list))
        } else {
            FilterMode::None
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::None => write!(f, "all scopes"),
            FilterMode::ByEnvironment(env) => write!(f, "environment '{}'", env),
            FilterMode::BySingleName(name) => write!(f, "scope '{}'", name),
            FilterMode::ByNameList(names) => write!(f, "scopes '{}'", names.join(", ")),
        }
    }
}

/// Split a comma-separated list of scope names, trimming each entry.
pub fn split_name_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Scopes picked by a filter, plus any non-fatal warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Selected scopes, in result order.
    pub scopes: Vec<ScopeConfig>,
    /// Requested names that matched nothing.
    pub unmatched: Vec<String>,
}

impl Selection {
    /// Human-readable warnings for the unmatched names.
    pub fn warnings(&self) -> Vec<String> {
        self.unmatched
            .iter()
            .map(|name| format!("Scope '{}' not found in configuration, skipping", name))
            .collect()
    }
}

/// Apply `filter` to `scopes`.
///
/// # Errors
///
/// Returns `NoMatchingScopes` when an environment filter selects nothing
/// or every name in a name list is unknown, and `ScopeNotFound` when a
/// single-name filter misses.
pub fn resolve_scopes(scopes: &[ScopeConfig], filter: &FilterMode) -> Result<Selection> {
    let selection = match filter {
        FilterMode::None => Selection {
            scopes: scopes.to_vec(),
            unmatched: Vec::new(),
        },
        FilterMode::ByEnvironment(env) => {
            let matched: Vec<ScopeConfig> = scopes
                .iter()
                .filter(|s| s.environment == *env)
                .cloned()
                .collect();
            if matched.is_empty() {
                return Err(DriftError::NoMatchingScopes {
                    filter: filter.to_string(),
                });
            }
            Selection {
                scopes: matched,
                unmatched: Vec::new(),
            }
        }
        FilterMode::BySingleName(name) => {
            let scope = find_by_name(scopes, name).ok_or_else(|| DriftError::ScopeNotFound {
                name: name.clone(),
            })?;
            Selection {
                scopes: vec![scope.clone()],
                unmatched: Vec::new(),
            }
        }
        FilterMode::ByNameList(names) => {
            let mut selection = Selection::default();
            for name in names {
                match find_by_name(scopes, name) {
                    Some(scope) => selection.scopes.push(scope.clone()),
                    None => {
                        tracing::warn!("Scope '{}' not found, skipping", name);
                        selection.unmatched.push(name.clone());
                    }
                }
            }
            if selection.scopes.is_empty() {
                return Err(DriftError::NoMatchingScopes {
                    filter: filter.to_string(),
                });
            }
            selection
        }
    };

    tracing::debug!(
        "Selected {} of {} scope(s) by {}",
        selection.scopes.len(),
        scopes.len(),
        filter
    );
    Ok(selection)
}

/// First scope with the given name; later duplicates are shadowed.
fn find_by_name<'a>(scopes: &'a [ScopeConfig], name: &str) -> Option<&'a ScopeConfig> {
    scopes.iter().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope(name: &str, environment: &str) -> ScopeConfig {
        ScopeConfig {
            name: name.to_string(),
            project: "core".to_string(),
            environment: environment.to_string(),
            directory: format!("infra/{}", name),
            tool: None,
            tool_version: None,
            slack_channel: None,
        }
    }

    fn sample() -> Vec<ScopeConfig> {
        vec![scope("a", "prod"), scope("b", "staging")]
    }

    fn names(selection: &Selection) -> Vec<&str> {
        selection.scopes.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn no_filter_returns_all_in_order() {
        let scopes = vec![scope("z", "prod"), scope("a", "dev"), scope("m", "prod")];
        let selection = resolve_scopes(&scopes, &FilterMode::None).unwrap();
        assert_eq!(selection.scopes, scopes);
        assert!(selection.unmatched.is_empty());
    }

    #[test]
    fn environment_filter_selects_exact_matches() {
        let selection =
            resolve_scopes(&sample(), &FilterMode::ByEnvironment("prod".into())).unwrap();
        assert_eq!(names(&selection), vec!["a"]);
    }

    #[test]
    fn environment_filter_is_case_sensitive() {
        let result = resolve_scopes(&sample(), &FilterMode::ByEnvironment("Prod".into()));
        assert!(matches!(result, Err(DriftError::NoMatchingScopes { .. })));
    }

    #[test]
    fn environment_filter_does_not_match_substrings() {
        let scopes = vec![scope("a", "production"), scope("b", "prod")];
        let selection =
            resolve_scopes(&scopes, &FilterMode::ByEnvironment("prod".into())).unwrap();
        assert_eq!(names(&selection), vec!["b"]);
    }

    #[test]
    fn environment_filter_without_matches_fails() {
        let result = resolve_scopes(&sample(), &FilterMode::ByEnvironment("qa".into()));
        match result {
            Err(DriftError::NoMatchingScopes { filter }) => {
                assert_eq!(filter, "environment 'qa'");
            }
            other => panic!("expected NoMatchingScopes, got {:?}", other),
        }
    }

    #[test]
    fn single_name_returns_scope() {
        let selection =
            resolve_scopes(&sample(), &FilterMode::BySingleName("b".into())).unwrap();
        assert_eq!(names(&selection), vec!["b"]);
    }

    #[test]
    fn single_name_missing_fails() {
        let result = resolve_scopes(&sample(), &FilterMode::BySingleName("c".into()));
        assert!(matches!(result, Err(DriftError::ScopeNotFound { name }) if name == "c"));
    }

    #[test]
    fn single_name_first_duplicate_wins() {
        let scopes = vec![scope("a", "prod"), scope("a", "staging")];
        let selection =
            resolve_scopes(&scopes, &FilterMode::BySingleName("a".into())).unwrap();
        assert_eq!(selection.scopes.len(), 1);
        assert_eq!(selection.scopes[0].environment, "prod");
    }

    #[test]
    fn name_list_preserves_requested_order() {
        let filter = FilterMode::ByNameList(vec!["b".into(), "a".into()]);
        let selection = resolve_scopes(&sample(), &filter).unwrap();
        assert_eq!(names(&selection), vec!["b", "a"]);
    }

    #[test]
    fn name_list_skips_unknown_names_with_warning() {
        let filter = FilterMode::ByNameList(vec!["a".into(), "missing".into()]);
        let selection = resolve_scopes(&sample(), &filter).unwrap();
        assert_eq!(names(&selection), vec!["a"]);
        assert_eq!(selection.unmatched, vec!["missing".to_string()]);

        let warnings = selection.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("missing"));
    }

    #[test]
    fn name_list_all_unknown_fails() {
        let filter = FilterMode::ByNameList(vec!["missing1".into(), "missing2".into()]);
        let result = resolve_scopes(&sample(), &filter);
        assert!(matches!(result, Err(DriftError::NoMatchingScopes { .. })));
    }

    #[test]
    fn split_name_list_trims_entries() {
        assert_eq!(
            split_name_list(" a , b,,c "),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn from_inputs_picks_environment() {
        let filter = FilterMode::from_inputs(Some("prod"), None, None);
        assert_eq!(filter, FilterMode::ByEnvironment("prod".into()));
    }

    #[test]
    fn from_inputs_treats_empty_as_absent() {
        let filter = FilterMode::from_inputs(Some(""), Some("  "), Some("a, b"));
        assert_eq!(
            filter,
            FilterMode::ByNameList(vec!["a".into(), "b".into()])
        );
    }

    #[test]
    fn from_inputs_none_when_all_empty() {
        assert_eq!(FilterMode::from_inputs(None, None, None), FilterMode::None);
        assert_eq!(
            FilterMode::from_inputs(Some(""), Some(""), Some("")),
            FilterMode::None
        );
    }

    #[test]
    fn from_inputs_single_scope() {
        let filter = FilterMode::from_inputs(None, Some("dns"), None);
        assert_eq!(filter, FilterMode::BySingleName("dns".into()));
    }
}
