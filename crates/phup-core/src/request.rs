use std::collections::BTreeMap;
use thiserror::Error;

use phup_backend::{InstalledPackages, Package, VersionToken, normalize_identifier};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("no packages requested")]
    NoArguments,

    #[error("unknown package: {argument}")]
    UnknownPackage { argument: String },
}

/// All requested packages owned by one interpreter version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGroup {
    pub version: VersionToken,
    /// True iff the bare version token itself was requested, selecting the
    /// interpreter for upgrade rather than a link-only pass.
    pub interpreter_requested: bool,
    pub extensions: Vec<Package>,
}

/// A validated upgrade request: deduplicated, grouped by owning version,
/// groups in ascending version order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeRequest {
    groups: Vec<VersionGroup>,
}

impl UpgradeRequest {
    #[must_use]
    pub fn groups(&self) -> &[VersionGroup] {
        &self.groups
    }

    /// The distinct owning-version tokens, in ascending order.
    #[must_use]
    pub fn versions(&self) -> Vec<&VersionToken> {
        self.groups.iter().map(|group| &group.version).collect()
    }
}

/// Validate raw arguments against the installed set. Fail-fast: the first
/// argument that does not resolve aborts validation; extension arguments
/// are all resolved before the owning-version membership check runs.
pub fn build_request(
    arguments: &[String],
    installed: &InstalledPackages,
) -> Result<UpgradeRequest, RequestError> {
    if arguments.is_empty() {
        return Err(RequestError::NoArguments);
    }

    let mut resolved: Vec<Package> = Vec::new();
    for argument in arguments {
        let short_id = normalize_identifier(argument);
        let Some(package) = installed.resolve(short_id) else {
            return Err(RequestError::UnknownPackage {
                argument: argument.clone(),
            });
        };
        if !resolved.contains(package) {
            resolved.push(package.clone());
        }
    }

    let mut groups: BTreeMap<VersionToken, VersionGroup> = BTreeMap::new();
    for package in resolved {
        let group = groups
            .entry(package.owner().clone())
            .or_insert_with(|| VersionGroup {
                version: package.owner().clone(),
                interpreter_requested: false,
                extensions: Vec::new(),
            });
        if package.is_interpreter() {
            group.interpreter_requested = true;
        } else {
            group.extensions.push(package);
        }
    }

    // A group formed purely from extensions still needs its owning
    // interpreter installed, or linking it for the upgrade would fail.
    for group in groups.values() {
        if installed.resolve(group.version.as_str()).is_none() {
            return Err(RequestError::UnknownPackage {
                argument: group.version.formula(),
            });
        }
    }

    Ok(UpgradeRequest {
        groups: groups.into_values().collect(),
    })
}

#[cfg(test)]
mod tests {
    use phup_backend::InstalledPackages;

    use super::{RequestError, build_request};

    fn installed(identifiers: &[&str]) -> InstalledPackages {
        InstalledPackages::from_identifiers(identifiers.iter().copied())
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn empty_arguments_are_a_distinct_error() {
        let result = build_request(&[], &installed(&["php56"]));
        assert_eq!(result.unwrap_err(), RequestError::NoArguments);
    }

    #[test]
    fn unknown_argument_fails_fast_with_the_offending_token() {
        let set = installed(&["php56", "php70"]);

        let result = build_request(&args(&["56", "70-gd", "70"]), &set);
        assert_eq!(
            result.unwrap_err(),
            RequestError::UnknownPackage {
                argument: "70-gd".to_string()
            }
        );
    }

    #[test]
    fn formula_prefix_is_optional_on_arguments() {
        let set = installed(&["php56", "php56-xdebug"]);

        let request = build_request(&args(&["php56", "php56-xdebug"]), &set).unwrap();
        let versions: Vec<&str> = request.versions().iter().map(|v| v.as_str()).collect();
        assert_eq!(versions, vec!["56"]);
        assert!(request.groups()[0].interpreter_requested);
        assert_eq!(request.groups()[0].extensions.len(), 1);
    }

    #[test]
    fn versions_are_deduplicated_and_sorted() {
        let set = installed(&["php53", "php56", "php70", "php70-gd", "php56-xdebug"]);

        let request =
            build_request(&args(&["70", "56-xdebug", "53", "70-gd", "56", "70"]), &set).unwrap();
        let versions: Vec<&str> = request.versions().iter().map(|v| v.as_str()).collect();
        assert_eq!(versions, vec!["53", "56", "70"]);
    }

    #[test]
    fn duplicate_arguments_resolve_once() {
        let set = installed(&["php56", "php56-xdebug"]);

        let request = build_request(&args(&["56-xdebug", "php56-xdebug"]), &set).unwrap();
        assert_eq!(request.groups()[0].extensions.len(), 1);
    }

    #[test]
    fn extension_only_group_leaves_interpreter_unselected() {
        let set = installed(&["php56", "php56-xdebug"]);

        let request = build_request(&args(&["56-xdebug"]), &set).unwrap();
        let group = &request.groups()[0];
        assert!(!group.interpreter_requested);
        assert_eq!(group.extensions[0].short_id(), "56-xdebug");
    }

    #[test]
    fn extension_matches_resolve_before_owning_version_check_errors() {
        // php71-gd is listed but its interpreter is not installed: every
        // extension argument resolves, then the owner check rejects php71.
        let set = installed(&["php56", "php71-gd"]);

        let result = build_request(&args(&["71-gd"]), &set);
        assert_eq!(
            result.unwrap_err(),
            RequestError::UnknownPackage {
                argument: "php71".to_string()
            }
        );
    }
}
