use phup_backend::{InstalledPackages, VersionToken};

/// The ordered, deduplicated list of installed interpreter versions.
#[derive(Debug, Clone, Default)]
pub struct VersionList {
    tokens: Vec<VersionToken>,
}

impl VersionList {
    #[must_use]
    pub fn from_installed(installed: &InstalledPackages) -> Self {
        Self {
            tokens: installed.versions(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[must_use]
    pub fn tokens(&self) -> &[VersionToken] {
        &self.tokens
    }

    /// Comma-joined dotted display form, e.g. `5.6, 7.0`.
    #[must_use]
    pub fn display_join(&self) -> String {
        self.tokens
            .iter()
            .map(VersionToken::dotted)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
