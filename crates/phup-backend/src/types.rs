use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Formula prefix shared by every versioned PHP package (`php56`, `php70-gd`).
pub const FORMULA_PREFIX: &str = "php";

/// A side-by-side PHP version marker: a single major-version digit followed
/// by the minor digits (`"56"` is PHP 5.6, `"101"` is PHP 1.01). Tokens
/// order by the decimal reading of their dotted form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionToken {
    digits: String,
}

impl VersionToken {
    /// Build a token from a parsed `major.minor` release. The major version
    /// must be a single digit, matching the token format.
    #[must_use]
    pub fn from_major_minor(major: u32, minor: u32) -> Self {
        Self {
            digits: format!("{major}{minor}"),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// Dotted display form: a separator between the first digit and the rest.
    #[must_use]
    pub fn dotted(&self) -> String {
        format!("{}.{}", &self.digits[..1], &self.digits[1..])
    }

    /// Formula name of the interpreter package for this version.
    #[must_use]
    pub fn formula(&self) -> String {
        format!("{FORMULA_PREFIX}{}", self.digits)
    }

    fn split(&self) -> (u8, &str) {
        (self.digits.as_bytes()[0] - b'0', &self.digits[1..])
    }
}

impl Ord for VersionToken {
    fn cmp(&self, other: &Self) -> Ordering {
        let (major, minor) = self.split();
        let (other_major, other_minor) = other.split();
        // Lexicographic comparison of the minor digits matches the decimal
        // reading of the dotted form ("05" before "5", "15" before "2").
        major
            .cmp(&other_major)
            .then_with(|| minor.cmp(other_minor))
    }
}

impl PartialOrd for VersionToken {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenParseError {
    #[error("expected a two- or three-digit version token, got: {input}")]
    InvalidFormat { input: String },
}

impl FromStr for VersionToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if (2..=3).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self {
                digits: s.to_string(),
            })
        } else {
            Err(TokenParseError::InvalidFormat {
                input: s.to_string(),
            })
        }
    }
}

/// An installed formula, classified once at enumeration time instead of
/// re-slicing identifiers at every use site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Package {
    /// A bare versioned interpreter package (`php56`).
    Interpreter(VersionToken),
    /// An extension package owned by one interpreter version (`php56-xdebug`).
    Extension { owner: VersionToken, name: String },
}

impl Package {
    /// Classify a formula identifier. Identifiers that do not follow the
    /// `php<NN[N]>[-ext]` convention are not versioned PHP packages.
    #[must_use]
    pub fn parse(identifier: &str) -> Option<Self> {
        let rest = identifier.trim().strip_prefix(FORMULA_PREFIX)?;
        let digit_count = rest.bytes().take_while(u8::is_ascii_digit).count();
        if !(2..=3).contains(&digit_count) {
            return None;
        }
        let (digits, suffix) = rest.split_at(digit_count);
        let owner = VersionToken::from_str(digits).ok()?;
        if suffix.is_empty() {
            return Some(Self::Interpreter(owner));
        }
        let name = suffix.strip_prefix('-')?;
        if name.is_empty() {
            return None;
        }
        Some(Self::Extension {
            owner,
            name: name.to_string(),
        })
    }

    #[must_use]
    pub fn owner(&self) -> &VersionToken {
        match self {
            Self::Interpreter(version) => version,
            Self::Extension { owner, .. } => owner,
        }
    }

    #[must_use]
    pub fn is_interpreter(&self) -> bool {
        matches!(self, Self::Interpreter(_))
    }

    /// Identifier without the formula prefix (`56`, `56-xdebug`), the form
    /// arguments are matched against after normalization.
    #[must_use]
    pub fn short_id(&self) -> String {
        match self {
            Self::Interpreter(version) => version.as_str().to_string(),
            Self::Extension { owner, name } => format!("{owner}-{name}"),
        }
    }

    /// Full formula name as known to the package manager.
    #[must_use]
    pub fn formula(&self) -> String {
        format!("{FORMULA_PREFIX}{}", self.short_id())
    }
}

impl fmt::Display for Package {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formula())
    }
}

/// Strip the optional formula prefix from a user-supplied identifier.
#[must_use]
pub fn normalize_identifier(argument: &str) -> &str {
    argument.strip_prefix(FORMULA_PREFIX).unwrap_or(argument)
}

/// The deduplicated set of versioned PHP packages currently installed.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    packages: Vec<Package>,
}

impl InstalledPackages {
    /// Build the set from raw formula identifiers, keeping only identifiers
    /// that follow the versioned-package convention.
    pub fn from_identifiers<'a, I>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut packages = Vec::new();
        for identifier in identifiers {
            if let Some(package) = Package::parse(identifier)
                && !packages.contains(&package)
            {
                packages.push(package);
            }
        }
        Self { packages }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    /// Look up a package by its normalized identifier.
    #[must_use]
    pub fn resolve(&self, short_id: &str) -> Option<&Package> {
        self.packages
            .iter()
            .find(|package| package.short_id() == short_id)
    }

    /// Sorted, deduplicated tokens of the installed interpreter versions.
    /// Extension packages never contribute tokens.
    #[must_use]
    pub fn versions(&self) -> Vec<VersionToken> {
        self.packages
            .iter()
            .filter(|package| package.is_interpreter())
            .map(|package| package.owner().clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Extension packages owned by the given interpreter version.
    pub fn extensions_of<'a>(
        &'a self,
        version: &'a VersionToken,
    ) -> impl Iterator<Item = &'a Package> {
        self.packages
            .iter()
            .filter(move |package| !package.is_interpreter() && package.owner() == version)
    }

    /// Formula names of every package in the set, for usage/error output.
    #[must_use]
    pub fn identifiers(&self) -> Vec<String> {
        self.packages.iter().map(Package::formula).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_two_digit_token() {
        let token: VersionToken = "56".parse().unwrap();
        assert_eq!(token.as_str(), "56");
        assert_eq!(token.dotted(), "5.6");
        assert_eq!(token.formula(), "php56");
    }

    #[test]
    fn parse_three_digit_token() {
        let token: VersionToken = "101".parse().unwrap();
        assert_eq!(token.dotted(), "1.01");
    }

    #[test]
    fn parse_token_rejects_short_and_long_input() {
        assert!("5".parse::<VersionToken>().is_err());
        assert!("5600".parse::<VersionToken>().is_err());
    }

    #[test]
    fn parse_token_rejects_non_digits() {
        assert!("5x".parse::<VersionToken>().is_err());
        assert!("".parse::<VersionToken>().is_err());
    }

    #[test]
    fn token_ordering_follows_the_dotted_decimal_reading() {
        let v53: VersionToken = "53".parse().unwrap();
        let v56: VersionToken = "56".parse().unwrap();
        let v70: VersionToken = "70".parse().unwrap();

        assert!(v53 < v56);
        assert!(v56 < v70);
    }

    #[test]
    fn three_digit_tokens_order_like_their_dotted_form() {
        // "101" displays as 1.01 and must order below every 5.x token,
        // and "505" (5.05) below both "53" (5.3) and "56" (5.6).
        let v101: VersionToken = "101".parse().unwrap();
        let v505: VersionToken = "505".parse().unwrap();
        let v53: VersionToken = "53".parse().unwrap();
        let v56: VersionToken = "56".parse().unwrap();

        assert!(v101 < v505);
        assert!(v505 < v53);
        assert!(v53 < v56);
    }

    #[test]
    fn token_from_major_minor() {
        let token = VersionToken::from_major_minor(7, 0);
        assert_eq!(token.as_str(), "70");
    }

    #[test]
    fn package_parse_interpreter() {
        let package = Package::parse("php56").unwrap();
        assert!(package.is_interpreter());
        assert_eq!(package.owner().as_str(), "56");
        assert_eq!(package.formula(), "php56");
    }

    #[test]
    fn package_parse_extension() {
        let package = Package::parse("php56-xdebug").unwrap();
        assert!(!package.is_interpreter());
        assert_eq!(package.owner().as_str(), "56");
        assert_eq!(package.short_id(), "56-xdebug");
        assert_eq!(package.formula(), "php56-xdebug");
    }

    #[test]
    fn package_parse_rejects_unrelated_formulas() {
        assert!(Package::parse("openssl").is_none());
        assert!(Package::parse("php").is_none());
        assert!(Package::parse("php7").is_none());
        assert!(Package::parse("php56xdebug").is_none());
        assert!(Package::parse("php56-").is_none());
    }

    #[test]
    fn normalize_strips_optional_prefix() {
        assert_eq!(normalize_identifier("php56"), "56");
        assert_eq!(normalize_identifier("56-xdebug"), "56-xdebug");
        assert_eq!(normalize_identifier("phpunit"), "unit");
    }

    fn installed(identifiers: &[&str]) -> InstalledPackages {
        InstalledPackages::from_identifiers(identifiers.iter().copied())
    }

    #[test]
    fn installed_set_skips_unrelated_formulas_and_duplicates() {
        let set = installed(&["php56", "openssl", "php56", "php70", "php56-xdebug"]);

        assert_eq!(set.identifiers(), vec!["php56", "php70", "php56-xdebug"]);
    }

    #[test]
    fn versions_are_sorted_interpreter_tokens_only() {
        let set = installed(&["php70", "php53-intl", "php56", "php53"]);

        let versions = set.versions();
        let tokens: Vec<&str> = versions.iter().map(VersionToken::as_str).collect();
        assert_eq!(tokens, vec!["53", "56", "70"]);
    }

    #[test]
    fn versions_ignore_extensions_without_installed_interpreter() {
        let set = installed(&["php56", "php99-gd"]);

        let versions = set.versions();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].as_str(), "56");
    }

    #[test]
    fn resolve_matches_short_identifiers() {
        let set = installed(&["php56", "php56-xdebug"]);

        assert!(set.resolve("56").is_some());
        assert!(set.resolve("56-xdebug").is_some());
        assert!(set.resolve("70").is_none());
        assert!(set.resolve("php56").is_none());
    }

    #[test]
    fn extensions_of_filters_by_owner() {
        let set = installed(&["php56", "php56-xdebug", "php56-gd", "php70-gd"]);
        let version: VersionToken = "56".parse().unwrap();

        let names: Vec<String> = set.extensions_of(&version).map(Package::short_id).collect();
        assert_eq!(names, vec!["56-xdebug", "56-gd"]);
    }
}
