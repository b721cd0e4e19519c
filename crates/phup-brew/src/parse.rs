use phup_backend::VersionToken;

/// Split `brew list --formula` output into one identifier per line.
#[must_use]
pub fn parse_formula_identifiers(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Recover the active version token from a `php -v` banner. Only the first
/// line is consulted; it reads like `PHP 5.6.30 (cli) (built: ...)`.
#[must_use]
pub fn parse_version_banner(output: &str) -> Option<VersionToken> {
    let first_line = output.lines().next()?;
    let release = first_line.strip_prefix("PHP ")?.split_whitespace().next()?;

    let mut parts = release.split('.');
    let major: u32 = parts.next()?.parse().ok()?;
    let minor: u32 = parts.next()?.parse().ok()?;

    // Tokens carry a single major digit; anything else cannot name an
    // installed formula.
    if major > 9 {
        return None;
    }

    Some(VersionToken::from_major_minor(major, minor))
}
