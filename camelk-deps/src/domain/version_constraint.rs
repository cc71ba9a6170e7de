//! Version constraint parsing and matching
//!
//! Catalog versions are matched against requirements such as `3.x`,
//! `>= 1.17, < 2` or `1.16 || 1.17`. Versions are read leniently: a leading
//! `v` is dropped, missing minor/patch components count as zero, and a
//! Maven release qualifier (`2.16.0.Final`) is kept as build metadata.

use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Maven qualifiers that mark a release rather than a pre-release
const RELEASE_QUALIFIERS: [&str; 3] = ["Final", "RELEASE", "GA"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Unable to parse version constraint: {0}")]
    InvalidConstraint(String),
}

/// Parse a version the lenient way catalogs write them
pub fn parse_version(input: &str) -> Result<Version, ConstraintError> {
    let invalid = || ConstraintError::InvalidVersion(input.to_string());
    let trimmed = input.trim();
    let unprefixed = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let (rest, build) = match unprefixed.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (unprefixed, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let mut parts: Vec<&str> = core.split('.').collect();
    let mut build = build.map(str::to_string);
    if parts.len() == 4 && pre.is_none() && build.is_none() && RELEASE_QUALIFIERS.contains(&parts[3]) {
        build = parts.pop().map(str::to_string);
    }
    if parts.is_empty() || parts.len() > 3 {
        return Err(invalid());
    }

    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = part.parse().map_err(|_| invalid())?;
    }

    let mut version = Version::new(numbers[0], numbers[1], numbers[2]);
    if let Some(pre) = pre {
        version.pre = Prerelease::new(pre).map_err(|_| invalid())?;
    }
    if let Some(build) = build {
        version.build = BuildMetadata::new(&build).map_err(|_| invalid())?;
    }
    Ok(version)
}

/// Ordering that ignores build metadata
fn precedence(left: &Version, right: &Version) -> Ordering {
    (left.major, left.minor, left.patch, &left.pre).cmp(&(right.major, right.minor, right.patch, &right.pre))
}

/// A single comparison against one version
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    /// Exact version match, build metadata ignored
    Exact(Version),
    /// Partial version: `1` matches 1.x.y, `1.2` matches 1.2.y
    Wildcard { major: u64, minor: Option<u64> },
    NotEqual(Version),
    /// Caret range: ^1.2.3 means >=1.2.3 <2.0.0, ^0.2.3 means >=0.2.3 <0.3.0
    Caret(Version),
    /// Tilde range: ~1.2.3 means >=1.2.3 <1.3.0, ~1 means >=1.0.0 <2.0.0
    Tilde { version: Version, minor_given: bool },
    GreaterOrEqual(Version),
    LessOrEqual(Version),
    GreaterThan(Version),
    LessThan(Version),
    /// Any version (`*`, `x`)
    Any,
}

/// Numeric components written in a constraint operand, `None` for `x`/`*`/missing
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
}

impl Partial {
    fn is_complete(&self) -> bool {
        self.major.is_some() && self.minor.is_some() && self.patch.is_some()
    }
}

fn is_wildcard(part: &str) -> bool {
    matches!(part, "x" | "X" | "*")
}

/// Read an operand that may be partial or contain wildcards
fn parse_partial(input: &str) -> Result<Partial, ConstraintError> {
    let invalid = || ConstraintError::InvalidConstraint(input.to_string());
    let trimmed = input.strip_prefix('v').unwrap_or(input);
    let core = trimmed.split(['-', '+']).next().unwrap_or_default();

    let mut components = [None; 3];
    let parts: Vec<&str> = core.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(invalid());
    }
    for (slot, part) in components.iter_mut().zip(&parts) {
        if is_wildcard(part) {
            break;
        }
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        *slot = Some(part.parse().map_err(|_| invalid())?);
    }

    Ok(Partial {
        major: components[0],
        minor: components[1],
        patch: components[2],
    })
}

impl VersionConstraint {
    /// Parse one comparison such as `>=1.2`, `~3.1.0` or `2.x`
    pub fn parse(s: &str) -> Result<Self, ConstraintError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(ConstraintError::InvalidConstraint(s.to_string()));
        }
        if is_wildcard(s) {
            return Ok(VersionConstraint::Any);
        }

        let operators = ["==", "!=", ">=", "<=", "=>", "=<", "~>", "=", ">", "<", "^", "~"];
        let (operator, operand) = operators
            .iter()
            .find_map(|op| s.strip_prefix(op).map(|rest| (*op, rest.trim())))
            .unwrap_or(("", s));

        let partial = parse_partial(operand)?;
        let Some(major) = partial.major else {
            return match operator {
                "" | "=" | "==" | ">=" | "=>" => Ok(VersionConstraint::Any),
                _ => Err(ConstraintError::InvalidConstraint(s.to_string())),
            };
        };

        let version = if partial.is_complete() {
            parse_version(operand).map_err(|_| ConstraintError::InvalidConstraint(s.to_string()))?
        } else {
            Version::new(major, partial.minor.unwrap_or(0), partial.patch.unwrap_or(0))
        };

        let constraint = match operator {
            "" | "=" | "==" if partial.is_complete() => VersionConstraint::Exact(version),
            "" | "=" | "==" => VersionConstraint::Wildcard {
                major,
                minor: partial.minor,
            },
            "!=" => VersionConstraint::NotEqual(version),
            "^" => VersionConstraint::Caret(version),
            "~" | "~>" => VersionConstraint::Tilde {
                version,
                minor_given: partial.minor.is_some(),
            },
            ">=" | "=>" => VersionConstraint::GreaterOrEqual(version),
            "<" => VersionConstraint::LessThan(version),
            // `>1.2` and `<=1.2` compare against the whole 1.2.x line
            ">" if partial.is_complete() => VersionConstraint::GreaterThan(version),
            ">" => VersionConstraint::GreaterOrEqual(next_line(&partial, major)),
            "<=" | "=<" if partial.is_complete() => VersionConstraint::LessOrEqual(version),
            "<=" | "=<" => VersionConstraint::LessThan(next_line(&partial, major)),
            _ => return Err(ConstraintError::InvalidConstraint(s.to_string())),
        };
        Ok(constraint)
    }

    /// Check if a version satisfies this constraint
    pub fn satisfies(&self, version: &Version) -> bool {
        match self {
            VersionConstraint::Exact(v) => precedence(version, v) == Ordering::Equal,
            VersionConstraint::Wildcard { major, minor } => {
                version.major == *major && minor.is_none_or(|minor| version.minor == minor)
            }
            VersionConstraint::NotEqual(v) => precedence(version, v) != Ordering::Equal,
            VersionConstraint::Caret(v) => {
                let upper = if v.major > 0 {
                    Version::new(v.major + 1, 0, 0)
                } else {
                    Version::new(0, v.minor + 1, 0)
                };
                precedence(version, v).is_ge() && precedence(version, &upper).is_lt()
            }
            VersionConstraint::Tilde { version: v, minor_given } => {
                let upper = if *minor_given {
                    Version::new(v.major, v.minor + 1, 0)
                } else {
                    Version::new(v.major + 1, 0, 0)
                };
                precedence(version, v).is_ge() && precedence(version, &upper).is_lt()
            }
            VersionConstraint::GreaterOrEqual(v) => precedence(version, v).is_ge(),
            VersionConstraint::LessOrEqual(v) => precedence(version, v).is_le(),
            VersionConstraint::GreaterThan(v) => precedence(version, v).is_gt(),
            VersionConstraint::LessThan(v) => precedence(version, v).is_lt(),
            VersionConstraint::Any => true,
        }
    }

    /// Whether the constraint names a pre-release explicitly
    fn has_prerelease(&self) -> bool {
        match self {
            VersionConstraint::Exact(v)
            | VersionConstraint::NotEqual(v)
            | VersionConstraint::Caret(v)
            | VersionConstraint::Tilde { version: v, .. }
            | VersionConstraint::GreaterOrEqual(v)
            | VersionConstraint::LessOrEqual(v)
            | VersionConstraint::GreaterThan(v)
            | VersionConstraint::LessThan(v) => !v.pre.is_empty(),
            VersionConstraint::Wildcard { .. } | VersionConstraint::Any => false,
        }
    }
}

/// First version after the line a partial operand names
fn next_line(partial: &Partial, major: u64) -> Version {
    match partial.minor {
        Some(minor) => Version::new(major, minor + 1, 0),
        None => Version::new(major + 1, 0, 0),
    }
}

/// A full requirement: alternatives separated by `||`, each a conjunction of
/// comparisons separated by commas or whitespace, or a hyphen range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRequirement {
    raw: String,
    alternatives: Vec<Vec<VersionConstraint>>,
}

impl VersionRequirement {
    pub fn parse(s: &str) -> Result<Self, ConstraintError> {
        let mut alternatives = Vec::new();
        for alternative in s.split("||") {
            alternatives.push(parse_conjunction(alternative.trim())?);
        }
        Ok(Self {
            raw: s.trim().to_string(),
            alternatives,
        })
    }

    /// True when any alternative accepts `version`.
    ///
    /// A pre-release only matches an alternative that itself names a
    /// pre-release.
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|constraints| {
            if !version.pre.is_empty() && !constraints.iter().any(VersionConstraint::has_prerelease) {
                return false;
            }
            constraints.iter().all(|constraint| constraint.satisfies(version))
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_conjunction(s: &str) -> Result<Vec<VersionConstraint>, ConstraintError> {
    if s.is_empty() {
        return Err(ConstraintError::InvalidConstraint(s.to_string()));
    }

    if let Some((low, high)) = s.split_once(" - ") {
        let low = parse_partial(low.trim())?;
        let high_partial = parse_partial(high.trim())?;
        let lower = VersionConstraint::GreaterOrEqual(Version::new(
            low.major.unwrap_or(0),
            low.minor.unwrap_or(0),
            low.patch.unwrap_or(0),
        ));
        let upper = match high_partial.major {
            None => VersionConstraint::Any,
            Some(major) if high_partial.is_complete() => VersionConstraint::LessOrEqual(Version::new(
                major,
                high_partial.minor.unwrap_or(0),
                high_partial.patch.unwrap_or(0),
            )),
            Some(major) => VersionConstraint::LessThan(next_line(&high_partial, major)),
        };
        return Ok(vec![lower, upper]);
    }

    // Operators may be separated from their operand: `>= 1.2, < 2`
    let mut tokens: Vec<String> = Vec::new();
    let mut pending_operator: Option<&str> = None;
    for token in s.split([',', ' ']).map(str::trim).filter(|t| !t.is_empty()) {
        if token.bytes().all(|b| b"<>=!~^".contains(&b)) {
            pending_operator = Some(token);
            continue;
        }
        match pending_operator.take() {
            Some(operator) => tokens.push(format!("{operator}{token}")),
            None => tokens.push(token.to_string()),
        }
    }
    if let Some(operator) = pending_operator {
        return Err(ConstraintError::InvalidConstraint(operator.to_string()));
    }

    tokens.iter().map(|token| VersionConstraint::parse(token)).collect()
}

impl FromStr for VersionRequirement {
    type Err = ConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
