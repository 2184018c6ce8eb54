//! Library version numbers and their `nom` parser.
//!
//! Accepts `MAJOR`, `MAJOR.MINOR` or `MAJOR.MINOR.PATCH`, optionally
//! prefixed with `v`. Missing components are zero.
//!
//! In YAML and JSON a version is a string (`"3.2"`) or a bare integer (`3`).
//! Bare decimals such as `3.2` are rejected: a float cannot tell `3.1` from
//! `3.10`, so those must be quoted.

use std::fmt;
use std::str::FromStr;

use nom::{
    IResult, Parser,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt},
    sequence::preceded,
};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// A numeric `major.minor.patch` version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct Version {
    /// Major component.
    pub major: u64,
    /// Minor component.
    pub minor: u64,
    /// Patch component.
    pub patch: u64,
}

impl Version {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parses a version string.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidVersion`] if the input is not one to three
    /// dot-separated non-negative integers.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        match all_consuming(version).parse(trimmed) {
            Ok((_, (major, minor, patch))) => Ok(Self::new(
                major,
                minor.unwrap_or(0),
                patch.unwrap_or(0),
            )),
            Err(e) => Err(PlanError::InvalidVersion {
                input: input.to_string(),
                reason: format!("expected MAJOR[.MINOR[.PATCH]] ({e})"),
            }),
        }
    }
}

fn number(input: &str) -> IResult<&str, u64> {
    map_res(digit1, str::parse::<u64>).parse(input)
}

fn version(input: &str) -> IResult<&str, (u64, Option<u64>, Option<u64>)> {
    let (input, _) = opt(char('v')).parse(input)?;
    (
        number,
        opt(preceded(char('.'), number)),
        opt(preceded(char('.'), number)),
    )
        .parse(input)
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = PlanError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(VersionVisitor)
    }
}

struct VersionVisitor;

impl Visitor<'_> for VersionVisitor {
    type Value = Version;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a version string such as \"3.2.1\" or an integer major version")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Version, E> {
        Version::parse(value).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Version, E> {
        Ok(Version::new(value, 0, 0))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<Version, E> {
        u64::try_from(value)
            .map(|major| Version::new(major, 0, 0))
            .map_err(|_| E::custom(format!("invalid version {value}: must not be negative")))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<Version, E> {
        Err(E::custom(format!("invalid version {value}: quote it, e.g. \"{value}\"")))
    }
}

impl From<Version> for String {
    fn from(value: Version) -> Self {
        value.to_string()
    }
}
