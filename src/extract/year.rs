//! Release year and year range disambiguation
//!
//! A fragment is read as one of three shapes, in priority order:
//!
//! 1. a bare run of digits (`"1994"`),
//! 2. a closed range with a `-`, `_` or `–` separator (`"2011-2019"`),
//! 3. for series only, an open range with an optional partial end (`"2015-"`).
//!
//! Every year has to fall inside the plausibility window and a range must not
//! run backwards. Anything else contributes nothing.

use crate::extract::aggregate::Resolver;
use crate::extract::error::ResolveError;
use crate::extract::Attribute;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Earliest plausible release year
pub const MIN_YEAR: u32 = 1900;

/// Latest plausible release year
pub const MAX_YEAR: u32 = 2050;

static CLOSED_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})\s*[-_–]\s*([0-9]{4})$").unwrap());

static OPEN_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})(?:\s*[-_–]\s*([0-9]{0,4}))?$").unwrap());

/// Which year shapes a resolver accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearMode {
    /// Single years and closed ranges (movies)
    Closed,
    /// Also open-ended ranges of running series (TV)
    OpenEnded,
}

/// A resolved release year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseYear {
    Single(u32),
    Range { start: u32, end: u32 },
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseYear::Single(year) => write!(f, "{year}"),
            ReleaseYear::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

/// Whether `year` lies inside the plausibility window
pub fn in_window(year: u32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

fn parse_year(digits: &str) -> Result<u32, ResolveError> {
    digits
        .parse()
        .map_err(|_| ResolveError::NumericOverflow(digits.to_string()))
}

fn closed_range(start: u32, end: u32) -> Option<ReleaseYear> {
    (in_window(start) && in_window(end) && start <= end).then_some(ReleaseYear::Range { start, end })
}

/// Resolve `fragment` as a release year or range.
///
/// An all-digit fragment too long for a `u32` is reported as an error rather
/// than silently rejected.
pub fn resolve_year(fragment: &str, mode: YearMode) -> Result<Option<ReleaseYear>, ResolveError> {
    let fragment = fragment.trim();

    if !fragment.is_empty() && fragment.bytes().all(|b| b.is_ascii_digit()) {
        // More than four digits can never land in the window
        if fragment.len() > 4 {
            return Ok(None);
        }
        let year = parse_year(fragment)?;
        return Ok(in_window(year).then_some(ReleaseYear::Single(year)));
    }

    if let Some(caps) = CLOSED_RANGE.captures(fragment) {
        let start = parse_year(&caps[1])?;
        let end = parse_year(&caps[2])?;
        return Ok(closed_range(start, end));
    }

    if mode == YearMode::OpenEnded {
        if let Some(caps) = OPEN_RANGE.captures(fragment) {
            let start = parse_year(&caps[1])?;
            // A complete end year is held to the range rules; a missing or
            // partial one means the series is still running.
            return match caps.get(2).map(|m| m.as_str()) {
                Some(end) if end.len() == 4 => Ok(closed_range(start, parse_year(end)?)),
                _ => Ok(in_window(start).then_some(ReleaseYear::Single(start))),
            };
        }
    }

    Ok(None)
}

/// Resolves [`Attribute::ReleaseYear`]
#[derive(Debug, Clone, Copy)]
pub struct YearResolver {
    mode: YearMode,
}

impl YearResolver {
    /// Movie flavour: single years and closed ranges
    pub const CLOSED: YearResolver = YearResolver {
        mode: YearMode::Closed,
    };

    /// TV flavour: additionally accepts open-ended ranges
    pub const OPEN_ENDED: YearResolver = YearResolver {
        mode: YearMode::OpenEnded,
    };
}

impl Resolver for YearResolver {
    fn component(&self) -> &'static str {
        "year"
    }

    fn attribute(&self) -> Attribute {
        Attribute::ReleaseYear
    }

    fn resolve(&self, fragment: &str) -> Result<Option<String>, ResolveError> {
        Ok(resolve_year(fragment, self.mode)?.map(|year| year.to_string()))
    }
}
