//! Runtime parsing: `"2h 15m"`, `"45 min"`, `"1 hour"` and friends

use crate::extract::aggregate::Resolver;
use crate::extract::error::ResolveError;
use crate::extract::Attribute;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static RUNTIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:([0-9]+)\s*h(?:ours?)?)?\s*(?:([0-9]+)\s*m(?:in(?:utes)?)?)?$").unwrap()
});

/// Hour and minute parts of a runtime; at least one is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Runtime {
    pub hours: Option<u32>,
    pub minutes: Option<u32>,
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hours, self.minutes) {
            (Some(h), Some(m)) => write!(f, "{h}h {m}m"),
            (Some(h), None) => write!(f, "{h}h"),
            (None, Some(m)) => write!(f, "{m}m"),
            (None, None) => Ok(()),
        }
    }
}

fn parse_part(digits: Option<regex::Match<'_>>) -> Result<Option<u32>, ResolveError> {
    digits
        .map(|m| {
            m.as_str()
                .parse()
                .map_err(|_| ResolveError::NumericOverflow(m.as_str().to_string()))
        })
        .transpose()
}

/// Parse a whole fragment as a runtime.
pub fn parse_runtime(fragment: &str) -> Result<Option<Runtime>, ResolveError> {
    let Some(caps) = RUNTIME_PATTERN.captures(fragment.trim()) else {
        return Ok(None);
    };

    let runtime = Runtime {
        hours: parse_part(caps.get(1))?,
        minutes: parse_part(caps.get(2))?,
    };

    if runtime.hours.is_none() && runtime.minutes.is_none() {
        return Ok(None);
    }
    Ok(Some(runtime))
}

/// Resolves [`Attribute::Runtime`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RuntimeResolver;

impl Resolver for RuntimeResolver {
    fn component(&self) -> &'static str {
        "runtime"
    }

    fn attribute(&self) -> Attribute {
        Attribute::Runtime
    }

    fn resolve(&self, fragment: &str) -> Result<Option<String>, ResolveError> {
        Ok(parse_runtime(fragment)?.map(|runtime| runtime.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(fragment: &str) -> Option<String> {
        RuntimeResolver.resolve(fragment).unwrap()
    }

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(resolve("2h 15m").as_deref(), Some("2h 15m"));
        assert_eq!(resolve("2h15m").as_deref(), Some("2h 15m"));
        assert_eq!(resolve("2 hours 15 minutes").as_deref(), Some("2h 15m"));
        assert_eq!(resolve("1 Hour 5 Min").as_deref(), Some("1h 5m"));
    }

    #[test]
    fn test_single_part() {
        assert_eq!(resolve("45 min").as_deref(), Some("45m"));
        assert_eq!(resolve("3h").as_deref(), Some("3h"));
        assert_eq!(resolve("90m").as_deref(), Some("90m"));
    }

    #[test]
    fn test_non_runtimes() {
        assert_eq!(resolve("abc"), None);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("1994"), None);
        assert_eq!(resolve("PG-13"), None);
        assert_eq!(resolve("24 eps"), None);
        assert_eq!(resolve("TV Movie"), None);
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(RuntimeResolver.resolve("99999999999h").is_err());
    }
}
