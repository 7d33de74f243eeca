//! Episode counts such as `"24 episodes"` or `"8 eps"`

use crate::extract::aggregate::Resolver;
use crate::extract::error::ResolveError;
use crate::extract::Attribute;
use regex::Regex;
use std::sync::LazyLock;

static EPISODES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([0-9]+)\s*(?:episodes?|eps?)\b").unwrap());

/// Find an episode count anywhere in `fragment`.
pub fn parse_episode_count(fragment: &str) -> Result<Option<u64>, ResolveError> {
    let Some(caps) = EPISODES_PATTERN.captures(fragment) else {
        return Ok(None);
    };
    let digits = &caps[1];
    digits
        .parse()
        .map(Some)
        .map_err(|_| ResolveError::NumericOverflow(digits.to_string()))
}

/// Resolves [`Attribute::EpisodesCount`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EpisodeResolver;

impl Resolver for EpisodeResolver {
    fn component(&self) -> &'static str {
        "episodes"
    }

    fn attribute(&self) -> Attribute {
        Attribute::EpisodesCount
    }

    fn resolve(&self, fragment: &str) -> Result<Option<String>, ResolveError> {
        Ok(parse_episode_count(fragment)?.map(|count| count.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_counts() {
        assert_eq!(parse_episode_count("24 episodes").unwrap(), Some(24));
        assert_eq!(parse_episode_count("3 eps").unwrap(), Some(3));
        assert_eq!(parse_episode_count("1 episode").unwrap(), Some(1));
        assert_eq!(parse_episode_count("62eps").unwrap(), Some(62));
        assert_eq!(parse_episode_count("10 Ep").unwrap(), Some(10));
        assert_eq!(parse_episode_count("Total: 73 EPISODES").unwrap(), Some(73));
    }

    #[test]
    fn test_non_counts() {
        assert_eq!(parse_episode_count("season 2").unwrap(), None);
        assert_eq!(parse_episode_count("2 epic seasons").unwrap(), None);
        assert_eq!(parse_episode_count("TV Series").unwrap(), None);
        assert_eq!(parse_episode_count("").unwrap(), None);
    }

    #[test]
    fn test_resolver_output() {
        assert_eq!(EpisodeResolver.resolve("08 eps").unwrap().as_deref(), Some("8"));
        assert!(EpisodeResolver.resolve("123456789012345678901234 eps").is_err());
    }
}
