//! Release format tags such as "TV Series" or "Video Game"

use crate::extract::aggregate::Resolver;
use crate::extract::error::ResolveError;
use crate::extract::Attribute;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Release format of a title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TitleType {
    TvMiniSeries,
    TvSeries,
    TvMovie,
    TvSpecial,
    VideoGame,
    Video,
    PodcastSeries,
    Movie,
}

impl TitleType {
    /// Canonical label
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleType::TvMiniSeries => "TV Mini Series",
            TitleType::TvSeries => "TV Series",
            TitleType::TvMovie => "TV Movie",
            TitleType::TvSpecial => "TV Special",
            TitleType::VideoGame => "Video Game",
            TitleType::Video => "Video",
            TitleType::PodcastSeries => "Podcast Series",
            TitleType::Movie => "Movie",
        }
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format vocabulary, most specific first
pub const TITLE_TYPE_CATALOG: &[(TitleType, &str)] = &[
    (TitleType::TvMiniSeries, r"TV\s+Mini\s+Series"),
    (TitleType::TvSeries, r"TV\s+Series"),
    (TitleType::TvMovie, r"TV\s+Movie"),
    (TitleType::TvSpecial, r"TV\s+Special"),
    (TitleType::VideoGame, r"Video\s+Game"),
    (TitleType::Video, r"Video"),
    (TitleType::PodcastSeries, r"Podcast\s+Series"),
    (TitleType::Movie, r"Movie"),
];

static TITLE_TYPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives = TITLE_TYPE_CATALOG
        .iter()
        .map(|(_, pattern)| format!("({pattern})"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternatives})\b")).unwrap()
});

/// First release format mentioned in `fragment`
pub fn match_title_type(fragment: &str) -> Option<TitleType> {
    let caps = TITLE_TYPE_PATTERN.captures(fragment)?;
    TITLE_TYPE_CATALOG
        .iter()
        .enumerate()
        .find_map(|(index, (title_type, _))| caps.get(index + 1).map(|_| *title_type))
}

/// Resolves [`Attribute::TitleType`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleTypeResolver;

impl Resolver for TitleTypeResolver {
    fn component(&self) -> &'static str {
        "title_type"
    }

    fn attribute(&self) -> Attribute {
        Attribute::TitleType
    }

    fn resolve(&self, fragment: &str) -> Result<Option<String>, ResolveError> {
        Ok(match_title_type(fragment).map(|title_type| title_type.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary() {
        assert_eq!(match_title_type("TV Mini Series"), Some(TitleType::TvMiniSeries));
        assert_eq!(match_title_type("TV Series"), Some(TitleType::TvSeries));
        assert_eq!(match_title_type("TV Movie"), Some(TitleType::TvMovie));
        assert_eq!(match_title_type("TV Special"), Some(TitleType::TvSpecial));
        assert_eq!(match_title_type("Video Game"), Some(TitleType::VideoGame));
        assert_eq!(match_title_type("Video"), Some(TitleType::Video));
        assert_eq!(match_title_type("Podcast Series"), Some(TitleType::PodcastSeries));
        assert_eq!(match_title_type("Movie"), Some(TitleType::Movie));
    }

    #[test]
    fn test_specific_before_general() {
        // "TV Movie" must not collapse into "Movie"
        assert_eq!(match_title_type("TV Movie"), Some(TitleType::TvMovie));
        assert_eq!(match_title_type("Video Game"), Some(TitleType::VideoGame));
    }

    #[test]
    fn test_canonical_output() {
        let resolved = TitleTypeResolver.resolve("tv  mini series").unwrap();
        assert_eq!(resolved.as_deref(), Some("TV Mini Series"));
    }

    #[test]
    fn test_whole_words_only() {
        assert_eq!(match_title_type("Movies"), None);
        assert_eq!(match_title_type("Videography"), None);
        assert_eq!(match_title_type("2011-2019"), None);
        assert_eq!(match_title_type(""), None);
    }
}
