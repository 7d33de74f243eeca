//! # Extraction and Normalization Engine
//!
//! Turns the loosely structured text of one chart listing into a typed,
//! canonical record. The engine is pure and synchronous: it sees only the text
//! fragments handed to it and keeps no state between items, so callers are free
//! to process items in any order or in parallel.
//!
//! ## Key Components
//!
//! - Text normalizers (`normalize`): whitespace, enumeration prefixes, parentheses, ranks
//! - Resolvers: ratings, years and ranges, runtimes, episode counts, release formats
//! - `aggregate`: applies the resolvers of a content class over one item's fragments
//! - `RecordBuilder` / `build_record`: assembles the ten-field `NormalizedRecord`
//!
//! Resolver failures never escape an item; they are returned as [`Diagnostic`]s
//! next to a best-effort record.

mod aggregate;
mod episodes;
mod error;
pub mod normalize;
mod rating;
mod record;
mod runtime;
mod title_type;
mod year;

pub use aggregate::{Aggregation, Resolver, aggregate};
pub use episodes::{EpisodeResolver, parse_episode_count};
pub use error::{Diagnostic, ResolveError};
pub use rating::{RATING_CATALOG, RatingMatch, RatingResolver, RatingSystem, match_rating};
pub use record::{BuiltRecord, Field, RecordBuilder, build_record};
pub use runtime::{Runtime, RuntimeResolver, parse_runtime};
pub use title_type::{TITLE_TYPE_CATALOG, TitleType, TitleTypeResolver, match_title_type};
pub use year::{MAX_YEAR, MIN_YEAR, ReleaseYear, YearMode, YearResolver, in_window, resolve_year};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Kind of title a chart lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentClass {
    Movie,
    Tv,
}

/// Metadata attribute produced by a resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    ReleaseYear,
    Runtime,
    AgeRating,
    EpisodesCount,
    TitleType,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::ReleaseYear => "release_year",
            Attribute::Runtime => "runtime",
            Attribute::AgeRating => "age_rating",
            Attribute::EpisodesCount => "episodes_count",
            Attribute::TitleType => "title_type",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Attributes found for one item. Setting a key again replaces its value;
/// a missing key means nothing was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AttributeSet(BTreeMap<Attribute, String>);

impl AttributeSet {
    pub fn set(&mut self, attribute: Attribute, value: impl Into<String>) {
        self.0.insert(attribute, value.into());
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.0.get(&attribute).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &str)> {
        self.0.iter().map(|(attribute, value)| (*attribute, value.as_str()))
    }
}

/// Raw text of one listing item as delivered by the page traversal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingItem {
    /// Ranking label, e.g. `"3"` on popularity charts
    pub rank: Option<String>,

    /// Title heading, possibly prefixed with `"12. "`
    pub title: Option<String>,

    /// Metadata fragments in source order
    pub metadata: Vec<String>,

    /// Rating score, e.g. `"9.3"`
    pub rating: Option<String>,

    /// Vote count, e.g. `"(3M)"`
    pub votes: Option<String>,
}

/// How the items of one chart are interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionContext {
    /// Category label stored with every record
    pub category: String,

    /// Selects the movie or TV resolvers
    pub class: ContentClass,

    /// Whether the chart carries a meaningful rank label
    pub with_rank: bool,
}

/// Final per-item output. Every field is present; unresolved ones are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub category: String,
    pub rank: String,
    pub original_title: String,
    pub release_year: String,
    pub runtime: String,
    pub age_rating: String,
    pub episodes_count: String,
    pub title_type: String,
    pub rating_stars: String,
    pub votecount: String,
}

impl NormalizedRecord {
    /// Value of `field`
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Category => &self.category,
            Field::Rank => &self.rank,
            Field::OriginalTitle => &self.original_title,
            Field::ReleaseYear => &self.release_year,
            Field::Runtime => &self.runtime,
            Field::AgeRating => &self.age_rating,
            Field::EpisodesCount => &self.episodes_count,
            Field::TitleType => &self.title_type,
            Field::RatingStars => &self.rating_stars,
            Field::Votecount => &self.votecount,
        }
    }
}
