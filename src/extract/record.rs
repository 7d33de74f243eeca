//! Record assembly for one listing item

use crate::extract::aggregate::aggregate;
use crate::extract::error::Diagnostic;
use crate::extract::normalize::{clean_rank, remove_number_prefix, remove_parentheses, strip_text};
use crate::extract::{Attribute, AttributeSet, ExtractionContext, ListingItem, NormalizedRecord};
use std::collections::BTreeMap;
use tracing::warn;

/// Field of a [`NormalizedRecord`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Category,
    Rank,
    OriginalTitle,
    ReleaseYear,
    Runtime,
    AgeRating,
    EpisodesCount,
    TitleType,
    RatingStars,
    Votecount,
}

impl Field {
    /// All fields in record order
    pub const ALL: [Field; 10] = [
        Field::Category,
        Field::Rank,
        Field::OriginalTitle,
        Field::ReleaseYear,
        Field::Runtime,
        Field::AgeRating,
        Field::EpisodesCount,
        Field::TitleType,
        Field::RatingStars,
        Field::Votecount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Category => "category",
            Field::Rank => "rank",
            Field::OriginalTitle => "original_title",
            Field::ReleaseYear => "release_year",
            Field::Runtime => "runtime",
            Field::AgeRating => "age_rating",
            Field::EpisodesCount => "episodes_count",
            Field::TitleType => "title_type",
            Field::RatingStars => "rating_stars",
            Field::Votecount => "votecount",
        }
    }

    /// Cleaning applied to every value added to this field
    fn normalize(self, raw: &str) -> String {
        match self {
            Field::Rank => clean_rank(raw),
            Field::OriginalTitle => remove_number_prefix(raw),
            Field::Votecount => remove_parentheses(raw),
            _ => strip_text(Some(raw)).unwrap_or_default().to_string(),
        }
    }
}

impl From<Attribute> for Field {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::ReleaseYear => Field::ReleaseYear,
            Attribute::Runtime => Field::Runtime,
            Attribute::AgeRating => Field::AgeRating,
            Attribute::EpisodesCount => Field::EpisodesCount,
            Attribute::TitleType => Field::TitleType,
        }
    }
}

/// Collects values for one record.
///
/// Each added value is cleaned by its field's normalizer; values that clean
/// down to nothing are ignored, otherwise the last one added wins.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    values: BTreeMap<Field, String>,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, field: Field, raw: impl AsRef<str>) -> &mut Self {
        let value = field.normalize(raw.as_ref());
        if !value.is_empty() {
            self.values.insert(field, value);
        }
        self
    }

    pub fn add_attributes(&mut self, attributes: &AttributeSet) -> &mut Self {
        for (attribute, value) in attributes.iter() {
            self.add_value(attribute.into(), value);
        }
        self
    }

    pub fn build(mut self) -> NormalizedRecord {
        let mut take = |field: Field| self.values.remove(&field).unwrap_or_default();
        NormalizedRecord {
            category: take(Field::Category),
            rank: take(Field::Rank),
            original_title: take(Field::OriginalTitle),
            release_year: take(Field::ReleaseYear),
            runtime: take(Field::Runtime),
            age_rating: take(Field::AgeRating),
            episodes_count: take(Field::EpisodesCount),
            title_type: take(Field::TitleType),
            rating_stars: take(Field::RatingStars),
            votecount: take(Field::Votecount),
        }
    }
}

/// A record together with the resolver failures met while building it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRecord {
    pub record: NormalizedRecord,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the normalized record for one listing item.
///
/// Resolver failures are logged and returned, never raised.
pub fn build_record(context: &ExtractionContext, item: &ListingItem) -> BuiltRecord {
    let mut builder = RecordBuilder::new();

    builder.add_value(Field::Category, &context.category);
    if context.with_rank {
        builder.add_value(Field::Rank, item.rank.as_deref().unwrap_or_default());
    }
    builder.add_value(Field::OriginalTitle, item.title.as_deref().unwrap_or_default());

    let aggregation = aggregate(context.class, &item.metadata);
    builder.add_attributes(&aggregation.attributes);

    builder.add_value(Field::RatingStars, item.rating.as_deref().unwrap_or_default());
    builder.add_value(Field::Votecount, item.votes.as_deref().unwrap_or_default());

    let record = builder.build();

    let item_id = (!record.original_title.is_empty()).then(|| record.original_title.clone());
    let diagnostics: Vec<Diagnostic> = aggregation
        .diagnostics
        .into_iter()
        .map(|diagnostic| Diagnostic {
            item: item_id.clone(),
            ..diagnostic
        })
        .collect();

    for diagnostic in &diagnostics {
        warn!(
            component = diagnostic.component,
            item = diagnostic.item.as_deref().unwrap_or("<unknown>"),
            category = %context.category,
            cause = %diagnostic.cause,
            "resolver failed on {:?}",
            diagnostic.fragment
        );
    }

    BuiltRecord {
        record,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ContentClass;

    fn movie_context(category: &str, with_rank: bool) -> ExtractionContext {
        ExtractionContext {
            category: category.to_string(),
            class: ContentClass::Movie,
            with_rank,
        }
    }

    #[test]
    fn test_top_movie_record() {
        let item = ListingItem {
            rank: Some("1".to_string()),
            title: Some("1. The Shawshank Redemption".to_string()),
            metadata: vec!["1994".to_string(), "2h 22m".to_string(), "R".to_string()],
            rating: None,
            votes: None,
        };

        let built = build_record(&movie_context("top_250_movies", false), &item);

        assert!(built.diagnostics.is_empty());
        assert_eq!(
            built.record,
            NormalizedRecord {
                category: "top_250_movies".to_string(),
                rank: String::new(),
                original_title: "The Shawshank Redemption".to_string(),
                release_year: "1994".to_string(),
                runtime: "2h 22m".to_string(),
                age_rating: "R".to_string(),
                episodes_count: String::new(),
                title_type: String::new(),
                rating_stars: String::new(),
                votecount: String::new(),
            }
        );
    }

    #[test]
    fn test_popular_tv_record() {
        let context = ExtractionContext {
            category: "most_popular_tv".to_string(),
            class: ContentClass::Tv,
            with_rank: true,
        };
        let item = ListingItem {
            rank: Some("3".to_string()),
            title: Some("Game of Thrones".to_string()),
            metadata: vec![
                "2011-2019".to_string(),
                "TV Series".to_string(),
                "TV-MA".to_string(),
            ],
            rating: Some(" 9.2 ".to_string()),
            votes: Some("\u{a0}(2.4M)".to_string()),
        };

        let record = build_record(&context, &item).record;

        assert_eq!(record.rank, "3");
        assert_eq!(record.release_year, "2011-2019");
        assert_eq!(record.title_type, "TV Series");
        assert_eq!(record.age_rating, "TV-MA");
        assert_eq!(record.runtime, "");
        assert_eq!(record.rating_stars, "9.2");
        assert_eq!(record.votecount, "2.4M");
    }

    #[test]
    fn test_missing_inputs_become_empty_fields() {
        let built = build_record(&movie_context("most_popular_movies", true), &ListingItem::default());

        for field in Field::ALL {
            if field == Field::Category {
                assert_eq!(built.record.get(field), "most_popular_movies");
            } else {
                assert_eq!(built.record.get(field), "", "{}", field.as_str());
            }
        }
    }

    #[test]
    fn test_last_non_empty_value_wins() {
        let mut builder = RecordBuilder::new();
        builder
            .add_value(Field::RatingStars, "8.1")
            .add_value(Field::RatingStars, "  ")
            .add_value(Field::RatingStars, "8.4")
            .add_value(Field::RatingStars, "");

        assert_eq!(builder.build().rating_stars, "8.4");
    }

    #[test]
    fn test_diagnostics_carry_item_title() {
        let item = ListingItem {
            title: Some("4. Broken".to_string()),
            metadata: vec!["99999999999h 5m".to_string(), "PG".to_string()],
            ..ListingItem::default()
        };

        let built = build_record(&movie_context("top_250_movies", false), &item);

        assert_eq!(built.record.age_rating, "PG");
        assert_eq!(built.diagnostics.len(), 1);
        assert_eq!(built.diagnostics[0].component, "runtime");
        assert_eq!(built.diagnostics[0].item.as_deref(), Some("Broken"));
    }
}
