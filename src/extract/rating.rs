//! Age and content rating recognition across national classification systems
//!
//! The catalog is an ordered list of `(system, pattern)` pairs, matched
//! case-insensitively. Candidate positions are scanned left to right and at
//! each one the earliest declared token wins, so the leftmost token wins across
//! positions. Tokens must stand alone: `"9"` inside `"1994"` or `"M"` inside
//! `"22m"` is not a rating.

use crate::extract::aggregate::Resolver;
use crate::extract::error::ResolveError;
use crate::extract::Attribute;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// National classification system a token belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RatingSystem {
    UsTv,
    UsMpa,
    Germany,
    Japan,
    Australia,
    Russia,
    Canada,
    UnitedKingdom,
    India,
    Korea,
    France,
    Netherlands,
    Spain,
    Italy,
}

/// Ordered rating catalog. Duplicated tokens (`15`, `12`, `18`, `R18+`) are
/// kept under every system that issues them; the first declaration wins.
pub const RATING_CATALOG: &[(RatingSystem, &str)] = &[
    (RatingSystem::UsTv, r"TV-(?:Y7|Y|G|PG|14|MA)"),
    (RatingSystem::UsMpa, r"NC-17"),
    (RatingSystem::UsMpa, r"PG-13"),
    (RatingSystem::UsMpa, r"PG"),
    (RatingSystem::UsMpa, r"G"),
    (RatingSystem::UsMpa, r"R"),
    (RatingSystem::UsMpa, r"X"),
    (RatingSystem::Germany, r"FSK\s?(?:0|6|12|16|18)"),
    (RatingSystem::Japan, r"PG12"),
    (RatingSystem::Japan, r"R15\+"),
    (RatingSystem::Japan, r"R18\+"),
    (RatingSystem::Australia, r"MA15\+"),
    (RatingSystem::Australia, r"R18\+"),
    (RatingSystem::Australia, r"X18\+"),
    (RatingSystem::Australia, r"RC"),
    (RatingSystem::Australia, r"M"),
    (RatingSystem::Russia, r"0\+"),
    (RatingSystem::Russia, r"6\+"),
    (RatingSystem::Russia, r"12\+"),
    (RatingSystem::Russia, r"16\+"),
    (RatingSystem::Russia, r"18\+"),
    (RatingSystem::Canada, r"18A"),
    (RatingSystem::Canada, r"14A"),
    (RatingSystem::UnitedKingdom, r"R18"),
    (RatingSystem::UnitedKingdom, r"12A"),
    (RatingSystem::UnitedKingdom, r"18"),
    (RatingSystem::UnitedKingdom, r"15"),
    (RatingSystem::UnitedKingdom, r"12"),
    (RatingSystem::UnitedKingdom, r"U"),
    (RatingSystem::India, r"UA"),
    (RatingSystem::India, r"A"),
    (RatingSystem::India, r"S"),
    (RatingSystem::Korea, r"All"),
    (RatingSystem::Korea, r"15"),
    (RatingSystem::France, r"10"),
    (RatingSystem::France, r"16"),
    (RatingSystem::Netherlands, r"AL"),
    (RatingSystem::Netherlands, r"6"),
    (RatingSystem::Netherlands, r"9"),
    (RatingSystem::Spain, r"TP"),
    (RatingSystem::Spain, r"7"),
    (RatingSystem::Italy, r"T"),
    (RatingSystem::Italy, r"VM14"),
    (RatingSystem::Italy, r"VM18"),
];

// One anchored pattern per catalog entry, in catalog order. The token is
// group 1 and may not be followed by a letter, a digit or `+`; the trailing
// character is only inspected, the scan never skips past it.
static RATING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    RATING_CATALOG
        .iter()
        .map(|(_, pattern)| Regex::new(&format!(r"(?i)^({pattern})(?:$|[^[:alnum:]+])")).unwrap())
        .collect()
});

/// A rating token found in a fragment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingMatch {
    /// The token exactly as it appears in the fragment
    pub token: String,

    /// The first system in catalog order that declares the token
    pub system: RatingSystem,
}

// Bare numeric tokens followed by one of these are counts, not ratings.
static QUANTITY_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:episodes?|eps?|hours?|h|minutes?|min|m)\b").unwrap()
});

/// Positions a token may start at: the start of the fragment or right after
/// a character that is neither a letter nor a digit
fn candidate_starts(fragment: &str) -> impl Iterator<Item = usize> + '_ {
    let mut previous: Option<char> = None;
    fragment.char_indices().filter_map(move |(start, c)| {
        let standalone = previous.is_none_or(|p| !p.is_ascii_alphanumeric());
        previous = Some(c);
        standalone.then_some(start)
    })
}

/// Return the first rating token in `fragment`, if any.
pub fn match_rating(fragment: &str) -> Option<RatingMatch> {
    candidate_starts(fragment).find_map(|start| {
        let rest = &fragment[start..];
        RATING_PATTERNS.iter().enumerate().find_map(|(index, pattern)| {
            let token = pattern.captures(rest)?.get(1)?.as_str();
            let is_numeric = token.bytes().all(|b| b.is_ascii_digit());
            if is_numeric && QUANTITY_UNIT.is_match(&rest[token.len()..]) {
                return None;
            }
            Some(RatingMatch {
                token: token.to_string(),
                system: RATING_CATALOG[index].0,
            })
        })
    })
}

/// Resolves [`Attribute::AgeRating`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingResolver;

impl Resolver for RatingResolver {
    fn component(&self) -> &'static str {
        "rating"
    }

    fn attribute(&self) -> Attribute {
        Attribute::AgeRating
    }

    fn resolve(&self, fragment: &str) -> Result<Option<String>, ResolveError> {
        Ok(match_rating(fragment).map(|found| found.token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(fragment: &str) -> Option<String> {
        match_rating(fragment).map(|found| found.token)
    }

    #[test]
    fn test_us_tokens() {
        assert_eq!(token("TV-MA").as_deref(), Some("TV-MA"));
        assert_eq!(token("TV-Y7").as_deref(), Some("TV-Y7"));
        assert_eq!(token("PG-13").as_deref(), Some("PG-13"));
        assert_eq!(token("NC-17").as_deref(), Some("NC-17"));
        assert_eq!(token("PG").as_deref(), Some("PG"));
        assert_eq!(token("R").as_deref(), Some("R"));
    }

    #[test]
    fn test_case_insensitive_keeps_source_text() {
        assert_eq!(token("tv-14").as_deref(), Some("tv-14"));
        assert_eq!(token("fsk 16").as_deref(), Some("fsk 16"));
    }

    #[test]
    fn test_international_tokens() {
        let found = match_rating("FSK 12").unwrap();
        assert_eq!(found.system, RatingSystem::Germany);

        let found = match_rating("MA15+").unwrap();
        assert_eq!(found.token, "MA15+");
        assert_eq!(found.system, RatingSystem::Australia);

        let found = match_rating("16+").unwrap();
        assert_eq!(found.system, RatingSystem::Russia);

        let found = match_rating("14A").unwrap();
        assert_eq!(found.system, RatingSystem::Canada);

        let found = match_rating("12A").unwrap();
        assert_eq!(found.system, RatingSystem::UnitedKingdom);

        let found = match_rating("UA").unwrap();
        assert_eq!(found.system, RatingSystem::India);

        let found = match_rating("VM18").unwrap();
        assert_eq!(found.system, RatingSystem::Italy);
    }

    #[test]
    fn test_ambiguous_tokens_resolve_by_catalog_order() {
        // `R18+` is issued by Japan and Australia
        assert_eq!(match_rating("R18+").unwrap().system, RatingSystem::Japan);
        // `15` is issued by the UK and Korea
        assert_eq!(match_rating("15").unwrap().system, RatingSystem::UnitedKingdom);
        assert_eq!(match_rating("18").unwrap().system, RatingSystem::UnitedKingdom);
    }

    #[test]
    fn test_first_positional_match_only() {
        assert_eq!(token("PG-13 / TV-MA").as_deref(), Some("PG-13"));
        assert_eq!(token("Rated TV-PG in the US, 12 in the UK").as_deref(), Some("TV-PG"));
    }

    #[test]
    fn test_tokens_must_stand_alone() {
        assert_eq!(token("1994"), None);
        assert_eq!(token("2h 22m"), None);
        assert_eq!(token("TV Series"), None);
        assert_eq!(token("24 eps"), None);
        assert_eq!(token("2011-2019"), None);
        assert_eq!(token(""), None);
    }

    #[test]
    fn test_counts_are_not_ratings() {
        assert_eq!(token("10 eps"), None);
        assert_eq!(token("12 episodes"), None);
        assert_eq!(token("15 min"), None);
        assert_eq!(token("10 eps, TV-PG").as_deref(), Some("TV-PG"));
        assert_eq!(token("12").as_deref(), Some("12"));
    }

    #[test]
    fn test_every_catalog_token_is_matchable() {
        use RatingSystem::*;

        // Each literal token with the first system that declares it
        let expected = [
            ("TV-Y7", UsTv),
            ("TV-Y", UsTv),
            ("TV-G", UsTv),
            ("TV-PG", UsTv),
            ("TV-14", UsTv),
            ("TV-MA", UsTv),
            ("NC-17", UsMpa),
            ("PG-13", UsMpa),
            ("PG", UsMpa),
            ("G", UsMpa),
            ("R", UsMpa),
            ("X", UsMpa),
            ("FSK 0", Germany),
            ("FSK6", Germany),
            ("FSK 12", Germany),
            ("FSK 16", Germany),
            ("FSK 18", Germany),
            ("PG12", Japan),
            ("R15+", Japan),
            ("R18+", Japan),
            ("MA15+", Australia),
            ("X18+", Australia),
            ("RC", Australia),
            ("M", Australia),
            ("0+", Russia),
            ("6+", Russia),
            ("12+", Russia),
            ("16+", Russia),
            ("18+", Russia),
            ("18A", Canada),
            ("14A", Canada),
            ("R18", UnitedKingdom),
            ("12A", UnitedKingdom),
            ("18", UnitedKingdom),
            ("15", UnitedKingdom),
            ("12", UnitedKingdom),
            ("U", UnitedKingdom),
            ("UA", India),
            ("A", India),
            ("S", India),
            ("All", Korea),
            ("10", France),
            ("16", France),
            ("AL", Netherlands),
            ("6", Netherlands),
            ("9", Netherlands),
            ("TP", Spain),
            ("7", Spain),
            ("T", Italy),
            ("VM14", Italy),
            ("VM18", Italy),
        ];

        for (literal, system) in expected {
            let found = match_rating(literal);
            assert_eq!(
                found,
                Some(RatingMatch {
                    token: literal.to_string(),
                    system,
                }),
                "{literal}"
            );

            // Still found when surrounded by other text
            let framed = format!("Rated {literal}, 2h");
            assert_eq!(token(&framed).as_deref(), Some(literal), "{framed}");
        }
    }

    #[test]
    fn test_rejected_count_does_not_hide_next_token() {
        let found = match_rating("15 M").unwrap();
        assert_eq!(found.token, "M");
        assert_eq!(found.system, RatingSystem::Australia);

        assert_eq!(token("10 eps R").as_deref(), Some("R"));
        assert_eq!(token("12 min/PG").as_deref(), Some("PG"));
    }

    #[test]
    fn test_resolver_reports_token() {
        let resolved = RatingResolver.resolve("TV-MA").unwrap();
        assert_eq!(resolved.as_deref(), Some("TV-MA"));
        assert_eq!(RatingResolver.resolve("Movie").unwrap(), None);
    }
}
