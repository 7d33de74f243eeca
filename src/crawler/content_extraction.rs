//! Listing traversal for chart pages
//!
//! Selects the listing items of a chart page and hands each one's raw text
//! fragments to the extraction engine.

use crate::crawler::error::CrawlError;
use crate::extract::ListingItem;
use scraper::{ElementRef, Html, Selector};

/// CSS selector for one listing item
pub const ITEM_SELECTOR: &str = r#"li[class*="metadata-list-summary-item"]"#;
/// CSS selector for the rank label within an item
pub const RANK_SELECTOR: &str = r#"div[class*="meter-const-ranking"][class*="meter-title-header"]"#;
/// CSS selector for the title heading within an item
pub const TITLE_SELECTOR: &str = r#"h3[class*="title__text"][class*="title__text--reduced"]"#;
/// CSS selector for the metadata fragments within an item
pub const METADATA_SELECTOR: &str = r#"span[class*="title-metadata"]"#;
/// CSS selector for the rating score within an item
pub const RATING_SELECTOR: &str = r#"span[class*="rating-star--rating"]"#;
/// CSS selector for the vote count within an item
pub const VOTES_SELECTOR: &str = r#"span[class*="rating-star--voteCount"]"#;

struct ListingSelectors {
    item: Selector,
    rank: Selector,
    title: Selector,
    metadata: Selector,
    rating: Selector,
    votes: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self, CrawlError> {
        Ok(Self {
            item: parse_selector(ITEM_SELECTOR)?,
            rank: parse_selector(RANK_SELECTOR)?,
            title: parse_selector(TITLE_SELECTOR)?,
            metadata: parse_selector(METADATA_SELECTOR)?,
            rating: parse_selector(RATING_SELECTOR)?,
            votes: parse_selector(VOTES_SELECTOR)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector)
        .map_err(|e| CrawlError::HtmlParse(format!("Failed to parse selector '{}': {}", selector, e)))
}

/// All text beneath `element`, as is
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text nodes beneath `element`, each trimmed, then joined
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

fn first_text(item: ElementRef<'_>, selector: &Selector) -> Option<String> {
    item.select(selector).next().map(element_text)
}

/// Extract the raw text of every listing item on a chart page, in page order
pub fn extract_listing_items(html: &str) -> Result<Vec<ListingItem>, CrawlError> {
    let selectors = ListingSelectors::new()?;
    let document = Html::parse_document(html);

    let items = document
        .select(&selectors.item)
        .map(|item| ListingItem {
            rank: first_text(item, &selectors.rank),
            title: first_text(item, &selectors.title),
            metadata: item.select(&selectors.metadata).map(stripped_text).collect(),
            rating: first_text(item, &selectors.rating),
            votes: first_text(item, &selectors.votes),
        })
        .collect();

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body><ul>
          <li class="ipc-metadata-list-summary-item sc-1">
            <div class="meter-const-ranking sc-2 cli-meter-title-header">3 <span>(▲ 1)</span></div>
            <h3 class="ipc-title__text ipc-title__text--reduced">Severance</h3>
            <div class="cli-title-metadata">
              <span class="cli-title-metadata-item">2022– </span>
              <span class="cli-title-metadata-item">19 eps</span>
              <span class="cli-title-metadata-item">TV-MA</span>
            </div>
            <span class="ipc-rating-star--rating">8.7</span>
            <span class="ipc-rating-star--voteCount">&nbsp;(<!-- -->290K<!-- -->)</span>
          </li>
          <li class="ipc-metadata-list-summary-item">
            <h3 class="ipc-title__text ipc-title__text--reduced">2. Unrated Thing</h3>
          </li>
        </ul></body></html>
    "#;

    #[test]
    fn test_extract_listing_items() {
        let items = extract_listing_items(PAGE).unwrap();
        assert_eq!(items.len(), 2);

        let first = &items[0];
        assert_eq!(first.rank.as_deref().map(str::trim), Some("3 (▲ 1)"));
        assert_eq!(first.title.as_deref(), Some("Severance"));
        assert_eq!(first.metadata, vec!["2022–", "19 eps", "TV-MA"]);
        assert_eq!(first.rating.as_deref(), Some("8.7"));
        assert_eq!(first.votes.as_deref(), Some("\u{a0}(290K)"));

        let second = &items[1];
        assert_eq!(second.rank, None);
        assert_eq!(second.title.as_deref(), Some("2. Unrated Thing"));
        assert!(second.metadata.is_empty());
        assert_eq!(second.rating, None);
    }

    #[test]
    fn test_page_without_items() {
        let items = extract_listing_items("<html><body><p>nothing</p></body></html>").unwrap();
        assert!(items.is_empty());
    }
}
