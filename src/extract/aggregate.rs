//! Per-item metadata aggregation
//!
//! Every resolver of the content class sees every fragment, in source order.
//! A later match overwrites an earlier one for the same attribute, and a failed
//! resolver only costs its own contribution for that fragment.

use crate::extract::episodes::EpisodeResolver;
use crate::extract::error::{Diagnostic, ResolveError};
use crate::extract::rating::RatingResolver;
use crate::extract::runtime::RuntimeResolver;
use crate::extract::title_type::TitleTypeResolver;
use crate::extract::year::YearResolver;
use crate::extract::{Attribute, AttributeSet, ContentClass};
use tracing::trace;

/// A single parsing rule that may contribute one attribute per fragment
pub trait Resolver {
    /// Name reported in diagnostics
    fn component(&self) -> &'static str;

    /// Attribute this resolver populates
    fn attribute(&self) -> Attribute;

    /// `Ok(None)` when the fragment is not relevant to this resolver
    fn resolve(&self, fragment: &str) -> Result<Option<String>, ResolveError>;
}

type ResolverRef = &'static (dyn Resolver + Sync);

static MOVIE_RESOLVERS: [ResolverRef; 3] = [&YearResolver::CLOSED, &RuntimeResolver, &RatingResolver];

static TV_RESOLVERS: [ResolverRef; 4] = [
    &YearResolver::OPEN_ENDED,
    &EpisodeResolver,
    &RatingResolver,
    &TitleTypeResolver,
];

impl ContentClass {
    /// Resolvers applied to fragments of this class, in evaluation order
    pub fn resolvers(self) -> &'static [ResolverRef] {
        match self {
            ContentClass::Movie => &MOVIE_RESOLVERS,
            ContentClass::Tv => &TV_RESOLVERS,
        }
    }
}

/// Best-effort result of aggregating one listing item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    pub attributes: AttributeSet,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the resolvers of `class` over `fragments` once, in order.
pub fn aggregate<S: AsRef<str>>(class: ContentClass, fragments: &[S]) -> Aggregation {
    let mut aggregation = Aggregation::default();

    for fragment in fragments {
        let fragment = fragment.as_ref().trim();
        for resolver in class.resolvers() {
            match resolver.resolve(fragment) {
                Ok(Some(value)) => {
                    trace!(
                        component = resolver.component(),
                        fragment,
                        value = %value,
                        "resolved"
                    );
                    aggregation.attributes.set(resolver.attribute(), value);
                }
                Ok(None) => {}
                Err(cause) => aggregation.diagnostics.push(Diagnostic {
                    component: resolver.component(),
                    item: None,
                    fragment: fragment.to_string(),
                    cause,
                }),
            }
        }
    }

    aggregation
}
