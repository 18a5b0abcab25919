//! Lexical brand/category detection for the fallback tier.
//!
//! An injectable matcher with an explicit vocabulary: when a query names a
//! known brand or category *and* a generic domain term ("nike shoes",
//! "running sneakers"), the fallback treats it as a browse of that entity
//! instead of a substring match. Entity lists grow without touching any
//! control flow.

use regex::{escape, Regex, RegexBuilder};
use tracing::debug;

use trellis_core::catalog::{BrandId, CategoryId};

/// What the lexicon recognized in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalMatch {
    Brand(BrandId),
    Category(CategoryId),
}

/// Word-boundary matcher over known brand names, category names, and the
/// generic domain vocabulary.
pub struct LexiconMatcher {
    brands: Vec<(Regex, BrandId)>,
    categories: Vec<(Regex, CategoryId)>,
    domain_terms: Option<Regex>,
}

fn word_regex(phrase: &str) -> Option<Regex> {
    let trimmed = phrase.trim();
    if trimmed.is_empty() {
        return None;
    }
    RegexBuilder::new(&format!(r"\b{}\b", escape(trimmed)))
        .case_insensitive(true)
        .build()
        .ok()
}

impl LexiconMatcher {
    /// Build a matcher from explicit vocabularies.
    pub fn new(
        brands: impl IntoIterator<Item = (BrandId, String)>,
        categories: impl IntoIterator<Item = (CategoryId, String)>,
        domain_terms: &[String],
    ) -> Self {
        let brands = brands
            .into_iter()
            .filter_map(|(id, name)| word_regex(&name).map(|re| (re, id)))
            .collect();
        let categories = categories
            .into_iter()
            .filter_map(|(id, name)| word_regex(&name).map(|re| (re, id)))
            .collect();
        let domain_terms = if domain_terms.is_empty() {
            None
        } else {
            let alternation = domain_terms
                .iter()
                .map(|t| escape(t.trim()))
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join("|");
            RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
                .case_insensitive(true)
                .build()
                .ok()
        };
        Self {
            brands,
            categories,
            domain_terms,
        }
    }

    /// Detect a known brand or category co-occurring with a generic domain
    /// term. Brands win over categories when both appear.
    pub fn detect(&self, query: &str) -> Option<LexicalMatch> {
        let domain = self.domain_terms.as_ref()?;
        if !domain.is_match(query) {
            return None;
        }
        for (re, id) in &self.brands {
            if re.is_match(query) {
                debug!(brand = %id, "lexicon matched brand browse");
                return Some(LexicalMatch::Brand(*id));
            }
        }
        for (re, id) in &self.categories {
            if re.is_match(query) {
                debug!(category = %id, "lexicon matched category browse");
                return Some(LexicalMatch::Category(*id));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> LexiconMatcher {
        LexiconMatcher::new(
            [
                (BrandId(1), "Nike".to_string()),
                (BrandId(4), "New Balance".to_string()),
            ],
            [
                (CategoryId(6), "Running".to_string()),
                (CategoryId(7), "Basketball".to_string()),
            ],
            &["shoes".to_string(), "sneakers".to_string()],
        )
    }

    #[test]
    fn brand_plus_domain_term_is_a_brand_browse() {
        assert_eq!(
            matcher().detect("nike shoes"),
            Some(LexicalMatch::Brand(BrandId(1)))
        );
        assert_eq!(
            matcher().detect("show me NEW BALANCE sneakers"),
            Some(LexicalMatch::Brand(BrandId(4)))
        );
    }

    #[test]
    fn category_plus_domain_term_is_a_category_browse() {
        assert_eq!(
            matcher().detect("running shoes"),
            Some(LexicalMatch::Category(CategoryId(6)))
        );
    }

    #[test]
    fn entity_without_domain_term_is_not_a_browse() {
        assert_eq!(matcher().detect("nike"), None);
        assert_eq!(matcher().detect("running socks"), None);
    }

    #[test]
    fn brand_wins_when_both_appear() {
        assert_eq!(
            matcher().detect("nike running shoes"),
            Some(LexicalMatch::Brand(BrandId(1)))
        );
    }

    #[test]
    fn matches_are_word_bounded() {
        // "nike" embedded mid-word must not trigger a brand browse.
        assert_eq!(matcher().detect("beatnikes shoes"), None);
    }
}
