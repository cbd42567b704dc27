use crate::config::registry::{ConceptCategory, LexiconEntry, Registry};
use crate::foundation::core::Props;

/// A lexicon-recognised domain term found in the input text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Concept {
    /// Canonical underscored name.
    pub name: String,
    /// Lexicon category.
    pub category: ConceptCategory,
    /// Static description.
    pub description: String,
    /// Visual-property hints (`color`, `animation`, `shape`, ...).
    pub hints: Props,
    /// Related concept names.
    pub related: Vec<String>,
    /// Frequency-weighted importance in `[0, 1]`.
    pub importance: f64,
}

/// Case-folded substring scan over a lexicon.
///
/// No fuzzy matching and no positional awareness: a term is present iff its spaced or
/// underscored form occurs anywhere in the lowercased text.
pub struct ConceptExtractor<'r> {
    registry: &'r Registry,
}

impl<'r> ConceptExtractor<'r> {
    /// Extractor over `registry.lexicon`.
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    /// Extract concepts ordered by descending importance.
    ///
    /// Ties keep lexicon order. Text without any lexicon hit yields an empty list.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn parse(&self, text: &str) -> Vec<Concept> {
        let folded = text.to_lowercase();
        let word_count = folded.split_whitespace().count();

        let mut concepts: Vec<Concept> = self
            .registry
            .lexicon
            .iter()
            .filter_map(|entry| {
                let count = occurrences(entry, &folded);
                if count == 0 {
                    return None;
                }
                Some(Concept {
                    name: entry.name.clone(),
                    category: entry.category,
                    description: entry.description_or_default(),
                    hints: entry.hints.clone(),
                    related: entry.relationships.clone(),
                    importance: importance(count, word_count, entry.privileged),
                })
            })
            .collect();

        // `sort_by` is stable, so equal scores keep lexicon order.
        concepts.sort_by(|a, b| b.importance.total_cmp(&a.importance));

        if concepts.is_empty() {
            tracing::debug!("no lexicon terms found");
        } else {
            tracing::info!(count = concepts.len(), top = %concepts[0].name, "extracted concepts");
        }
        concepts
    }
}

fn occurrences(entry: &LexiconEntry, folded: &str) -> usize {
    let underscored = entry.name.to_lowercase();
    let spaced = underscored.replace('_', " ");
    let mut count = folded.matches(spaced.as_str()).count();
    if spaced != underscored {
        count += folded.matches(underscored.as_str()).count();
    }
    count
}

fn importance(count: usize, word_count: usize, privileged: bool) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    let weighted = if privileged { count * 2 } else { count };
    (weighted as f64 / word_count as f64 * 100.0).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/extract/concepts.rs"]
mod tests;
