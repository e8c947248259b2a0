//! Evidence matching: link persona traits back to literal user content

use persona_core::{Citation, ContentItem, ContentKind, ContentSet, Persona, PersonaCharacteristic};

/// Citations kept per trait
pub const MAX_CITATIONS: usize = 5;

const CONFIDENCE_PER_CITATION: f64 = 0.3;

/// Heuristic confidence for a trait backed by `citations` excerpts
pub fn confidence(citations: usize) -> f64 {
    (citations as f64 * CONFIDENCE_PER_CITATION).min(1.0)
}

/// Find up to [`MAX_CITATIONS`] items mentioning `trait_text`, posts first, in fetch order
pub fn find_citations(content: &ContentSet, trait_text: &str) -> Vec<Citation> {
    let needle = trait_text.to_lowercase();

    content
        .posts
        .iter()
        .chain(content.comments.iter())
        .filter(|item| mentions(item, &needle))
        .take(MAX_CITATIONS)
        .map(Citation::from_item)
        .collect()
}

fn mentions(item: &ContentItem, needle: &str) -> bool {
    match item.kind {
        ContentKind::Post => {
            item.title.to_lowercase().contains(needle) || item.body.to_lowercase().contains(needle)
        }
        ContentKind::Comment => item.body.to_lowercase().contains(needle),
    }
}

/// Build one characteristic per interest and behavior habit that has evidence
///
/// Traits without a single matching item are dropped. Blank traits are
/// skipped since an empty needle would match everything.
pub fn find_supporting_evidence(
    content: &ContentSet,
    persona: &Persona,
) -> Vec<PersonaCharacteristic> {
    let interests = persona.interests.iter().map(|interest| {
        (
            "interests",
            interest,
            format!("User shows interest in {}", interest),
        )
    });
    let habits = persona.behavior_habits.iter().map(|habit| {
        (
            "behavior_habits",
            habit,
            format!("User exhibits this behavior: {}", habit),
        )
    });

    interests
        .chain(habits)
        .filter(|(_, trait_text, _)| !trait_text.trim().is_empty())
        .filter_map(|(category, trait_text, description)| {
            let citations = find_citations(content, trait_text);
            if citations.is_empty() {
                tracing::debug!(category, trait_text = %trait_text, "no evidence found");
                return None;
            }
            Some(PersonaCharacteristic {
                category: category.to_string(),
                trait_name: trait_text.clone(),
                confidence: confidence(citations.len()),
                description,
                citations,
            })
        })
        .collect()
}
