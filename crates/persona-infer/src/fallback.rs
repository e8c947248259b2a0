//! Deterministic persona used when inference fails

use persona_core::{
    ActivitySummary, ContentSet, Motivations, Persona, PersonaOrigin, PersonalityAxes,
};

/// Catch-all communities that say nothing about a user's interests
pub const GENERIC_SUBREDDITS: [&str; 5] = ["AskReddit", "funny", "pics", "videos", "news"];

const UNKNOWN: &str = "Unknown";

pub fn fallback_persona(content: &ContentSet, summary: &ActivitySummary, reason: &str) -> Persona {
    let top_five: Vec<&str> = summary
        .top_subreddits
        .iter()
        .take(5)
        .map(|(name, _)| name.as_str())
        .collect();

    let ratio = summary.posts_vs_comments_ratio;
    let balance = if ratio > 1.0 {
        format!("Posts {:.1}x more than comments", ratio)
    } else {
        "Comments more than posts".to_string()
    };

    Persona {
        username: content.username.clone(),
        analysis_date: content.fetched_at,
        origin: PersonaOrigin::Fallback {
            reason: reason.to_string(),
        },
        age: UNKNOWN.to_string(),
        occupation: UNKNOWN.to_string(),
        status: UNKNOWN.to_string(),
        location: UNKNOWN.to_string(),
        tier: "Regular User".to_string(),
        archetype: "The Participant".to_string(),
        personality_traits: PersonalityAxes::neutral(),
        motivations: [
            ("social_connection", 0.6),
            ("information", 0.7),
            ("entertainment", 0.8),
        ]
        .into_iter()
        .collect::<Motivations>(),
        behavior_habits: vec![
            format!("Active in {} main subreddits", top_five.len()),
            balance,
        ],
        frustrations: vec!["Unable to analyze due to API limitations".to_string()],
        goals_needs: vec!["Further analysis needed".to_string()],
        quote: "Profile requires deeper analysis".to_string(),
        activity_patterns: summary.clone(),
        characteristics: Vec::new(),
        interests: top_five
            .iter()
            .filter(|name| !GENERIC_SUBREDDITS.contains(*name))
            .map(|name| name.to_string())
            .collect(),
        brand_preferences: Vec::new(),
    }
}
