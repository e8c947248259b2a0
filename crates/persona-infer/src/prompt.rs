//! Prompt construction for persona inference

use crate::{ChatMessage, ChatRequest};
use persona_core::{truncate_chars, ActivitySummary, ContentSet};

const MAX_POSTS: usize = 20;
const MAX_COMMENTS: usize = 30;
const POST_BODY_CHARS: usize = 500;
const COMMENT_BODY_CHARS: usize = 300;
const MAX_SECTION_CHARS: usize = 8000;
const PERSONA_TEMPERATURE: f64 = 0.3;

pub const SYSTEM_PROMPT: &str = "You are an expert user researcher and data analyst specializing in social media persona analysis. You must return only valid JSON.";

const RESPONSE_SCHEMA: &str = r#"{
    "age": "estimated age or age range (e.g., '31', '25-30')",
    "occupation": "likely occupation based on content",
    "status": "relationship/life status (e.g., 'Single', 'Married', 'Student')",
    "location": "likely location or region",
    "tier": "user type/segment (e.g., 'Early Adopter', 'Power User', 'Casual User')",
    "archetype": "user archetype (e.g., 'The Creator', 'The Explorer', 'The Helper')",
    "personality_traits": {
        "introvert_extrovert": 0.7,
        "intuition_sensing": 0.3,
        "feeling_thinking": 0.6,
        "perceiving_judging": 0.4
    },
    "motivations": {
        "convenience": 0.8,
        "wellness": 0.6,
        "speed": 0.4,
        "preferences": 0.7,
        "comfort": 0.5,
        "social_connection": 0.6,
        "achievement": 0.7,
        "learning": 0.8
    },
    "behavior_habits": ["observed behaviors and habits, with specific patterns"],
    "frustrations": ["frustrations and pain points, with specific complaints"],
    "goals_needs": ["goals and needs, including aspirations"],
    "quote": "a representative quote that captures their essence",
    "interests": ["list of interests"],
    "brand_preferences": ["mentioned brands or preferences"]
}"#;

/// Cap a section at `MAX_SECTION_CHARS`, appending a marker when cut
fn bounded(section: String) -> String {
    if section.chars().count() > MAX_SECTION_CHARS {
        format!("{}...", truncate_chars(&section, MAX_SECTION_CHARS))
    } else {
        section
    }
}

/// Build the user prompt from the first posts and comments plus the activity tally
pub fn build_persona_prompt(content: &ContentSet, summary: &ActivitySummary) -> String {
    let posts_text = bounded(
        content
            .posts
            .iter()
            .take(MAX_POSTS)
            .map(|p| {
                format!(
                    "Title: {}\nContent: {}",
                    p.title,
                    truncate_chars(&p.body, POST_BODY_CHARS)
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    );

    let comments_text = bounded(
        content
            .comments
            .iter()
            .take(MAX_COMMENTS)
            .map(|c| format!("Comment: {}", truncate_chars(&c.body, COMMENT_BODY_CHARS)))
            .collect::<Vec<_>>()
            .join("\n"),
    );

    let subreddits = summary
        .top_subreddits
        .iter()
        .take(10)
        .map(|(name, count)| format!("{} ({} posts)", name, count))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Analyze the following Reddit user's activity and create a detailed user persona.\n\n\
         Username: {}\n\
         Total Posts: {}\n\
         Total Comments: {}\n\
         Top Subreddits: {}\n\n\
         Recent Posts:\n{}\n\n\
         Recent Comments:\n{}\n\n\
         Please provide a detailed analysis in the following JSON format:\n{}\n\n\
         Return ONLY the JSON object, no additional text.",
        content.username,
        content.posts.len(),
        content.comments.len(),
        subreddits,
        posts_text,
        comments_text,
        RESPONSE_SCHEMA
    )
}

/// System + user messages at a low, fixed temperature
pub fn persona_request(content: &ContentSet, summary: &ActivitySummary) -> ChatRequest {
    ChatRequest {
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(build_persona_prompt(content, summary)),
        ],
        temperature: PERSONA_TEMPERATURE,
    }
}
