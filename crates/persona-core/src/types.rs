//! Core types for persona analysis

use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Maximum characters of source text carried by a citation
pub const CITATION_CONTENT_CHARS: usize = 300;

/// Return at most `max` characters of `text`, never splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Kind of user-authored content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Comment,
}

impl ContentKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContentKind::Post => "Post",
            ContentKind::Comment => "Comment",
        }
    }
}

/// One post or comment as fetched from the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    /// Empty for comments
    pub title: String,
    pub body: String,
    pub subreddit: String,
    pub created_utc: f64,
    pub score: i64,
    pub url: String,
    pub kind: ContentKind,
    #[serde(default)]
    pub num_comments: Option<u64>,
    /// Title of the thread a comment was left in
    #[serde(default)]
    pub parent_title: Option<String>,
}

impl ContentItem {
    pub fn post(id: &str, subreddit: &str, title: &str, body: &str, created_utc: f64) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            subreddit: subreddit.to_string(),
            created_utc,
            score: 0,
            url: format!("https://reddit.com/r/{}/comments/{}", subreddit, id),
            kind: ContentKind::Post,
            num_comments: Some(0),
            parent_title: None,
        }
    }

    pub fn comment(id: &str, subreddit: &str, body: &str, created_utc: f64) -> Self {
        Self {
            id: id.to_string(),
            title: String::new(),
            body: body.to_string(),
            subreddit: subreddit.to_string(),
            created_utc,
            score: 0,
            url: format!("https://reddit.com/r/{}/comments/{}", subreddit, id),
            kind: ContentKind::Comment,
            num_comments: None,
            parent_title: None,
        }
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    pub fn with_parent_title(mut self, title: &str) -> Self {
        self.parent_title = Some(title.to_string());
        self
    }
}

/// Everything fetched for one analysis
#[derive(Debug, Clone)]
pub struct ContentSet {
    pub username: String,
    pub posts: Vec<ContentItem>,
    pub comments: Vec<ContentItem>,
    /// Reference time for the whole analysis
    pub fetched_at: DateTime<Utc>,
}

impl ContentSet {
    pub fn total(&self) -> usize {
        self.posts.len() + self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.comments.is_empty()
    }

    /// Reference time as epoch seconds
    pub fn reference_time(&self) -> f64 {
        self.fetched_at.timestamp() as f64
    }
}

/// Aggregate statistics over a fixed list of content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub total_activity: usize,
    pub recent_activity_30d: usize,
    pub top_subreddits: Vec<(String, usize)>,
    /// Posts divided by comments, with an empty denominator counted as 1
    pub posts_vs_comments_ratio: f64,
    pub avg_post_score: f64,
    pub avg_comment_score: f64,
}

/// Literal excerpt of user content backing a trait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub post_id: String,
    pub post_title: String,
    pub content: String,
    pub url: String,
    pub created_utc: f64,
    pub subreddit: String,
    pub content_type: ContentKind,
}

impl Citation {
    pub fn from_item(item: &ContentItem) -> Self {
        let (post_title, source) = match item.kind {
            ContentKind::Post => {
                let source = if item.body.is_empty() {
                    &item.title
                } else {
                    &item.body
                };
                (item.title.clone(), source)
            }
            ContentKind::Comment => (
                item.parent_title.clone().unwrap_or_default(),
                &item.body,
            ),
        };

        Self {
            post_id: item.id.clone(),
            post_title,
            content: truncate_chars(source, CITATION_CONTENT_CHARS).to_string(),
            url: item.url.clone(),
            created_utc: item.created_utc,
            subreddit: item.subreddit.clone(),
            content_type: item.kind,
        }
    }
}

/// An inferred trait together with the content supporting it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaCharacteristic {
    pub category: String,
    #[serde(rename = "trait")]
    pub trait_name: String,
    pub confidence: f64,
    pub description: String,
    pub citations: Vec<Citation>,
}

fn neutral() -> f64 {
    0.5
}

/// Four personality sliders, each in [0, 1]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalityAxes {
    #[serde(default = "neutral")]
    pub introvert_extrovert: f64,
    #[serde(default = "neutral")]
    pub intuition_sensing: f64,
    #[serde(default = "neutral")]
    pub feeling_thinking: f64,
    #[serde(default = "neutral")]
    pub perceiving_judging: f64,
}

impl PersonalityAxes {
    pub fn neutral() -> Self {
        Self {
            introvert_extrovert: 0.5,
            intuition_sensing: 0.5,
            feeling_thinking: 0.5,
            perceiving_judging: 0.5,
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            introvert_extrovert: clamp_unit(self.introvert_extrovert),
            intuition_sensing: clamp_unit(self.intuition_sensing),
            feeling_thinking: clamp_unit(self.feeling_thinking),
            perceiving_judging: clamp_unit(self.perceiving_judging),
        }
    }
}

impl Default for PersonalityAxes {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Clamp into [0, 1], mapping NaN to 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Motivation scores keyed by name, kept in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Motivations(Vec<(String, f64)>);

impl Motivations {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace a score, clamped into [0, 1]
    pub fn set(&mut self, name: &str, value: f64) {
        let value = clamp_unit(value);
        match self.0.iter_mut().find(|(k, _)| k == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, f64)> for Motivations {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        let mut motivations = Motivations::new();
        for (name, value) in iter {
            motivations.set(name, value);
        }
        motivations
    }
}

impl Serialize for Motivations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Motivations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MotivationsVisitor;

        impl<'de> Visitor<'de> for MotivationsVisitor {
            type Value = Motivations;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of motivation names to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Motivations, A::Error> {
                let mut motivations = Motivations::new();
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    motivations.set(&name, value);
                }
                Ok(motivations)
            }
        }

        deserializer.deserialize_map(MotivationsVisitor)
    }
}

/// How a persona was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersonaOrigin {
    Inferred { model: String },
    Fallback { reason: String },
}

impl Default for PersonaOrigin {
    fn default() -> Self {
        PersonaOrigin::Inferred {
            model: String::new(),
        }
    }
}

/// Complete user persona
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub username: String,
    pub analysis_date: DateTime<Utc>,
    #[serde(default)]
    pub origin: PersonaOrigin,

    pub age: String,
    pub occupation: String,
    pub status: String,
    pub location: String,
    pub tier: String,
    pub archetype: String,

    pub personality_traits: PersonalityAxes,
    pub motivations: Motivations,

    pub behavior_habits: Vec<String>,
    pub frustrations: Vec<String>,
    pub goals_needs: Vec<String>,
    pub quote: String,

    pub activity_patterns: ActivitySummary,
    #[serde(default)]
    pub characteristics: Vec<PersonaCharacteristic>,
    pub interests: Vec<String>,
    pub brand_preferences: Vec<String>,
}

impl Persona {
    /// Attach evidence-backed characteristics, replacing any previous set
    pub fn attach_characteristics(&mut self, characteristics: Vec<PersonaCharacteristic>) {
        self.characteristics = characteristics;
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, PersonaOrigin::Fallback { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_respects_code_points() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 300), "short");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_citation_from_post_prefers_body() {
        let long_body = "x".repeat(450);
        let post = ContentItem::post("p1", "chess", "Opening prep", &long_body, 100.0);
        let citation = Citation::from_item(&post);
        assert_eq!(citation.post_title, "Opening prep");
        assert_eq!(citation.content.chars().count(), CITATION_CONTENT_CHARS);
        assert_eq!(citation.content_type, ContentKind::Post);
    }

    #[test]
    fn test_citation_from_link_post_uses_title() {
        let post = ContentItem::post("p1", "chess", "Look at this endgame", "", 100.0);
        let citation = Citation::from_item(&post);
        assert_eq!(citation.content, "Look at this endgame");
    }

    #[test]
    fn test_citation_from_comment_uses_thread_title() {
        let comment =
            ContentItem::comment("c1", "rust", "borrowck saved me", 5.0).with_parent_title("Why Rust?");
        let citation = Citation::from_item(&comment);
        assert_eq!(citation.post_title, "Why Rust?");
        assert_eq!(citation.content, "borrowck saved me");
        assert_eq!(citation.content_type, ContentKind::Comment);
    }

    #[test]
    fn test_motivations_keep_order_and_clamp() {
        let json = r#"{"speed": 0.4, "convenience": 1.7, "comfort": -0.2}"#;
        let parsed: Motivations = serde_json::from_str(json).unwrap();
        let entries: Vec<_> = parsed.iter().collect();
        assert_eq!(
            entries,
            vec![("speed", 0.4), ("convenience", 1.0), ("comfort", 0.0)]
        );

        let back = serde_json::to_string(&parsed).unwrap();
        assert_eq!(back, r#"{"speed":0.4,"convenience":1.0,"comfort":0.0}"#);
    }

    #[test]
    fn test_personality_axes_default_missing_keys() {
        let parsed: PersonalityAxes =
            serde_json::from_str(r#"{"introvert_extrovert": 0.9}"#).unwrap();
        assert_eq!(parsed.introvert_extrovert, 0.9);
        assert_eq!(parsed.feeling_thinking, 0.5);
    }

    #[test]
    fn test_characteristic_serializes_trait_key() {
        let characteristic = PersonaCharacteristic {
            category: "interests".to_string(),
            trait_name: "chess".to_string(),
            confidence: 0.3,
            description: "User shows interest in chess".to_string(),
            citations: vec![],
        };
        let value = serde_json::to_value(&characteristic).unwrap();
        assert_eq!(value["trait"], "chess");
    }

    #[test]
    fn test_origin_tagging() {
        let origin = PersonaOrigin::Fallback {
            reason: "timeout".to_string(),
        };
        let value = serde_json::to_value(&origin).unwrap();
        assert_eq!(value["kind"], "fallback");
        assert_eq!(value["reason"], "timeout");
    }
}
