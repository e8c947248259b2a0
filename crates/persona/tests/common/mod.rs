use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use persona_core::ContentItem;
use persona_fetch::{ContentSource, FetchError};
use persona_infer::{ChatBackend, ChatRequest, Completion, InferenceError};
use std::sync::Mutex;

pub const DAY: f64 = 86_400.0;

pub fn fetched_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
}

pub fn days_ago(days: f64) -> f64 {
    fetched_at().timestamp() as f64 - days * DAY
}

/// Three chess posts (newest first), one old post and two comments
pub fn chess_player_posts() -> Vec<ContentItem> {
    vec![
        ContentItem::post("p1", "chess", "Chess puzzle of the day", "Mate in 3", days_ago(1.0))
            .with_score(120),
        ContentItem::post("p2", "chess", "My chess rating finally hit 1800", "", days_ago(3.0))
            .with_score(45),
        ContentItem::post("p3", "AskReddit", "Best way to learn CHESS openings?", "", days_ago(10.0))
            .with_score(7),
        ContentItem::post("p4", "cooking", "Sourdough starter help", "It smells odd", days_ago(90.0))
            .with_score(2),
    ]
}

pub fn chess_player_comments() -> Vec<ContentItem> {
    vec![
        ContentItem::comment("c1", "cooking", "I bake bread every Sunday morning", days_ago(2.0))
            .with_parent_title("Weekend routines?"),
        ContentItem::comment("c2", "chess", "Study endgames before openings", days_ago(40.0))
            .with_score(-1),
    ]
}

/// Serves fixed content and records the limits it was asked for
pub struct StaticSource {
    pub posts: Vec<ContentItem>,
    pub comments: Vec<ContentItem>,
    pub requested_limits: Mutex<Vec<usize>>,
}

impl StaticSource {
    pub fn new(posts: Vec<ContentItem>, comments: Vec<ContentItem>) -> Self {
        Self {
            posts,
            comments,
            requested_limits: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ContentSource for StaticSource {
    async fn check_user(&self, _username: &str) -> Result<(), FetchError> {
        Ok(())
    }

    async fn recent_posts(&self, _: &str, limit: usize) -> Result<Vec<ContentItem>, FetchError> {
        self.requested_limits.lock().unwrap().push(limit);
        Ok(self.posts.clone())
    }

    async fn recent_comments(&self, _: &str, limit: usize) -> Result<Vec<ContentItem>, FetchError> {
        self.requested_limits.lock().unwrap().push(limit);
        Ok(self.comments.clone())
    }
}

/// Returns one canned reply, or an error
pub struct CannedBackend {
    pub reply: Result<String, fn() -> InferenceError>,
}

impl CannedBackend {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
        }
    }

    pub fn failing(make: fn() -> InferenceError) -> Self {
        Self { reply: Err(make) }
    }
}

#[async_trait]
impl ChatBackend for CannedBackend {
    async fn complete(&self, _request: &ChatRequest) -> Result<Completion, InferenceError> {
        match &self.reply {
            Ok(text) => Ok(Completion {
                text: text.clone(),
                model: "canned".to_string(),
            }),
            Err(make) => Err(make()),
        }
    }
}

pub const CHESS_PERSONA_JSON: &str = r#"```json
{
    "age": "28",
    "occupation": "Data analyst",
    "status": "Single",
    "location": "Unknown",
    "tier": "Enthusiast",
    "archetype": "The Strategist",
    "personality_traits": {
        "introvert_extrovert": 0.25,
        "intuition_sensing": 0.6,
        "feeling_thinking": 0.7,
        "perceiving_judging": 0.4
    },
    "motivations": {"achievement": 0.9, "learning": 0.8, "social_connection": 0.3},
    "behavior_habits": ["Shares daily chess puzzles", "bake"],
    "frustrations": ["Rating plateaus"],
    "goals_needs": ["Reach 2000 rating"],
    "quote": "Every move matters.",
    "interests": ["chess", "sourdough", "skydiving"],
    "brand_preferences": ["Lichess"]
}
```"#;
