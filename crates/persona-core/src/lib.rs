//! Shared data model, configuration and error taxonomy for persona analysis

pub mod artifact;
mod config;
mod error;
mod progress;
mod types;

pub use config::{Config, ConfigFile, InferenceSettings, RedditCredentials};
pub use error::AnalysisError;
pub use progress::{ProgressSink, SilentProgress, Stage, TracingProgress};
pub use types::{
    clamp_unit, truncate_chars, ActivitySummary, Citation, ContentItem, ContentKind, ContentSet,
    Motivations, Persona, PersonaCharacteristic, PersonaOrigin, PersonalityAxes,
    CITATION_CONTENT_CHARS,
};
