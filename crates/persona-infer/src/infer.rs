//! Inference with guaranteed fallback

use crate::{fallback_persona, parse_persona_response, persona_request, ChatBackend, InferenceError};
use persona_core::{ActivitySummary, ContentSet, Persona, ProgressSink, Stage};

/// Result of the inference stage; a persona is always produced
#[derive(Debug)]
pub enum InferenceOutcome {
    Inferred(Persona),
    Fallback { persona: Persona, cause: InferenceError },
}

impl InferenceOutcome {
    pub fn persona(&self) -> &Persona {
        match self {
            InferenceOutcome::Inferred(persona) => persona,
            InferenceOutcome::Fallback { persona, .. } => persona,
        }
    }

    pub fn into_persona(self) -> Persona {
        match self {
            InferenceOutcome::Inferred(persona) => persona,
            InferenceOutcome::Fallback { persona, .. } => persona,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, InferenceOutcome::Fallback { .. })
    }
}

/// Ask the backend for a persona; any failure yields the fallback persona instead
pub async fn infer_persona(
    backend: &dyn ChatBackend,
    content: &ContentSet,
    summary: &ActivitySummary,
    progress: &dyn ProgressSink,
) -> InferenceOutcome {
    progress.stage(Stage::Infer);
    let request = persona_request(content, summary);

    let result = match backend.complete(&request).await {
        Ok(completion) => parse_persona_response(&completion.text).map(|draft| {
            draft.into_persona(
                &content.username,
                content.fetched_at,
                summary,
                &completion.model,
            )
        }),
        Err(e) => Err(e),
    };

    match result {
        Ok(persona) => {
            progress.info(Stage::Infer, "persona generated");
            InferenceOutcome::Inferred(persona)
        }
        Err(cause) => {
            progress.warn(
                Stage::Infer,
                &format!("inference failed, using fallback persona: {}", cause),
            );
            let persona = fallback_persona(content, summary, &cause.to_string());
            InferenceOutcome::Fallback { persona, cause }
        }
    }
}
