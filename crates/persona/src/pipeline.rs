//! Fetch, aggregate, infer and attach evidence for one user

use chrono::Utc;
use persona_analysis::{find_supporting_evidence, summarize_activity};
use persona_core::{AnalysisError, Persona, ProgressSink, Stage};
use persona_fetch::{fetch_user_content, ContentSource};
use persona_infer::{infer_persona, ChatBackend};

pub async fn analyze_user(
    source: &dyn ContentSource,
    backend: &dyn ChatBackend,
    username: &str,
    limit: usize,
    progress: &dyn ProgressSink,
) -> Result<Persona, AnalysisError> {
    progress.info(Stage::Fetch, &format!("analyzing user: {}", username));
    let content = fetch_user_content(source, username, limit, Utc::now(), progress).await?;

    progress.stage(Stage::Aggregate);
    let summary = summarize_activity(&content.posts, &content.comments, content.reference_time());
    progress.info(
        Stage::Aggregate,
        &format!(
            "{} items, {} in the last 30 days",
            summary.total_activity, summary.recent_activity_30d
        ),
    );

    let mut persona = infer_persona(backend, &content, &summary, progress)
        .await
        .into_persona();

    progress.stage(Stage::Evidence);
    let characteristics = find_supporting_evidence(&content, &persona);
    progress.info(
        Stage::Evidence,
        &format!("{} characteristics with citations", characteristics.len()),
    );
    persona.attach_characteristics(characteristics);

    Ok(persona)
}
