//! Content source abstraction and the partial-result fetch policy

use crate::FetchError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use persona_core::{AnalysisError, ContentItem, ContentSet, ProgressSink, Stage};

/// A platform that can list a user's recent posts and comments, newest first
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fails with [`FetchError::UserNotFound`] for missing or inaccessible accounts
    async fn check_user(&self, username: &str) -> Result<(), FetchError>;

    async fn recent_posts(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<ContentItem>, FetchError>;

    async fn recent_comments(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<ContentItem>, FetchError>;
}

/// Outcome of fetching both sequences; each side fails independently
#[derive(Debug)]
pub struct FetchReport {
    pub posts: Result<Vec<ContentItem>, FetchError>,
    pub comments: Result<Vec<ContentItem>, FetchError>,
}

impl FetchReport {
    /// Degrade failed sides to empty, failing only when nothing was fetched
    pub fn into_content_set(
        self,
        username: &str,
        fetched_at: DateTime<Utc>,
        progress: &dyn ProgressSink,
    ) -> Result<ContentSet, AnalysisError> {
        let posts = settle("posts", self.posts, progress);
        let comments = settle("comments", self.comments, progress);

        let content = ContentSet {
            username: username.to_string(),
            posts,
            comments,
            fetched_at,
        };
        if content.is_empty() {
            return Err(AnalysisError::EmptyContent(username.to_string()));
        }
        Ok(content)
    }
}

fn settle(
    what: &str,
    result: Result<Vec<ContentItem>, FetchError>,
    progress: &dyn ProgressSink,
) -> Vec<ContentItem> {
    match result {
        Ok(items) => {
            progress.info(Stage::Fetch, &format!("fetched {} {}", items.len(), what));
            items
        }
        Err(e) => {
            progress.warn(
                Stage::Fetch,
                &format!("error fetching {}, continuing without them: {}", what, e),
            );
            Vec::new()
        }
    }
}

/// Fetch up to `limit` posts and `limit` comments for `username`
pub async fn fetch_user_content(
    source: &dyn ContentSource,
    username: &str,
    limit: usize,
    fetched_at: DateTime<Utc>,
    progress: &dyn ProgressSink,
) -> Result<ContentSet, AnalysisError> {
    progress.stage(Stage::Fetch);

    source.check_user(username).await.map_err(|e| match e {
        FetchError::UserNotFound(name) => AnalysisError::UserNotFound(name),
        other => AnalysisError::Source(other.to_string()),
    })?;
    progress.info(Stage::Fetch, &format!("found user: {}", username));

    let posts = source.recent_posts(username, limit).await.map(|mut items| {
        items.truncate(limit);
        items
    });
    let comments = source.recent_comments(username, limit).await.map(|mut items| {
        items.truncate(limit);
        items
    });

    FetchReport { posts, comments }.into_content_set(username, fetched_at, progress)
}
