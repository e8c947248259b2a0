//! Reddit API client using an application-only OAuth token

use crate::{ContentSource, FetchError};
use async_trait::async_trait;
use persona_core::{ContentItem, ContentKind, RedditCredentials};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const API_BASE: &str = "https://oauth.reddit.com";
const PERMALINK_BASE: &str = "https://reddit.com";

/// Largest listing page the API returns in one request
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct Listing<T> {
    data: ListingData<T>,
}

#[derive(Deserialize)]
struct ListingData<T> {
    children: Vec<Child<T>>,
}

#[derive(Deserialize)]
struct Child<T> {
    data: T,
}

#[derive(Deserialize)]
struct AboutResponse {
    data: AboutData,
}

#[derive(Deserialize)]
struct AboutData {
    #[serde(default)]
    is_suspended: bool,
}

#[derive(Deserialize)]
struct PostData {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    selftext: String,
    subreddit: String,
    created_utc: f64,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    permalink: String,
}

impl From<PostData> for ContentItem {
    fn from(post: PostData) -> Self {
        ContentItem {
            id: post.id,
            title: post.title,
            body: post.selftext,
            subreddit: post.subreddit,
            created_utc: post.created_utc,
            score: post.score,
            url: format!("{}{}", PERMALINK_BASE, post.permalink),
            kind: ContentKind::Post,
            num_comments: Some(post.num_comments),
            parent_title: None,
        }
    }
}

#[derive(Deserialize)]
struct CommentData {
    id: String,
    #[serde(default)]
    body: String,
    subreddit: String,
    created_utc: f64,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    link_title: Option<String>,
    permalink: String,
}

impl From<CommentData> for ContentItem {
    fn from(comment: CommentData) -> Self {
        ContentItem {
            id: comment.id,
            title: String::new(),
            body: comment.body,
            subreddit: comment.subreddit,
            created_utc: comment.created_utc,
            score: comment.score,
            url: format!("{}{}", PERMALINK_BASE, comment.permalink),
            kind: ContentKind::Comment,
            num_comments: None,
            parent_title: comment.link_title,
        }
    }
}

fn parse_listing<T>(body: &str) -> Result<Vec<ContentItem>, FetchError>
where
    T: for<'de> Deserialize<'de> + Into<ContentItem>,
{
    let listing: Listing<T> =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(listing
        .data
        .children
        .into_iter()
        .map(|child| child.data.into())
        .collect())
}

pub struct RedditClient {
    http: Client,
    token: String,
    user_agent: String,
}

impl RedditClient {
    /// Obtain an application-only token with the client credentials grant
    pub async fn connect(credentials: &RedditCredentials) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;

        let response = http
            .post(TOKEN_URL)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .header("User-Agent", &credentials.user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FetchError::Auth(format!("token endpoint returned {}", status)));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|_| FetchError::Auth("token response missing access_token".to_string()))?;
        debug!("reddit token acquired");

        Ok(Self {
            http,
            token: token.access_token,
            user_agent: credentials.user_agent.clone(),
        })
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<(StatusCode, String), FetchError> {
        let url = format!("{}{}", API_BASE, path);
        debug!(url = %url, "reddit request");
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("User-Agent", &self.user_agent)
            .query(query)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(url = %url, status = %status, bytes = body.len(), "reddit response");
        Ok((status, body))
    }

    async fn listing<T>(&self, username: &str, section: &str, limit: usize) -> Result<Vec<ContentItem>, FetchError>
    where
        T: for<'de> Deserialize<'de> + Into<ContentItem>,
    {
        let path = format!("/user/{}/{}", username, section);
        let query = [
            ("sort", "new".to_string()),
            ("limit", limit.min(MAX_PAGE_SIZE).to_string()),
            ("raw_json", "1".to_string()),
        ];
        let (status, body) = self.get(&path, &query).await?;
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: format!("{}{}", API_BASE, path),
            });
        }
        parse_listing::<T>(&body)
    }
}

#[async_trait]
impl ContentSource for RedditClient {
    async fn check_user(&self, username: &str) -> Result<(), FetchError> {
        let path = format!("/user/{}/about", username);
        let (status, body) = self.get(&path, &[("raw_json", "1".to_string())]).await?;

        match status {
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                Err(FetchError::UserNotFound(username.to_string()))
            }
            s if s.is_success() => {
                let about: AboutResponse =
                    serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))?;
                if about.data.is_suspended {
                    Err(FetchError::UserNotFound(username.to_string()))
                } else {
                    Ok(())
                }
            }
            s => Err(FetchError::Status {
                status: s.as_u16(),
                url: format!("{}{}", API_BASE, path),
            }),
        }
    }

    async fn recent_posts(&self, username: &str, limit: usize) -> Result<Vec<ContentItem>, FetchError> {
        self.listing::<PostData>(username, "submitted", limit).await
    }

    async fn recent_comments(
        &self,
        username: &str,
        limit: usize,
    ) -> Result<Vec<ContentItem>, FetchError> {
        self.listing::<CommentData>(username, "comments", limit).await
    }
}
