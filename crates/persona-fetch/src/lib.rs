//! Content fetching from the Reddit API

mod error;
mod profile;
mod reddit;
mod source;

pub use error::FetchError;
pub use profile::extract_username;
pub use reddit::{RedditClient, MAX_PAGE_SIZE};
pub use source::{fetch_user_content, ContentSource, FetchReport};
