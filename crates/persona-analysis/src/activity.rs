//! Activity pattern aggregation

use persona_core::{ActivitySummary, ContentItem};
use std::collections::HashMap;

/// Items newer than this many seconds before the reference time count as recent
pub const RECENT_WINDOW_SECS: f64 = 30.0 * 24.0 * 3600.0;

/// Number of categories kept in the tally
pub const TOP_SUBREDDITS: usize = 10;

/// Summarize posts and comments relative to a fixed reference time (epoch seconds)
///
/// Ratios and means divide by `max(n, 1)`, so empty inputs yield zeros rather
/// than an undefined value. A user with posts but no comments therefore gets a
/// ratio equal to the post count.
pub fn summarize_activity(
    posts: &[ContentItem],
    comments: &[ContentItem],
    reference_time: f64,
) -> ActivitySummary {
    let cutoff = reference_time - RECENT_WINDOW_SECS;
    let all = || posts.iter().chain(comments.iter());

    let recent_activity_30d = all().filter(|item| item.created_utc > cutoff).count();

    ActivitySummary {
        total_activity: posts.len() + comments.len(),
        recent_activity_30d,
        top_subreddits: tally_subreddits(all().map(|item| item.subreddit.as_str())),
        posts_vs_comments_ratio: posts.len() as f64 / comments.len().max(1) as f64,
        avg_post_score: mean_score(posts),
        avg_comment_score: mean_score(comments),
    }
}

fn mean_score(items: &[ContentItem]) -> f64 {
    let total: i64 = items.iter().map(|item| item.score).sum();
    total as f64 / items.len().max(1) as f64
}

/// Count categories, most frequent first, ties in first-seen order
fn tally_subreddits<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for name in names {
        match slots.get(name) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(name, counts.len());
                counts.push((name, 1));
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by_key(|&(_, count)| std::cmp::Reverse(count));

    counts
        .into_iter()
        .take(TOP_SUBREDDITS)
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}
