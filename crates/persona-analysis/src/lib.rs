//! Activity statistics, evidence matching and report rendering

pub mod activity;
pub mod evidence;
pub mod report;

pub use activity::{summarize_activity, RECENT_WINDOW_SECS, TOP_SUBREDDITS};
pub use evidence::{confidence, find_citations, find_supporting_evidence, MAX_CITATIONS};
pub use report::render_report;
