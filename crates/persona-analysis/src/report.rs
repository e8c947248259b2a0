//! Human-readable persona report

use chrono::{DateTime, Utc};
use persona_core::{truncate_chars, Citation, Persona, PersonaCharacteristic, PersonaOrigin};

const GAUGE_WIDTH: usize = 20;
const SNIPPET_CHARS: usize = 100;

/// Render the full report. `generated_at` only feeds the footer line.
pub fn render_report(persona: &Persona, generated_at: DateTime<Utc>) -> String {
    let mut sections = Vec::new();

    // Section 1: Header
    let mut header = format!(
        "# User Persona Report: {}\n\n**Analysis Date:** {}",
        persona.username,
        persona.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let PersonaOrigin::Fallback { reason } = &persona.origin {
        header.push_str(&format!(
            "\n\n> **Note:** inference unavailable ({}); this persona was built from activity statistics only.",
            reason
        ));
    }
    sections.push(header);

    // Section 2: Demographics
    sections.push(format!(
        "## Basic Information\n\n\
         **AGE:** {}\n**OCCUPATION:** {}\n**STATUS:** {}\n\
         **LOCATION:** {}\n**TIER:** {}\n**ARCHETYPE:** {}",
        persona.age,
        persona.occupation,
        persona.status,
        persona.location,
        persona.tier,
        persona.archetype
    ));

    // Section 3: Personality sliders
    let axes = &persona.personality_traits;
    sections.push(format!(
        "## Personality Traits\n\n\
         **INTROVERT** {} **EXTROVERT**\n\
         **INTUITION** {} **SENSING**\n\
         **FEELING** {} **THINKING**\n\
         **PERCEIVING** {} **JUDGING**",
        slider(axes.introvert_extrovert),
        slider(1.0 - axes.intuition_sensing),
        slider(1.0 - axes.feeling_thinking),
        slider(1.0 - axes.perceiving_judging)
    ));

    // Section 4: Motivations
    let motivations: Vec<String> = persona
        .motivations
        .iter()
        .map(|(name, value)| format!("**{}** {} ({:.1})", name.to_uppercase(), bar(value), value))
        .collect();
    sections.push(format!("## Motivations\n\n{}", motivations.join("\n")));

    // Section 5: Free-text lists
    sections.push(format!("## Behavior & Habits\n\n{}", bullets(&persona.behavior_habits)));
    sections.push(format!("## Frustrations\n\n{}", bullets(&persona.frustrations)));
    sections.push(format!("## Goals & Needs\n\n{}", bullets(&persona.goals_needs)));
    sections.push(format!("## Representative Quote\n\n> \"{}\"", persona.quote));
    sections.push(format!("## Interests\n\n{}", persona.interests.join(", ")));
    sections.push(format!(
        "## Brand Preferences\n\n{}",
        persona.brand_preferences.join(", ")
    ));

    // Section 6: Activity
    let activity = &persona.activity_patterns;
    sections.push(format!(
        "## Activity Patterns\n\n\
         - **Total Activity:** {} posts/comments\n\
         - **Recent Activity (30d):** {} posts/comments ({:.1}%)\n\
         - **Posts vs Comments Ratio:** {:.2}\n\
         - **Average Post Score:** {:.2}\n\
         - **Average Comment Score:** {:.2}",
        activity.total_activity,
        activity.recent_activity_30d,
        percent(activity.recent_activity_30d, activity.total_activity),
        activity.posts_vs_comments_ratio,
        activity.avg_post_score,
        activity.avg_comment_score
    ));

    let top: Vec<String> = activity
        .top_subreddits
        .iter()
        .take(10)
        .map(|(name, count)| {
            format!(
                "- r/{} ({} items, {:.1}%)",
                name,
                count,
                percent(*count, activity.total_activity)
            )
        })
        .collect();
    sections.push(format!("## Top Subreddits\n\n{}", top.join("\n")));

    // Section 7: Evidence
    sections.push(format!(
        "## Supporting Evidence & Citations\n\n{}",
        render_evidence(&persona.characteristics)
    ));

    sections.push(format!(
        "---\n\n\
         *This persona analysis was generated automatically based on publicly available Reddit activity.\n\
         The analysis is for research and understanding purposes only.*\n\n\
         *Generated on: {}*",
        generated_at.format("%Y-%m-%d %H:%M:%S")
    ));

    let mut report = sections.join("\n\n");
    report.push('\n');
    report
}

fn render_evidence(characteristics: &[PersonaCharacteristic]) -> String {
    if characteristics.is_empty() {
        return "No supporting evidence found.".to_string();
    }

    // group by category, first-seen order
    let mut groups: Vec<(&str, Vec<&PersonaCharacteristic>)> = Vec::new();
    for characteristic in characteristics {
        match groups
            .iter_mut()
            .find(|(category, _)| *category == characteristic.category)
        {
            Some((_, members)) => members.push(characteristic),
            None => groups.push((characteristic.category.as_str(), vec![characteristic])),
        }
    }

    groups
        .iter()
        .map(|(category, members)| {
            let body: Vec<String> = members.iter().map(|c| render_characteristic(c)).collect();
            format!("### {}\n\n{}", title_case(category), body.join("\n\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_characteristic(characteristic: &PersonaCharacteristic) -> String {
    let mut out = format!(
        "**{}** (Confidence: {:.1})\n{}",
        characteristic.trait_name,
        characteristic.confidence,
        characteristic.description
    );
    if !characteristic.citations.is_empty() {
        let lines: Vec<String> = characteristic.citations.iter().map(render_citation).collect();
        out.push_str("\n\n**Supporting Evidence:**\n");
        out.push_str(&lines.join("\n"));
    }
    out
}

fn render_citation(citation: &Citation) -> String {
    let date = DateTime::from_timestamp(citation.created_utc as i64, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown date".to_string());
    let snippet = truncate_chars(&citation.content, SNIPPET_CHARS);
    let ellipsis = if snippet.len() < citation.content.len() {
        "..."
    } else {
        ""
    };
    format!(
        "- [{}] r/{} ({}): {}{}\n  Link: {}",
        citation.content_type.label(),
        citation.subreddit,
        date,
        snippet.replace('\n', " "),
        ellipsis,
        citation.url
    )
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("• {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn gauge_position(value: f64) -> usize {
    (persona_core::clamp_unit(value) * GAUGE_WIDTH as f64).round() as usize
}

/// Track of `GAUGE_WIDTH + 1` cells with a marker at the value
fn slider(value: f64) -> String {
    let pos = gauge_position(value);
    (0..=GAUGE_WIDTH)
        .map(|i| if i == pos { '●' } else { '─' })
        .collect()
}

/// `round(value * 20)` filled cells out of 20
fn bar(value: f64) -> String {
    let filled = gauge_position(value);
    format!("{}{}", "█".repeat(filled), "░".repeat(GAUGE_WIDTH - filled))
}

fn title_case(category: &str) -> String {
    category
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
