use crate::cli::AnalyzeArgs;
use crate::pipeline::analyze_user;
use anyhow::Context;
use chrono::Utc;
use persona_analysis::render_report;
use persona_core::artifact::{default_file_name, save_persona};
use persona_core::{
    AnalysisError, Config, Persona, ProgressSink, SilentProgress, Stage, TracingProgress,
};
use persona_fetch::{extract_username, RedditClient};
use persona_infer::GroqClient;
use tracing::info;

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let target = args
        .target
        .as_deref()
        .context("a Reddit username or profile URL is required")?;
    let username = extract_username(target)?;
    let config = Config::load()?;

    let progress: &dyn ProgressSink = if args.quiet {
        &SilentProgress
    } else {
        &TracingProgress
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let persona = runtime.block_on(async {
        tokio::select! {
            result = analyze_live(&config, &username, args.limit as usize, progress) => result,
            _ = tokio::signal::ctrl_c() => Err(anyhow::anyhow!("analysis interrupted by user")),
        }
    })?;

    progress.stage(Stage::Render);
    println!("{}", "=".repeat(80));
    println!("PERSONA ANALYSIS REPORT");
    println!("{}", "=".repeat(80));
    println!("{}", render_report(&persona, Utc::now()));

    if !args.report_only {
        let path = args
            .output
            .unwrap_or_else(|| default_file_name(&persona.username, persona.analysis_date));
        save_persona(&persona, &path)?;
        info!(path = %path.display(), "persona data saved");
    }

    Ok(())
}

async fn analyze_live(
    config: &Config,
    username: &str,
    limit: usize,
    progress: &dyn ProgressSink,
) -> anyhow::Result<Persona> {
    let source = RedditClient::connect(&config.reddit)
        .await
        .map_err(|e| AnalysisError::Source(e.to_string()))?;
    let backend = GroqClient::new(&config.inference)?;

    Ok(analyze_user(&source, &backend, username, limit, progress).await?)
}
