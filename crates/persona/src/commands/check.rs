use persona_core::{AnalysisError, Config, ConfigFile};
use persona_store::Paths;

pub fn run() -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let file = ConfigFile::load(&paths)?;
    let config_path = paths.config_file();

    println!(
        "Config file: {} ({})",
        config_path.display(),
        if config_path.exists() { "found" } else { "not found" }
    );

    match Config::from_lookup(&file, |key| std::env::var(key).ok()) {
        Ok(config) => {
            println!("{}", describe(&config));
            Ok(())
        }
        Err(err) => {
            if let AnalysisError::Configuration { missing } = &err {
                println!("✗ Missing credentials:");
                for key in missing {
                    println!("  - {}", key);
                }
                println!("\nRun `persona setup` for instructions.");
            }
            Err(err.into())
        }
    }
}

fn describe(config: &Config) -> String {
    format!(
        "✓ Configuration complete\n  User agent: {}\n  Endpoint: {}\n  Model: {}{}",
        config.reddit.user_agent,
        config.inference.api_url,
        config.inference.model,
        config
            .inference
            .fallback_model
            .as_deref()
            .map(|m| format!(" (fallback: {})", m))
            .unwrap_or_default()
    )
}
