use persona_core::ConfigFile;
use persona_store::Paths;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub fn run(interactive: bool) -> anyhow::Result<()> {
    if interactive {
        return run_interactive();
    }

    let config_path = Paths::new()
        .map(|p| p.config_file().display().to_string())
        .unwrap_or_else(|_| "<config dir>/persona/config.json".to_string());
    println!("{}", guide(&config_path));
    Ok(())
}

fn run_interactive() -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let stdin = std::io::stdin();
    let path = prompt_config(&mut stdin.lock(), &mut std::io::stdout(), &paths)?;
    println!("\nSaved credentials to {}", path.display());
    println!("Environment variables still take precedence. Run `persona check` to verify.");
    Ok(())
}

/// Ask for each credential and save `config.json`. A blank answer keeps the
/// current value; end of input stops asking.
fn prompt_config(
    input: &mut impl BufRead,
    out: &mut impl Write,
    paths: &Paths,
) -> anyhow::Result<PathBuf> {
    let mut file = ConfigFile::load(paths)?;
    writeln!(out, "Enter credentials (leave blank to keep the current value)")?;

    let prompts = [
        ("Reddit client ID", &mut file.reddit_client_id),
        ("Reddit client secret", &mut file.reddit_client_secret),
        ("Groq API key", &mut file.groq_api_key),
        ("Groq model (optional)", &mut file.groq_model),
    ];
    for (label, slot) in prompts {
        let hint = if slot.is_some() { " [set]" } else { "" };
        write!(out, "{}{}: ", label, hint)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let answer = line.trim();
        if !answer.is_empty() {
            *slot = Some(answer.to_string());
        }
    }

    let path = paths.config_file();
    persona_store::write_json_pretty(&path, &file)?;
    Ok(path)
}

fn guide(config_path: &str) -> String {
    format!(
        "Reddit Persona Analyzer Setup\n\
         =============================\n\
         \n\
         1. Reddit API\n\
         \x20  - Go to https://www.reddit.com/prefs/apps and create a \"script\" app\n\
         \x20  - Use http://localhost:8080 as the redirect URI\n\
         \x20  - Note the client ID (under the app name) and the client secret\n\
         \n\
         2. Groq API\n\
         \x20  - Go to https://console.groq.com/ and generate an API key\n\
         \n\
         3. Credentials\n\
         \x20  Environment variables (take precedence):\n\
         \x20    export REDDIT_CLIENT_ID=\"your_client_id\"\n\
         \x20    export REDDIT_CLIENT_SECRET=\"your_client_secret\"\n\
         \x20    export GROQ_API_KEY=\"your_groq_api_key\"\n\
         \x20  Optional: REDDIT_USER_AGENT, GROQ_API_URL, GROQ_MODEL, GROQ_FALLBACK_MODEL\n\
         \n\
         \x20  Or a JSON file at {}:\n\
         \x20    {{\"reddit_client_id\": \"...\", \"reddit_client_secret\": \"...\", \"groq_api_key\": \"...\"}}\n\
         \n\
         \x20  Or answer the prompts of `persona setup --interactive`\n\
         \n\
         4. Verify\n\
         \x20  persona check\n\
         \n\
         Usage:\n\
         \x20  persona spez\n\
         \x20  persona https://www.reddit.com/user/spez --limit 50\n\
         \x20  persona spez --output spez.json\n\
         \x20  persona spez --report-only --quiet\n\
         \x20  persona report spez.json\n\
         \n\
         Only public profiles can be analyzed. Respect Reddit's API rate limits.",
        config_path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_names_every_credential() {
        let text = guide("/tmp/persona/config.json");
        for key in ["REDDIT_CLIENT_ID", "REDDIT_CLIENT_SECRET", "GROQ_API_KEY"] {
            assert!(text.contains(key), "missing {}", key);
        }
        assert!(text.contains("/tmp/persona/config.json"));
        assert!(text.contains("\"groq_api_key\""));
        assert!(text.contains("setup --interactive"));
    }

    #[test]
    fn test_prompt_config_writes_answers() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp.path());
        let mut input = "client-id\n  s3cret  \ngsk_abc\n\n".as_bytes();
        let mut out = Vec::new();

        let path = prompt_config(&mut input, &mut out, &paths).unwrap();
        assert_eq!(path, paths.config_file());

        let saved = ConfigFile::load(&paths).unwrap();
        assert_eq!(saved.reddit_client_id.as_deref(), Some("client-id"));
        assert_eq!(saved.reddit_client_secret.as_deref(), Some("s3cret"));
        assert_eq!(saved.groq_api_key.as_deref(), Some("gsk_abc"));
        assert!(saved.groq_model.is_none());

        let prompts = String::from_utf8(out).unwrap();
        assert!(prompts.contains("Reddit client ID: "));
        assert!(prompts.contains("Groq model (optional): "));
    }

    #[test]
    fn test_prompt_config_keeps_blank_answers() {
        let temp = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp.path());
        let existing = ConfigFile {
            reddit_client_id: Some("old-id".to_string()),
            reddit_client_secret: Some("old-secret".to_string()),
            reddit_user_agent: Some("MyAgent/2.0".to_string()),
            ..ConfigFile::default()
        };
        persona_store::write_json_pretty(&paths.config_file(), &existing).unwrap();

        // blank id, new secret, then input ends
        let mut input = "\nnew-secret\n".as_bytes();
        let mut out = Vec::new();
        prompt_config(&mut input, &mut out, &paths).unwrap();

        let saved = ConfigFile::load(&paths).unwrap();
        assert_eq!(saved.reddit_client_id.as_deref(), Some("old-id"));
        assert_eq!(saved.reddit_client_secret.as_deref(), Some("new-secret"));
        assert_eq!(saved.reddit_user_agent.as_deref(), Some("MyAgent/2.0"));
        assert!(saved.groq_api_key.is_none());
        assert!(String::from_utf8(out).unwrap().contains("Reddit client ID [set]: "));
    }
}
