use chrono::Utc;
use persona_analysis::render_report;
use persona_core::artifact::load_persona;
use std::path::Path;

pub fn run(file: &Path) -> anyhow::Result<()> {
    let persona = load_persona(file)?;
    println!("{}", render_report(&persona, Utc::now()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(run(&temp.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{\"username\": ").unwrap();
        assert!(run(&path).is_err());
    }
}
