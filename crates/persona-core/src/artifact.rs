//! Persisted persona artifact

use crate::Persona;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Default artifact name: `persona_<username>_<YYYYmmdd_HHMMSS>.json`
pub fn default_file_name(username: &str, generated_at: DateTime<Utc>) -> PathBuf {
    PathBuf::from(format!(
        "persona_{}_{}.json",
        username,
        generated_at.format("%Y%m%d_%H%M%S")
    ))
}

/// Write the full persona as pretty JSON
pub fn save_persona(persona: &Persona, path: &Path) -> anyhow::Result<()> {
    persona_store::write_json_pretty(path, persona)?;
    tracing::debug!(path = %path.display(), "persona artifact written");
    Ok(())
}

/// Read a persona artifact written by [`save_persona`]
pub fn load_persona(path: &Path) -> anyhow::Result<Persona> {
    persona_store::read_json(path)?
        .ok_or_else(|| anyhow::anyhow!("persona artifact not found: {}", path.display()))
}
