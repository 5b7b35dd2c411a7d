use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use crate::config::AppConfig;
use crate::session::SessionGate;
use crate::store::FileStore;

/// Directory holding the CLI's durable state (`session.json`)
pub fn get_config_dir(app: &AppConfig) -> anyhow::Result<PathBuf> {
    let config_dir = match &app.storage.config_dir {
        Some(dir) => dir.clone(),
        None => {
            let home = std::env::var("HOME")
                .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
            PathBuf::from(home).join(".config").join("massage-admin")
        }
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn session_store(app: &AppConfig) -> anyhow::Result<FileStore> {
    Ok(FileStore::in_dir(get_config_dir(app)?))
}

/// Gate over the CLI's session file, already initialized
pub fn open_gate(app: &AppConfig) -> anyhow::Result<SessionGate<FileStore>> {
    let store = session_store(app)?;
    let path = store.path().to_path_buf();
    let mut gate = SessionGate::new(store);
    gate.initialize()
        .with_context(|| format!("failed to read session from {}", path.display()))?;
    Ok(gate)
}

/// Gate for the commands that replace or drop the session (`auth login`,
/// `auth logout`). An unreadable session file leaves the gate failed closed
/// to anonymous; those commands then rewrite or remove the file.
pub fn open_gate_for_reset(app: &AppConfig) -> anyhow::Result<SessionGate<FileStore>> {
    let store = session_store(app)?;
    let path = store.path().to_path_buf();
    let mut gate = SessionGate::new(store);
    if let Err(e) = gate.initialize() {
        tracing::warn!(
            "Ignoring unreadable session in {}: {:#}",
            path.display(),
            anyhow::Error::from(e)
        );
    }
    Ok(gate)
}
