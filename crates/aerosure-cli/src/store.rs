//! # Engine State Store
//!
//! Loads and saves the whole engine as pretty-printed JSON. The state
//! file is the deployment: `init` creates it, every other subcommand
//! loads, mutates, and rewrites it.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};

use aerosure_core::{EngineConfig, Principal};
use aerosure_engine::Engine;

/// Create a new engine state file. Refuses to overwrite an existing one.
pub fn init(
    path: &Path,
    owner: Principal,
    first_airline: Principal,
    config_path: Option<&Path>,
) -> anyhow::Result<Engine> {
    if path.exists() {
        bail!("state file {} already exists", path.display());
    }
    let config = match config_path {
        Some(p) => {
            let raw = fs::read_to_string(p)
                .with_context(|| format!("reading config file {}", p.display()))?;
            serde_json::from_str::<EngineConfig>(&raw)
                .with_context(|| format!("parsing config file {}", p.display()))?
        }
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config, owner, first_airline)?;
    save(path, &engine)?;
    Ok(engine)
}

/// Load the engine from its state file.
pub fn load(path: &Path) -> anyhow::Result<Engine> {
    let raw = fs::read_to_string(path).with_context(|| {
        format!(
            "reading state file {} (run `aerosure init` first?)",
            path.display()
        )
    })?;
    serde_json::from_str(&raw).with_context(|| format!("parsing state file {}", path.display()))
}

/// Write the engine back to its state file.
pub fn save(path: &Path, engine: &Engine) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(engine).context("serializing engine state")?;
    fs::write(path, json).with_context(|| format!("writing state file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "state saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerosure_core::Amount;

    fn principal(byte: u8) -> Principal {
        Principal::from_bytes([byte; 20])
    }

    #[test]
    fn test_init_load_save_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerosure.json");

        init(&path, principal(0xA0), principal(1), None).unwrap();
        let mut engine = load(&path).unwrap();
        assert_eq!(engine.owner(), &principal(0xA0));

        engine
            .fund_airline(&principal(1), Amount::from_units(10))
            .unwrap();
        save(&path, &engine).unwrap();

        let reloaded = load(&path).unwrap();
        assert!(reloaded.airline_status(&principal(1)).active);
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerosure.json");
        init(&path, principal(0xA0), principal(1), None).unwrap();
        assert!(init(&path, principal(0xA0), principal(1), None).is_err());
    }

    #[test]
    fn test_init_with_config_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aerosure.json");
        let config_path = dir.path().join("config.json");
        fs::write(&config_path, r#"{"bootstrap_threshold": 2}"#).unwrap();

        let engine = init(&path, principal(0xA0), principal(1), Some(&config_path)).unwrap();
        assert_eq!(engine.config().bootstrap_threshold, 2);
        // Unspecified parameters keep their defaults.
        assert_eq!(engine.config().funding_deposit, Amount::from_units(10));
    }

    #[test]
    fn test_load_missing_file_mentions_init() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.json")).unwrap_err();
        assert!(format!("{err:#}").contains("aerosure init"));
    }
}
