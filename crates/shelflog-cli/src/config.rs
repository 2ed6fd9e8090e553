// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use shelflog_app::{Layout, ListOrder};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;
const SHA256_HEX_LEN: usize = 64;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub auth: Auth,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            ui: Ui::default(),
            auth: Auth::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub db_path: Option<String>,
    pub list_order: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub layout: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Auth {
    pub password_sha256: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("SHELFLOG_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set SHELFLOG_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(shelflog_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version. Add `version = 1` and keep values under [storage], [ui], and [auth]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(db_path) = &self.storage.db_path {
            shelflog_db::validate_db_path(db_path)?;
        }

        if let Some(order) = &self.storage.list_order
            && ListOrder::parse(order).is_none()
        {
            bail!(
                "storage.list_order in {} must be \"created_desc\" or \"name_asc\", got {order:?}",
                path.display()
            );
        }

        if let Some(layout) = &self.ui.layout
            && Layout::parse(layout).is_none()
        {
            bail!(
                "ui.layout in {} must be \"split\" or \"flat\", got {layout:?}",
                path.display()
            );
        }

        if let Some(digest) = &self.auth.password_sha256
            && (digest.len() != SHA256_HEX_LEN || !digest.chars().all(|ch| ch.is_ascii_hexdigit()))
        {
            bail!(
                "auth.password_sha256 in {} must be a 64-character hex SHA-256 digest; generate one with `printf %s 'secret' | sha256sum`",
                path.display()
            );
        }

        Ok(())
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => shelflog_db::default_db_path(),
        }
    }

    pub fn list_order(&self) -> ListOrder {
        self.storage
            .list_order
            .as_deref()
            .and_then(ListOrder::parse)
            .unwrap_or(ListOrder::CreatedDesc)
    }

    pub fn layout(&self) -> Layout {
        self.ui
            .layout
            .as_deref()
            .and_then(Layout::parse)
            .unwrap_or(Layout::Split)
    }

    /// Lowercased digest, or `None` when the tracker is open to anyone.
    pub fn password_digest(&self) -> Option<String> {
        self.auth
            .password_sha256
            .as_deref()
            .map(str::to_ascii_lowercase)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# shelflog config\n# Place this file at: {}\n\nversion = 1\n\n[storage]\n# Optional. Default is platform data dir (for example ~/.local/share/shelflog/shelflog.db)\n# db_path = \"/absolute/path/to/shelflog.db\"\n# created_desc or name_asc\nlist_order = \"{}\"\n\n[ui]\n# split shows in-progress and completed entries in separate tables; flat shows one\nlayout = \"{}\"\n\n[auth]\n# Optional. SHA-256 hex digest of the password asked for at startup.\n# password_sha256 = \"...\"\n",
            path.display(),
            ListOrder::CreatedDesc.as_str(),
            Layout::Split.as_str(),
        )
    }
}

/// Log file location. Logging never goes to the terminal the UI draws on.
pub fn log_path() -> Result<PathBuf> {
    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory for the log file; set XDG_DATA_HOME")
    })?;
    let app_dir = data_root.join(shelflog_db::APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("shelflog.log"))
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use shelflog_app::{Layout, ListOrder};
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    const HUNTER2_SHA256: &str = "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7";

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.layout(), Layout::Split);
        assert_eq!(config.list_order(), ListOrder::CreatedDesc);
        assert_eq!(config.password_digest(), None);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\nlayout = \"flat\"\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[storage], [ui], and [auth]"));
        Ok(())
    }

    #[test]
    fn full_config_parses() -> Result<()> {
        let (_temp, path) = write_config(&format!(
            "version = 1\n[storage]\nlist_order = \"name_asc\"\n[ui]\nlayout = \"flat\"\n[auth]\npassword_sha256 = \"{}\"\n",
            HUNTER2_SHA256.to_ascii_uppercase()
        ))?;

        let config = Config::load(&path)?;
        assert_eq!(config.list_order(), ListOrder::NameAsc);
        assert_eq!(config.layout(), Layout::Flat);
        assert_eq!(config.password_digest().as_deref(), Some(HUNTER2_SHA256));
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_layout_and_order_are_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nlayout = \"grid\"\n")?;
        let error = Config::load(&path).expect_err("bad layout should fail");
        assert!(error.to_string().contains("ui.layout"));

        let (_temp, path) = write_config("version = 1\n[storage]\nlist_order = \"random\"\n")?;
        let error = Config::load(&path).expect_err("bad order should fail");
        assert!(error.to_string().contains("storage.list_order"));
        Ok(())
    }

    #[test]
    fn short_password_digest_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[auth]\npassword_sha256 = \"hunter2\"\n")?;
        let error = Config::load(&path).expect_err("plain password should fail");
        assert!(error.to_string().contains("64-character hex"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("SHELFLOG_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("SHELFLOG_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn db_path_prefers_storage_config_over_env_override() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) =
            write_config("version = 1\n[storage]\ndb_path = \"/explicit/from-config.db\"\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("SHELFLOG_DB_PATH", "/from/env.db");
        }
        let config = Config::load(&path)?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("SHELFLOG_DB_PATH");
        }
        assert_eq!(config.db_path()?, PathBuf::from("/explicit/from-config.db"));
        Ok(())
    }

    #[test]
    fn db_path_uses_env_override_when_storage_db_path_missing() -> Result<()> {
        let _guard = env_lock();
        let (_temp, path) = write_config("version = 1\n")?;
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("SHELFLOG_DB_PATH", "/from/env-only.db");
        }
        let config = Config::load(&path)?;
        let resolved = config.db_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("SHELFLOG_DB_PATH");
        }
        assert_eq!(resolved, PathBuf::from("/from/env-only.db"));
        Ok(())
    }

    #[test]
    fn db_path_rejects_uri_style_storage_value() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[storage]\ndb_path = \"https://evil.example/shelflog.db\"\n")?;
        let error = Config::load(&path).expect_err("URI db_path should fail validation");
        assert!(error.to_string().contains("looks like a URI"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("[storage]"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[auth]"));

        std::fs::write(&path, &example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.layout(), Layout::Split);
        Ok(())
    }
}
