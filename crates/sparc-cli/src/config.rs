use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use sparc_export::display::DisplayFormat;
use sparc_export::file::ExportOptions;
use sparc_export::xlsx::DEFAULT_SHEET_NAME;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparcConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    pub config_version: u32,
    /// Whose entries and survey the CLI acts on. Also stamped on audit events.
    pub user_id: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub log_format: LogFormat,
    /// Where `export` writes files when `--out` is not given. `None` is the
    /// working directory.
    pub export_dir: Option<PathBuf>,
    pub sheet_name: String,
    /// Added in v1.
    pub display: DisplayFormat,
}

impl Default for SparcConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            user_id: "local".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            export_dir: None,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            display: DisplayFormat::default(),
        }
    }
}

impl SparcConfig {
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            sheet_name: self.sheet_name.clone(),
            display: self.display.clone(),
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("sparc").join("config.json"))
}

/// A loaded config plus the on-disk version it was migrated from, if any.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: SparcConfig,
    pub migrated_from: Option<u32>,
}

/// Load the config at `path`, running migrations first. A missing file
/// yields the defaults.
pub fn load_config_from(path: &Path) -> eyre::Result<SparcConfig> {
    Ok(read_config(path)?.config)
}

/// Like [`load_config_from`], also reporting whether a migration ran so the
/// caller can log it once logging is up.
pub fn read_config(path: &Path) -> eyre::Result<LoadedConfig> {
    if !path.exists() {
        return Ok(LoadedConfig {
            config: SparcConfig::default(),
            migrated_from: None,
        });
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = config_version(&json)?;

    let migrated = migrate(json, on_disk_version)?;
    let config: SparcConfig = serde_json::from_value(migrated)?;
    Ok(LoadedConfig {
        config,
        migrated_from: (on_disk_version < CURRENT_VERSION).then_some(on_disk_version),
    })
}

/// `config_version` from raw JSON. Missing or null is 0; anything that is
/// not a `u32` is rejected.
fn config_version(json: &serde_json::Value) -> eyre::Result<u32> {
    match json.get("config_version") {
        None | Some(serde_json::Value::Null) => Ok(0),
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| eyre::eyre!("config_version {value} is not a valid version number")),
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update sparc."
        ));
    }

    // v0 → v1: spreadsheet display settings
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if !obj.contains_key("display") {
            obj.insert(
                "display".to_string(),
                serde_json::to_value(DisplayFormat::default())?,
            );
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added display)");
    }

    Ok(json)
}

pub fn save_config_to(path: &Path, config: &SparcConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn delete_config_at(path: &Path) -> eyre::Result<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}
