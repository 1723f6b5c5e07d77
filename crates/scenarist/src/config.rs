use anyhow::Result;
use directories::ProjectDirs;
use scenario_core::{Color, StyleConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs::try_exists;

const DEFAULT_TEXT_COLOR: &str = "#000000";
const DEFAULT_NONPRINTABLE_TEXT_COLOR: &str = "#808080";
const DEFAULT_FOLDER_BACKGROUND_COLOR: &str = "#d3d3d3";
const DEFAULT_FOLDER_TEXT_COLOR: &str = "#000000";

/// Scenario editor settings as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "scenario-editor/text-color", default = "default_text_color")]
    pub text_color: String,
    #[serde(
        rename = "scenario-editor/nonprintable-text-color",
        default = "default_nonprintable_text_color"
    )]
    pub nonprintable_text_color: String,
    #[serde(
        rename = "scenario-editor/folder-background-color",
        default = "default_folder_background_color"
    )]
    pub folder_background_color: String,
    #[serde(
        rename = "scenario-editor/folder-text-color",
        default = "default_folder_text_color"
    )]
    pub folder_text_color: String,
}

fn default_text_color() -> String {
    String::from(DEFAULT_TEXT_COLOR)
}

fn default_nonprintable_text_color() -> String {
    String::from(DEFAULT_NONPRINTABLE_TEXT_COLOR)
}

fn default_folder_background_color() -> String {
    String::from(DEFAULT_FOLDER_BACKGROUND_COLOR)
}

fn default_folder_text_color() -> String {
    String::from(DEFAULT_FOLDER_TEXT_COLOR)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            text_color: default_text_color(),
            nonprintable_text_color: default_nonprintable_text_color(),
            folder_background_color: default_folder_background_color(),
            folder_text_color: default_folder_text_color(),
        }
    }
}

impl Settings {
    pub async fn load() -> Result<Self> {
        if let Some(settings_path) = Self::settings_path() {
            if try_exists(&settings_path).await? {
                match tokio::fs::read_to_string(&settings_path).await {
                    Ok(content) => {
                        if content.trim().is_empty() {
                            log::warn!("Settings file is empty, creating new one");
                            let defaults = Self::default();
                            let _ = defaults.save().await;
                            return Ok(defaults);
                        }

                        match serde_json::from_str::<Self>(&content) {
                            Ok(mut settings) => {
                                settings.validate()?;
                                log::info!(
                                    "Successfully loaded settings from: {}",
                                    settings_path.display()
                                );
                                return Ok(settings);
                            }
                            Err(json_err) => {
                                log::error!("Failed to parse settings file: {}", json_err);

                                // Keep the broken file around before it gets rewritten
                                let backup_path = settings_path.with_extension("bak");
                                if let Err(e) = tokio::fs::copy(&settings_path, &backup_path).await
                                {
                                    log::warn!("Failed to backup broken settings: {}", e);
                                } else {
                                    log::info!(
                                        "Backed up broken settings to: {}",
                                        backup_path.display()
                                    );
                                }

                                let mut settings = Self::salvage(&content);
                                settings.validate()?;
                                let _ = settings.save().await;
                                return Ok(settings);
                            }
                        }
                    }
                    Err(io_err) => {
                        log::error!("Failed to read settings file: {}", io_err);
                    }
                }
            } else {
                log::info!("Settings file does not exist, creating default");
            }
        }

        let defaults = Self::default();
        let _ = defaults.save().await;
        Ok(defaults)
    }

    /// Recover the colors that are still readable from a document that does
    /// not deserialize as a whole. Every other key takes its default.
    fn salvage(content: &str) -> Self {
        let mut settings = Self::default();
        let map = match serde_json::from_str::<serde_json::Value>(content) {
            Ok(serde_json::Value::Object(map)) => map,
            _ => {
                log::warn!("Settings file is not a JSON object, using all defaults");
                return settings;
            }
        };

        for (key, value, _) in settings.fields_mut() {
            match map.get(key).and_then(|v| v.as_str()) {
                Some(color) => *value = color.to_string(),
                None => log::warn!("{} is missing or not a string, using default", key),
            }
        }
        settings
    }

    fn fields_mut(&mut self) -> [(&'static str, &mut String, &'static str); 4] {
        [
            (
                "scenario-editor/text-color",
                &mut self.text_color,
                DEFAULT_TEXT_COLOR,
            ),
            (
                "scenario-editor/nonprintable-text-color",
                &mut self.nonprintable_text_color,
                DEFAULT_NONPRINTABLE_TEXT_COLOR,
            ),
            (
                "scenario-editor/folder-background-color",
                &mut self.folder_background_color,
                DEFAULT_FOLDER_BACKGROUND_COLOR,
            ),
            (
                "scenario-editor/folder-text-color",
                &mut self.folder_text_color,
                DEFAULT_FOLDER_TEXT_COLOR,
            ),
        ]
    }

    pub async fn save(&self) -> Result<()> {
        if let Some(settings_path) = Self::settings_path() {
            // Never write a color the registry cannot read back
            let mut to_save = self.clone();
            to_save.validate()?;

            if let Some(parent) = settings_path.parent() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    return Err(anyhow::anyhow!(
                        "設定ディレクトリの作成に失敗しました: {} - {}",
                        parent.display(),
                        e
                    ));
                }
                log::debug!("Settings directory exists or was created: {}", parent.display());
            }

            // Serialize and save with error handling
            let content = serde_json::to_string_pretty(&to_save)
                .map_err(|e| anyhow::anyhow!("設定のシリアライズに失敗しました: {}", e))?;
            tokio::fs::write(&settings_path, content)
                .await
                .map_err(|e| {
                    anyhow::anyhow!(
                        "設定ファイルの書き込みに失敗しました: {} - {}",
                        settings_path.display(),
                        e
                    )
                })?;
            log::info!("Successfully saved settings to: {}", settings_path.display());
        }
        Ok(())
    }

    /// Replace every value that is not a valid color with its default.
    pub fn validate(&mut self) -> Result<()> {
        let mut has_issues = false;

        for (key, value, default) in self.fields_mut() {
            if let Err(e) = value.parse::<Color>() {
                log::warn!("Invalid {}: {} ({}), using default", key, value, e);
                *value = default.to_string();
                has_issues = true;
            }
        }

        if has_issues {
            log::info!("Settings validation completed with corrections");
        }

        Ok(())
    }

    /// Snapshot of the colors the style registry needs.
    pub fn style_config(&self) -> Result<StyleConfig> {
        Ok(StyleConfig {
            text_color: self.text_color.parse()?,
            nonprintable_text_color: self.nonprintable_text_color.parse()?,
            folder_background_color: self.folder_background_color.parse()?,
            folder_text_color: self.folder_text_color.parse()?,
        })
    }

    fn settings_path() -> Option<PathBuf> {
        // Explicit file, then directory, then the platform config dir
        if let Ok(path) = std::env::var("SCENARIST_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(dir) = std::env::var("SCENARIST_CONFIG_DIR") {
            return Some(PathBuf::from(dir).join("settings.json"));
        }

        ProjectDirs::from("com", "scenarist", "scenarist")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;
    use tempfile::TempDir;
    use tokio::sync::{Mutex, MutexGuard};

    // Settings location comes from a process-wide env var.
    async fn settings_test_lock() -> MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(())).lock().await
    }

    fn set_settings_path(path: &std::path::Path) -> Option<String> {
        let previous = std::env::var("SCENARIST_CONFIG_PATH").ok();
        std::env::set_var("SCENARIST_CONFIG_PATH", path);
        previous
    }

    fn restore_settings_env(previous: Option<String>) {
        match previous {
            Some(value) => std::env::set_var("SCENARIST_CONFIG_PATH", value),
            None => std::env::remove_var("SCENARIST_CONFIG_PATH"),
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.text_color, "#000000");
        assert_eq!(settings.nonprintable_text_color, "#808080");
        assert_eq!(settings.folder_background_color, "#d3d3d3");
        assert_eq!(settings.folder_text_color, "#000000");
        assert_eq!(settings.style_config().unwrap(), StyleConfig::default());
    }

    #[test]
    fn test_serialized_keys() {
        let json = serde_json::to_string_pretty(&Settings::default()).unwrap();
        assert!(json.contains("\"scenario-editor/text-color\""));
        assert!(json.contains("\"scenario-editor/nonprintable-text-color\""));
        assert!(json.contains("\"scenario-editor/folder-background-color\""));
        assert!(json.contains("\"scenario-editor/folder-text-color\""));
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let settings: Settings =
            serde_json::from_str(r##"{"scenario-editor/folder-text-color": "#445566"}"##).unwrap();
        assert_eq!(settings.folder_text_color, "#445566");
        assert_eq!(settings.text_color, "#000000");
    }

    #[test]
    fn test_validate_replaces_bad_colors() {
        let mut settings = Settings {
            text_color: String::from("black"),
            folder_background_color: String::from("#12"),
            ..Settings::default()
        };
        settings.validate().unwrap();
        assert_eq!(settings.text_color, "#000000");
        assert_eq!(settings.folder_background_color, "#d3d3d3");
        assert!(settings.style_config().is_ok());
    }

    #[test]
    fn test_style_config_rejects_unvalidated_values() {
        let settings = Settings {
            folder_text_color: String::from("teal"),
            ..Settings::default()
        };
        assert!(settings.style_config().is_err());
    }

    #[tokio::test]
    async fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("settings.json");
        let _guard = settings_test_lock().await;
        let previous = set_settings_path(&path);

        let settings = Settings::load().await.unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.exists());

        restore_settings_env(previous);
    }

    #[tokio::test]
    async fn test_load_backs_up_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let _guard = settings_test_lock().await;
        let previous = set_settings_path(&path);

        let settings = Settings::load().await.unwrap();
        assert_eq!(settings, Settings::default());
        assert!(path.with_extension("bak").exists());

        restore_settings_env(previous);
    }

    #[tokio::test]
    async fn test_load_keeps_readable_keys_of_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r##"{"scenario-editor/text-color": 5, "scenario-editor/folder-text-color": "#445566"}"##,
        )
        .unwrap();
        let _guard = settings_test_lock().await;
        let previous = set_settings_path(&path);

        let settings = Settings::load().await.unwrap();
        assert_eq!(settings.text_color, "#000000");
        assert_eq!(settings.folder_text_color, "#445566");
        assert!(path.with_extension("bak").exists());

        // The repaired document is what gets written back
        let rewritten: Settings =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(rewritten, settings);

        restore_settings_env(previous);
    }

    #[test]
    fn test_salvage_keeps_string_values_unvalidated() {
        let settings = Settings::salvage(r#"{"scenario-editor/folder-background-color": "grey"}"#);
        assert_eq!(settings.folder_background_color, "grey");
        assert_eq!(Settings::salvage("[1, 2]"), Settings::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        let _guard = settings_test_lock().await;
        let previous = set_settings_path(&path);

        let settings = Settings {
            folder_background_color: String::from("#112233"),
            ..Settings::default()
        };
        settings.save().await.unwrap();

        let loaded = Settings::load().await.unwrap();
        assert_eq!(loaded.folder_background_color, "#112233");

        restore_settings_env(previous);
    }
}
