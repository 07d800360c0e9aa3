use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ToolError, ToolResult};
use crate::surface::Size;

pub const PREFERENCES_FILENAME: &str = "tool_panel.json";
pub const PREFERENCES_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelPreferences {
    pub version: String,
    /// Height reserved by the placeholder when no tool applies.
    pub empty_panel_height: u32,
    pub tool_panel_height: u32,
    pub placeholder_width: u32,
    pub layer_update_panel_width: u32,
    pub recursive_selection: bool,
}

impl Default for PanelPreferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION.to_string(),
            empty_panel_height: 85,
            tool_panel_height: 50,
            placeholder_width: 50,
            layer_update_panel_width: 60,
            recursive_selection: false,
        }
    }
}

impl PanelPreferences {
    pub fn placeholder_size(&self) -> Size {
        Size::new(self.placeholder_width, self.empty_panel_height)
    }

    pub fn layer_update_size(&self) -> Size {
        Size::new(self.layer_update_panel_width, self.tool_panel_height)
    }
}

pub fn load_or_create_preferences(dir: &Path) -> ToolResult<PanelPreferences> {
    std::fs::create_dir_all(dir).map_err(|error| {
        ToolError::Config(format!(
            "failed to create preferences directory {}: {error}",
            dir.display()
        ))
    })?;

    let path = dir.join(PREFERENCES_FILENAME);
    if !path.exists() {
        let preferences = PanelPreferences::default();
        write_preferences(&path, &preferences)?;
        return Ok(preferences);
    }

    let data = std::fs::read_to_string(&path).map_err(|error| {
        ToolError::Config(format!(
            "failed to read preferences {}: {error}",
            path.display()
        ))
    })?;
    let mut preferences: PanelPreferences = serde_json::from_str(&data).map_err(|error| {
        ToolError::Config(format!(
            "failed to parse preferences {}: {error}",
            path.display()
        ))
    })?;

    if preferences.version != PREFERENCES_VERSION {
        preferences = migrate_preferences(preferences)?;
        write_preferences(&path, &preferences)?;
    }

    Ok(preferences)
}

/// Brings preferences written by another version up to date.
///
/// Fields missing from older files already took their defaults while
/// parsing. Files from a newer release are refused rather than downgraded.
pub fn migrate_preferences(preferences: PanelPreferences) -> ToolResult<PanelPreferences> {
    if is_newer_version(&preferences.version, PREFERENCES_VERSION) {
        return Err(ToolError::Config(format!(
            "preferences version {} is newer than supported {PREFERENCES_VERSION}",
            preferences.version
        )));
    }
    tracing::info!(
        "migrating panel preferences from {} to {PREFERENCES_VERSION}",
        preferences.version
    );
    Ok(PanelPreferences {
        version: PREFERENCES_VERSION.to_string(),
        ..preferences
    })
}

fn is_newer_version(version: &str, current: &str) -> bool {
    let parts = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.parse().unwrap_or(0))
            .collect()
    };
    parts(version) > parts(current)
}

pub fn write_preferences(path: &Path, preferences: &PanelPreferences) -> ToolResult<()> {
    let data = serde_json::to_string_pretty(preferences)?;
    std::fs::write(path, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let preferences = load_or_create_preferences(dir.path()).expect("load");

        assert_eq!(preferences, PanelPreferences::default());
        assert!(dir.path().join(PREFERENCES_FILENAME).exists());
        assert_eq!(preferences.placeholder_size(), Size::new(50, 85));
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut custom = PanelPreferences::default();
        custom.recursive_selection = true;
        custom.empty_panel_height = 120;
        write_preferences(&dir.path().join(PREFERENCES_FILENAME), &custom).expect("write");

        let loaded = load_or_create_preferences(dir.path()).expect("load");
        assert!(loaded.recursive_selection);
        assert_eq!(loaded.placeholder_size(), Size::new(50, 120));
    }

    #[test]
    fn older_version_is_migrated_and_rewritten() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(PREFERENCES_FILENAME);
        std::fs::write(&path, r#"{ "version": "0.9.0", "empty_panel_height": 100 }"#)
            .expect("write");

        let loaded = load_or_create_preferences(dir.path()).expect("load");
        assert_eq!(loaded.version, PREFERENCES_VERSION);
        assert_eq!(loaded.empty_panel_height, 100);
        assert_eq!(loaded.placeholder_width, 50);

        let rewritten = std::fs::read_to_string(&path).expect("read");
        assert!(rewritten.contains(&format!("\"version\": \"{PREFERENCES_VERSION}\"")));
    }

    #[test]
    fn newer_version_is_refused() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(PREFERENCES_FILENAME),
            r#"{ "version": "2.0.0" }"#,
        )
        .expect("write");

        let err = load_or_create_preferences(dir.path()).unwrap_err();
        assert!(matches!(err, ToolError::Config(ref msg) if msg.contains("newer")));
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(PREFERENCES_FILENAME), "{ not json").expect("write");

        let err = load_or_create_preferences(dir.path()).unwrap_err();
        assert!(matches!(err, ToolError::Config(ref msg) if msg.contains("failed to parse")));
    }
}
