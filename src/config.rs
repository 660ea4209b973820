use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub inputs: Inputs,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    /// Pretty-print the emitted JSON context.
    #[serde(default)]
    pub pretty: bool,
    /// Stderr log threshold: off, error, warn, info, debug, trace.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".into()
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Inputs {
    /// Additional environment keys captured verbatim into the emitted
    /// context's `extra` map.
    #[serde(default)]
    pub extra: Vec<String>,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    inputs: InputsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    pretty: Option<bool>,
    log_level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct InputsOverlay {
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    extra: Vec<String>,
    #[serde(default)]
    remove_extra: Vec<String>,
}

// ── Merge logic ──

/// Merge a user list into a default list.
/// In replace mode: user list replaces default entirely.
/// In merge mode: remove items first, then extend with additions (deduped).
fn merge_list(base: &mut Vec<String>, add: Vec<String>, remove: &[String], replace: bool) {
    if replace {
        *base = add;
    } else {
        base.retain(|item| !remove.contains(item));
        for item in add {
            if !base.contains(&item) {
                base.push(item);
            }
        }
    }
}

impl Config {
    /// Load the default embedded configuration.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Load configuration with resolution order:
    /// 1. Start with embedded defaults
    /// 2. Merge user overlay from ~/.config/stepctx/config.toml (if exists)
    ///
    /// User config merges with defaults: lists extend, scalars override.
    /// Set `replace = true` in the inputs section to replace its defaults
    /// entirely. Use `remove_extra` to subtract specific items.
    pub fn load() -> Self {
        let mut config = Self::default_config();
        if let Some(overlay) = Self::load_overlay() {
            config.apply_overlay(overlay);
        }
        config
    }

    /// Try to load user overlay from ~/.config/stepctx/config.toml.
    fn load_overlay() -> Option<ConfigOverlay> {
        let home = std::env::var_os("HOME")?;
        let path = std::path::Path::new(&home).join(".config/stepctx/config.toml");
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(overlay) => Some(overlay),
            Err(e) => {
                eprintln!("stepctx: config parse error: {e}");
                None
            }
        }
    }

    /// Apply an overlay on top of this config (merge semantics).
    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        // Settings: scalar overrides
        if let Some(v) = overlay.settings.pretty {
            self.settings.pretty = v;
        }
        if let Some(v) = overlay.settings.log_level {
            self.settings.log_level = v;
        }

        // Inputs
        let i = overlay.inputs;
        merge_list(&mut self.inputs.extra, i.extra, &i.remove_extra, i.replace);
    }

    /// Apply an overlay from a TOML string. Used for testing.
    #[cfg(test)]
    fn apply_overlay_str(&mut self, toml_str: &str) {
        let overlay: ConfigOverlay = toml::from_str(toml_str).unwrap();
        self.apply_overlay(overlay);
    }
}
