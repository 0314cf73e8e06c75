use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Indent JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchConfig {
    /// Keep running after the first snapshot and log every field change.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            refresh_interval_ms: default_refresh_interval_ms(),
        }
    }
}

fn default_refresh_interval_ms() -> u64 {
    5000
}

impl AppConfig {
    /// Reads `CONFIG_FILE`, or `config.toml` when unset. A missing default
    /// file means defaults; a missing explicit file is an error.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::load_from_path(&path),
            Err(_) if !std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => Ok(Self::default()),
            Err(_) => Self::load_from_path(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn load_from_path(path: &str) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.watch.refresh_interval_ms > 0,
            "watch.refresh_interval_ms must be > 0, got {}",
            self.watch.refresh_interval_ms
        );
        Ok(())
    }
}
