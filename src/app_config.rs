//! Config file loading for the `recognitions` CLI (content host, output and playback defaults).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use url::Url;

use recognitions_core::crawler::DEFAULT_MAX_DEPTH;

/// Largest accepted fragment depth.
pub const MAX_DEPTH_LIMIT: usize = 64;

/// `key = value` file configuration for recognitions defaults.
#[derive(Debug, Clone, Default)]
pub struct FileConfig {
    /// Content host pages and sheets are fetched from.
    pub host: Option<Url>,
    /// Where generated snapshots are written.
    pub output_dir: Option<PathBuf>,
    /// Deepest fragment nesting that is still crawled.
    pub max_depth: Option<usize>,
    /// Host serving profile photos.
    pub image_host: Option<Url>,
    /// Admin API endpoint.
    pub admin_base: Option<Url>,
    /// Production host used for publish redirects.
    pub prod_host: Option<String>,
    /// Recognitions slide duration in seconds.
    pub recognitions_duration_secs: Option<u64>,
    /// Dashboards slide duration in seconds.
    pub dashboards_duration_secs: Option<u64>,
    /// Unified carousel slide duration in seconds.
    pub unified_duration_secs: Option<u64>,
    /// Dashboard shown as an iframe when a carousel has no items.
    pub fallback_dashboard_url: Option<Url>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime and CLI constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(max_depth) = self.max_depth
            && !(1..=MAX_DEPTH_LIMIT).contains(&max_depth)
        {
            bail!(
                "Invalid config value for `max_depth`: {max_depth}. Expected range: 1..={MAX_DEPTH_LIMIT}"
            );
        }
        validate_duration_secs("recognitions_duration_secs", self.recognitions_duration_secs)?;
        validate_duration_secs("dashboards_duration_secs", self.dashboards_duration_secs)?;
        validate_duration_secs("unified_duration_secs", self.unified_duration_secs)?;
        if let Some(host) = &self.prod_host
            && host.trim().is_empty()
        {
            bail!("Invalid config value for `prod_host`: expected a host name");
        }
        Ok(())
    }

    /// The configured fragment depth, or the crawler default.
    #[must_use]
    pub fn max_depth_or_default(&self) -> usize {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }
}

fn validate_duration_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the tracing level this setting maps to.
    #[must_use]
    pub fn level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
}

impl LoadedConfig {
    /// The parsed config, or defaults when no file was found.
    #[must_use]
    pub fn file_config(&self) -> FileConfig {
        self.config.clone().unwrap_or_default()
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/recognitions/config.toml`
/// 2. `$HOME/.config/recognitions/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("recognitions")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("recognitions")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from an explicit path, or the default path if present.
///
/// An explicit path must exist; a missing default file means defaults.
pub fn load_file_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = read_config_file(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
        });
    }

    let path = resolve_default_config_path();
    let config = match path.as_deref() {
        Some(path_ref) if path_ref.exists() => Some(read_config_file(path_ref)?),
        _ => None,
    };
    Ok(LoadedConfig { path, config })
}

fn read_config_file(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!(
                "Invalid config syntax on line {}: expected key = value",
                line_index + 1
            );
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let line_number = line_index + 1;

        match key {
            "host" => cfg.host = Some(parse_url_value(key, value, line_number)?),
            "image_host" => cfg.image_host = Some(parse_url_value(key, value, line_number)?),
            "admin_base" => cfg.admin_base = Some(parse_url_value(key, value, line_number)?),
            "fallback_dashboard_url" => {
                cfg.fallback_dashboard_url = Some(parse_url_value(key, value, line_number)?);
            }
            "output_dir" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `output_dir` value on line {line_number}")
                })?;
                cfg.output_dir = Some(PathBuf::from(parsed));
            }
            "prod_host" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `prod_host` value on line {line_number}")
                })?;
                cfg.prod_host = Some(parsed);
            }
            "max_depth" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `max_depth` value on line {line_number}")
                })?;
                let depth = usize::try_from(parsed)
                    .map_err(|_| anyhow::anyhow!("max_depth out of range for usize"))?;
                cfg.max_depth = Some(depth);
            }
            "recognitions_duration_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `recognitions_duration_secs` value on line {line_number}")
                })?;
                cfg.recognitions_duration_secs = Some(parsed);
            }
            "dashboards_duration_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `dashboards_duration_secs` value on line {line_number}")
                })?;
                cfg.dashboards_duration_secs = Some(parsed);
            }
            "unified_duration_secs" => {
                let parsed = parse_integer_u64(value).with_context(|| {
                    format!("Invalid `unified_duration_secs` value on line {line_number}")
                })?;
                cfg.unified_duration_secs = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value).with_context(|| {
                    format!("Invalid `verbosity` value on line {line_number}")
                })?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_number}")
                })?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_url_value(key: &str, raw_value: &str, line_number: usize) -> Result<Url> {
    let parsed = parse_string_literal(raw_value)
        .with_context(|| format!("Invalid `{key}` value on line {line_number}"))?;
    Url::parse(&parsed)
        .with_context(|| format!("Invalid `{key}` URL '{parsed}' on line {line_number}"))
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        _ => bail!("Expected one of: default, verbose, quiet, debug"),
    }
}
