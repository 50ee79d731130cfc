use std::path::PathBuf;

use trajectory_core::DEFAULT_MAX_DISPLAY_DEPTH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandMode {
    /// Roots only.
    None,
    /// Everything "expand all" would reveal at the display bound.
    All,
}

impl ExpandMode {
    fn from_env(value: &str) -> anyhow::Result<Self> {
        match value {
            "none" => Ok(Self::None),
            "all" => Ok(Self::All),
            other => Err(anyhow::anyhow!(
                "Invalid TRAJECTORY_EXPAND '{other}'. Expected 'none' or 'all'"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Trajectory JSON document to inspect
    pub trajectory_file: PathBuf,
    /// Deepest level that may be shown at once
    pub max_display_depth: u32,
    /// Initial expansion applied before printing
    pub expand: ExpandMode,
    /// Print tool-call rows under every subcall that has them
    pub show_tools: bool,
    /// Warn when the producer summary disagrees with the tree
    pub audit_summary: bool,
}

impl Config {
    /// Build config from the process environment (after loading `.env`).
    pub fn from_env(path_arg: Option<String>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(path_arg, |key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source. A positional path
    /// argument takes precedence over `TRAJECTORY_FILE`.
    pub fn from_lookup<F>(path_arg: Option<String>, lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let trajectory_file = path_arg
            .or_else(|| lookup("TRAJECTORY_FILE"))
            .map(PathBuf::from)
            .ok_or_else(|| {
                anyhow::anyhow!("No trajectory given. Pass a path or set TRAJECTORY_FILE")
            })?;

        let max_display_depth = env_parse(
            &lookup,
            "TRAJECTORY_MAX_DISPLAY_DEPTH",
            DEFAULT_MAX_DISPLAY_DEPTH,
        )?;
        if max_display_depth == 0 {
            return Err(anyhow::anyhow!(
                "TRAJECTORY_MAX_DISPLAY_DEPTH must be at least 1"
            ));
        }

        Ok(Self {
            trajectory_file,
            max_display_depth,
            expand: ExpandMode::from_env(&env_str(&lookup, "TRAJECTORY_EXPAND", "all"))?,
            show_tools: env_parse(&lookup, "TRAJECTORY_SHOW_TOOLS", false)?,
            audit_summary: env_parse(&lookup, "TRAJECTORY_AUDIT_SUMMARY", true)?,
        })
    }
}

fn env_str<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}

fn env_parse<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(val) => val
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Failed to parse env var {key}={val}: {e}")),
        None => Ok(default),
    }
}
