use std::env;

use anyhow::{Context, Result};

static DEBUG_MAP_VAR: &str = "HACKASM_DEBUG_MAP";
static ALLOW_ERRORS_VAR: &str = "HACKASM_ALLOW_ERRORS";

/// Settings for the command line assembler, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Write a `.hdb` debug map next to the `.hack` output.
    pub write_debug_map: bool,
    /// Write output even when some lines failed to parse.
    pub allow_errors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            write_debug_map: true,
            allow_errors: false,
        }
    }
}

impl Config {
    /// Read the configuration, loading a `.env` file first if there is one.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e).context("loading .env");
            }
        }
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            write_debug_map: flag(&var, DEBUG_MAP_VAR)?.unwrap_or(defaults.write_debug_map),
            allow_errors: flag(&var, ALLOW_ERRORS_VAR)?.unwrap_or(defaults.allow_errors),
        })
    }
}

fn flag(var: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>> {
    var(key)
        .map(|value| match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(anyhow::Error::msg(format!(
                "{} must be a boolean, found {}",
                key, other
            ))),
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        assert_eq!(config(&[]).unwrap(), Config::default());
    }

    #[test]
    fn reads_flags() {
        let cfg = config(&[
            ("HACKASM_DEBUG_MAP", "off"),
            ("HACKASM_ALLOW_ERRORS", "1"),
        ])
        .unwrap();
        assert!(!cfg.write_debug_map);
        assert!(cfg.allow_errors);
    }

    #[test]
    fn rejects_garbage() {
        let err = config(&[("HACKASM_DEBUG_MAP", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("HACKASM_DEBUG_MAP"));
    }
}
