//! Text renderings of a resolved [`EnvVars`] mapping.

use super::builder::EnvVars;
use super::keys::is_sensitive;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Output format for a rendered environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// `KEY=value` lines, readable by `dotenvy` and `docker run --env-file`.
    #[default]
    Dotenv,
    /// `export KEY='value'` lines for `eval` in a POSIX shell.
    Shell,
    /// A JSON object.
    Json,
}

impl std::str::FromStr for RenderFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dotenv" | "env" => Ok(Self::Dotenv),
            "shell" | "sh" => Ok(Self::Shell),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid render format: {s}")),
        }
    }
}

/// Redact a value for display (first 2 and last 2 chars).
pub fn redact_value(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 6 {
        return "***".to_string();
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}…{tail}")
}

/// Render `vars` in `format`. With `redact`, credential values are masked.
pub fn render_env_vars(vars: &EnvVars, format: RenderFormat, redact: bool) -> Result<String> {
    let entries = vars.iter().map(|(name, value)| {
        let value = if redact && is_sensitive(name) {
            redact_value(value)
        } else {
            value.clone()
        };
        (name.as_str(), value)
    });

    let rendered: String = match format {
        RenderFormat::Dotenv => entries
            .map(|(name, value)| format!("{name}={}\n", dotenv_quote(&value)))
            .collect(),
        RenderFormat::Shell => entries
            .map(|(name, value)| format!("export {name}={}\n", shell_quote(&value)))
            .collect(),
        RenderFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = entries
                .map(|(name, value)| (name.to_string(), serde_json::Value::String(value)))
                .collect();
            let mut json = serde_json::to_string_pretty(&map)?;
            json.push('\n');
            json
        }
    };
    Ok(rendered)
}

fn dotenv_quote(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '=' | '\\' | '$'));
    if !needs_quotes {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r#"'\''"#))
}
