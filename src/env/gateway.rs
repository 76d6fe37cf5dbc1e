//! AI gateway endpoint classification.
//!
//! The gateway base URL selects which provider API surface the container
//! talks to. The path suffix decides it:
//!
//! | Suffix     | Mode        | Base URL variable     |
//! |------------|-------------|-----------------------|
//! | `/compat`  | `Compat`    | `OPENAI_BASE_URL`     |
//! | `/openai`  | `OpenAi`    | `OPENAI_BASE_URL`     |
//! | other      | `Anthropic` | `ANTHROPIC_BASE_URL`  |

use super::keys;
use serde::{Deserialize, Serialize};

/// Provider surface exposed by a gateway endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayMode {
    /// OpenAI-compatible surface plus a separate gateway authorization header.
    Compat,
    /// Native OpenAI surface.
    OpenAi,
    /// Native Anthropic surface.
    #[default]
    Anthropic,
}

impl GatewayMode {
    /// Classify a gateway base URL. Trailing slashes are ignored.
    pub fn from_base_url(base_url: &str) -> Self {
        let normalized = normalize_base_url(base_url);
        if normalized.ends_with("/compat") {
            Self::Compat
        } else if normalized.ends_with("/openai") {
            Self::OpenAi
        } else {
            Self::Anthropic
        }
    }

    /// Variable that receives the gateway base URL for this mode.
    pub fn base_url_var(self) -> &'static str {
        match self {
            Self::Compat | Self::OpenAi => keys::OPENAI_BASE_URL,
            Self::Anthropic => keys::ANTHROPIC_BASE_URL,
        }
    }

    /// Variable that receives the gateway API key outside compat mode.
    pub fn api_key_var(self) -> &'static str {
        match self {
            Self::OpenAi => keys::OPENAI_API_KEY,
            Self::Compat | Self::Anthropic => keys::ANTHROPIC_API_KEY,
        }
    }

    /// Lower-case mode name for logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compat => "compat",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
        }
    }
}

impl std::fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strip every trailing `/` from a base URL.
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}
