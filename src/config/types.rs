use crate::env::keys;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

/// Worker bindings consumed by [`crate::env::build_env_vars`].
///
/// Every field is optional. On the wire (process environment, `.env`, JSON,
/// YAML, TOML) fields use their upper-case variable names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", default)]
pub struct WorkerEnv {
    /// AI gateway endpoint; its path suffix selects the provider surface.
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub ai_gateway_base_url: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub ai_gateway_api_key: Option<String>,
    /// Upstream provider key, used in compat mode only.
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub ai_gateway_provider_api_key: Option<String>,
    /// Model prefix for compat mode.
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub ai_gateway_custom_provider: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub anthropic_api_key: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub anthropic_base_url: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub moltbot_gateway_token: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub dev_mode: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub clawdbot_bind_mode: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub telegram_bot_token: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub telegram_dm_policy: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub discord_bot_token: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub discord_dm_policy: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub slack_bot_token: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub slack_app_token: Option<String>,
    /// Shared secret for the browser (CDP) endpoint.
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub cdp_secret: Option<String>,
    #[serde(deserialize_with = "scalar_string", skip_serializing_if = "Option::is_none")]
    pub worker_url: Option<String>,
}

impl WorkerEnv {
    /// Collect recognised variables from `(name, value)` pairs; other names are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut env = Self::default();
        for (name, value) in vars {
            env.set(name.as_ref(), value);
        }
        env
    }

    /// Read recognised variables from the current process environment.
    ///
    /// Non-UTF-8 values are skipped.
    pub fn from_process_env() -> Self {
        Self::from_vars(std::env::vars_os().filter_map(|(name, value)| {
            let name = name.into_string().ok()?;
            if !keys::INPUT_VARS.iter().any(|known| *known == name) {
                return None;
            }
            Some((name, value.into_string().ok()?))
        }))
    }

    /// Value of a variable by its upper-case name.
    pub fn get(&self, name: &str) -> Option<&str> {
        match name {
            keys::AI_GATEWAY_BASE_URL => self.ai_gateway_base_url.as_deref(),
            keys::AI_GATEWAY_API_KEY => self.ai_gateway_api_key.as_deref(),
            keys::AI_GATEWAY_PROVIDER_API_KEY => self.ai_gateway_provider_api_key.as_deref(),
            keys::AI_GATEWAY_CUSTOM_PROVIDER => self.ai_gateway_custom_provider.as_deref(),
            keys::ANTHROPIC_API_KEY => self.anthropic_api_key.as_deref(),
            keys::OPENAI_API_KEY => self.openai_api_key.as_deref(),
            keys::ANTHROPIC_BASE_URL => self.anthropic_base_url.as_deref(),
            keys::MOLTBOT_GATEWAY_TOKEN => self.moltbot_gateway_token.as_deref(),
            keys::DEV_MODE => self.dev_mode.as_deref(),
            keys::CLAWDBOT_BIND_MODE => self.clawdbot_bind_mode.as_deref(),
            keys::TELEGRAM_BOT_TOKEN => self.telegram_bot_token.as_deref(),
            keys::TELEGRAM_DM_POLICY => self.telegram_dm_policy.as_deref(),
            keys::DISCORD_BOT_TOKEN => self.discord_bot_token.as_deref(),
            keys::DISCORD_DM_POLICY => self.discord_dm_policy.as_deref(),
            keys::SLACK_BOT_TOKEN => self.slack_bot_token.as_deref(),
            keys::SLACK_APP_TOKEN => self.slack_app_token.as_deref(),
            keys::CDP_SECRET => self.cdp_secret.as_deref(),
            keys::WORKER_URL => self.worker_url.as_deref(),
            _ => None,
        }
    }

    /// Set a variable by its upper-case name. Returns `false` for unknown names.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.slot_mut(name) {
            Some(slot) => {
                *slot = Some(value.into());
                true
            }
            None => false,
        }
    }

    /// Overlay `other` onto `self`: every non-blank value in `other` wins.
    pub fn merge_from(&mut self, other: &WorkerEnv) {
        for name in keys::INPUT_VARS {
            if let Some(value) = other.get(name).filter(|v| !v.trim().is_empty()) {
                self.set(name, value);
            }
        }
    }

    /// Names of the variables currently set (possibly to blank values).
    pub fn present_vars(&self) -> impl Iterator<Item = &'static str> + '_ {
        keys::INPUT_VARS
            .iter()
            .copied()
            .filter(move |name| self.get(name).is_some())
    }

    fn slot_mut(&mut self, name: &str) -> Option<&mut Option<String>> {
        let slot = match name {
            keys::AI_GATEWAY_BASE_URL => &mut self.ai_gateway_base_url,
            keys::AI_GATEWAY_API_KEY => &mut self.ai_gateway_api_key,
            keys::AI_GATEWAY_PROVIDER_API_KEY => &mut self.ai_gateway_provider_api_key,
            keys::AI_GATEWAY_CUSTOM_PROVIDER => &mut self.ai_gateway_custom_provider,
            keys::ANTHROPIC_API_KEY => &mut self.anthropic_api_key,
            keys::OPENAI_API_KEY => &mut self.openai_api_key,
            keys::ANTHROPIC_BASE_URL => &mut self.anthropic_base_url,
            keys::MOLTBOT_GATEWAY_TOKEN => &mut self.moltbot_gateway_token,
            keys::DEV_MODE => &mut self.dev_mode,
            keys::CLAWDBOT_BIND_MODE => &mut self.clawdbot_bind_mode,
            keys::TELEGRAM_BOT_TOKEN => &mut self.telegram_bot_token,
            keys::TELEGRAM_DM_POLICY => &mut self.telegram_dm_policy,
            keys::DISCORD_BOT_TOKEN => &mut self.discord_bot_token,
            keys::DISCORD_DM_POLICY => &mut self.discord_dm_policy,
            keys::SLACK_BOT_TOKEN => &mut self.slack_bot_token,
            keys::SLACK_APP_TOKEN => &mut self.slack_app_token,
            keys::CDP_SECRET => &mut self.cdp_secret,
            keys::WORKER_URL => &mut self.worker_url,
            _ => return None,
        };
        Some(slot)
    }
}

/// Accept strings, booleans and numbers (`DEV_MODE: true` in YAML/TOML).
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string, boolean or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_vars_ignores_unknown_names() {
        let env = WorkerEnv::from_vars([("ANTHROPIC_API_KEY", "k"), ("PATH", "/bin")]);
        assert_eq!(env.anthropic_api_key.as_deref(), Some("k"));
        assert_eq!(env.present_vars().collect::<Vec<_>>(), vec!["ANTHROPIC_API_KEY"]);
    }

    #[test]
    fn get_and_set_cover_every_input_var() {
        let mut env = WorkerEnv::default();
        for name in keys::INPUT_VARS {
            assert!(env.set(name, format!("v-{name}")));
        }
        for name in keys::INPUT_VARS {
            assert_eq!(env.get(name), Some(format!("v-{name}").as_str()));
        }
        assert!(!env.set("UNKNOWN", "x"));
        assert_eq!(env.get("UNKNOWN"), None);
    }

    #[test]
    fn merge_prefers_non_empty_overlay() {
        let mut base = WorkerEnv::from_vars([
            ("OPENAI_API_KEY", "file"),
            ("WORKER_URL", "https://w"),
            ("ANTHROPIC_API_KEY", "real"),
        ]);
        let overlay = WorkerEnv::from_vars([
            ("OPENAI_API_KEY", "env"),
            ("WORKER_URL", ""),
            ("ANTHROPIC_API_KEY", "  "),
        ]);
        base.merge_from(&overlay);
        assert_eq!(base.openai_api_key.as_deref(), Some("env"));
        assert_eq!(base.worker_url.as_deref(), Some("https://w"));
        assert_eq!(base.anthropic_api_key.as_deref(), Some("real"));

        let vars = crate::env::build_env_vars(&base);
        assert_eq!(vars.get("ANTHROPIC_API_KEY").map(String::as_str), Some("real"));
    }

    #[test]
    fn deserializes_upper_case_names_and_scalars() {
        let env: WorkerEnv = serde_json::from_str(
            r#"{"AI_GATEWAY_BASE_URL": "https://x/openai", "DEV_MODE": true, "DISCORD_DM_POLICY": null}"#,
        )
        .unwrap();
        assert_eq!(env.ai_gateway_base_url.as_deref(), Some("https://x/openai"));
        assert_eq!(env.dev_mode.as_deref(), Some("true"));
        assert_eq!(env.discord_dm_policy, None);
    }

    #[test]
    fn rejects_nested_values() {
        let result: Result<WorkerEnv, _> = serde_json::from_str(r#"{"WORKER_URL": ["a"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_only_set_fields() {
        let env = WorkerEnv::from_vars([("CDP_SECRET", "s")]);
        assert_eq!(serde_json::to_string(&env).unwrap(), r#"{"CDP_SECRET":"s"}"#);
    }
}
