//! Resolve a [`WorkerEnv`] into the variables handed to the container.

use super::gateway::{normalize_base_url, GatewayMode};
use super::keys;
use crate::config::WorkerEnv;
use std::collections::BTreeMap;
use tracing::debug;

/// Resolved container environment, keyed by variable name.
pub type EnvVars = BTreeMap<String, String>;

/// Trim a value, treating whitespace-only as absent.
fn trimmed(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Keep a value verbatim unless it is whitespace-only.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build the container environment from the worker environment.
///
/// Gateway credentials take precedence over direct provider keys; direct
/// keys only fill variables the gateway left unset. Gateway and provider
/// inputs are trimmed, pass-through inputs are forwarded verbatim. No
/// emitted value is empty or whitespace-only.
pub fn build_env_vars(env: &WorkerEnv) -> EnvVars {
    let mut vars = EnvVars::new();

    let base_url = trimmed(env.ai_gateway_base_url.as_deref()).map(normalize_base_url);
    let base_url = base_url.filter(|url| !url.is_empty());
    let gateway_api_key = trimmed(env.ai_gateway_api_key.as_deref());
    let provider_api_key = trimmed(env.ai_gateway_provider_api_key.as_deref());
    let custom_provider = trimmed(env.ai_gateway_custom_provider.as_deref());
    let anthropic_api_key = trimmed(env.anthropic_api_key.as_deref());
    let openai_api_key = trimmed(env.openai_api_key.as_deref());
    let anthropic_base_url = trimmed(env.anthropic_base_url.as_deref());

    let mode = base_url.map(GatewayMode::from_base_url);
    debug!(mode = mode.map(GatewayMode::as_str), "resolving container environment");

    // Gateway credentials
    if mode == Some(GatewayMode::Compat) {
        if let Some(key) = provider_api_key {
            vars.insert(keys::OPENAI_API_KEY.into(), key.into());
        }
        if let Some(key) = gateway_api_key {
            vars.insert(keys::CF_AIG_AUTHORIZATION.into(), key.into());
        }
        if let Some(provider) = custom_provider {
            vars.insert(keys::AI_GATEWAY_CUSTOM_PROVIDER.into(), provider.into());
        }
    } else if let Some(key) = gateway_api_key {
        let var = mode.unwrap_or_default().api_key_var();
        vars.insert(var.into(), key.into());
    }

    // Direct provider keys never overwrite a gateway credential.
    if let Some(key) = anthropic_api_key {
        vars.entry(keys::ANTHROPIC_API_KEY.into())
            .or_insert_with(|| key.into());
    }
    if let Some(key) = openai_api_key {
        vars.entry(keys::OPENAI_API_KEY.into())
            .or_insert_with(|| key.into());
    }

    // Base URLs
    match (base_url, mode) {
        (Some(url), Some(mode)) => {
            vars.insert(keys::AI_GATEWAY_BASE_URL.into(), url.into());
            vars.insert(mode.base_url_var().into(), url.into());
        }
        _ => {
            if let Some(url) = anthropic_base_url {
                vars.insert(keys::ANTHROPIC_BASE_URL.into(), url.into());
            }
        }
    }

    // Pass-through, two of them renamed for the container.
    let passthrough: [(&str, Option<&str>); 11] = [
        (keys::CLAWDBOT_GATEWAY_TOKEN, env.moltbot_gateway_token.as_deref()),
        (keys::CLAWDBOT_DEV_MODE, env.dev_mode.as_deref()),
        (keys::CLAWDBOT_BIND_MODE, env.clawdbot_bind_mode.as_deref()),
        (keys::TELEGRAM_BOT_TOKEN, env.telegram_bot_token.as_deref()),
        (keys::TELEGRAM_DM_POLICY, env.telegram_dm_policy.as_deref()),
        (keys::DISCORD_BOT_TOKEN, env.discord_bot_token.as_deref()),
        (keys::DISCORD_DM_POLICY, env.discord_dm_policy.as_deref()),
        (keys::SLACK_BOT_TOKEN, env.slack_bot_token.as_deref()),
        (keys::SLACK_APP_TOKEN, env.slack_app_token.as_deref()),
        (keys::CDP_SECRET, env.cdp_secret.as_deref()),
        (keys::WORKER_URL, env.worker_url.as_deref()),
    ];
    for (name, value) in passthrough {
        if let Some(value) = present(value) {
            vars.insert(name.into(), value.into());
        }
    }

    debug!(count = vars.len(), "container environment resolved");
    vars
}
