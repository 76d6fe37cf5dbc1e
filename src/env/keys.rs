//! Variable names read from the worker and written for the container.

// ============================================================================
// AI gateway / provider inputs
// ============================================================================

pub const AI_GATEWAY_BASE_URL: &str = "AI_GATEWAY_BASE_URL";
pub const AI_GATEWAY_API_KEY: &str = "AI_GATEWAY_API_KEY";
pub const AI_GATEWAY_PROVIDER_API_KEY: &str = "AI_GATEWAY_PROVIDER_API_KEY";
pub const AI_GATEWAY_CUSTOM_PROVIDER: &str = "AI_GATEWAY_CUSTOM_PROVIDER";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_BASE_URL: &str = "ANTHROPIC_BASE_URL";

/// Output only: compat-mode gateway authorization (`cf-aig-authorization`).
pub const CF_AIG_AUTHORIZATION: &str = "CF_AIG_AUTHORIZATION";
/// Output only.
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";

// ============================================================================
// Pass-through
// ============================================================================

/// Worker-side name of the gateway token.
pub const MOLTBOT_GATEWAY_TOKEN: &str = "MOLTBOT_GATEWAY_TOKEN";
/// Container-side name of the gateway token.
pub const CLAWDBOT_GATEWAY_TOKEN: &str = "CLAWDBOT_GATEWAY_TOKEN";
pub const DEV_MODE: &str = "DEV_MODE";
pub const CLAWDBOT_DEV_MODE: &str = "CLAWDBOT_DEV_MODE";
pub const CLAWDBOT_BIND_MODE: &str = "CLAWDBOT_BIND_MODE";
pub const TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const TELEGRAM_DM_POLICY: &str = "TELEGRAM_DM_POLICY";
pub const DISCORD_BOT_TOKEN: &str = "DISCORD_BOT_TOKEN";
pub const DISCORD_DM_POLICY: &str = "DISCORD_DM_POLICY";
pub const SLACK_BOT_TOKEN: &str = "SLACK_BOT_TOKEN";
pub const SLACK_APP_TOKEN: &str = "SLACK_APP_TOKEN";
pub const CDP_SECRET: &str = "CDP_SECRET";
pub const WORKER_URL: &str = "WORKER_URL";

/// Every variable name the worker environment understands.
pub const INPUT_VARS: &[&str] = &[
    AI_GATEWAY_BASE_URL,
    AI_GATEWAY_API_KEY,
    AI_GATEWAY_PROVIDER_API_KEY,
    AI_GATEWAY_CUSTOM_PROVIDER,
    ANTHROPIC_API_KEY,
    OPENAI_API_KEY,
    ANTHROPIC_BASE_URL,
    MOLTBOT_GATEWAY_TOKEN,
    DEV_MODE,
    CLAWDBOT_BIND_MODE,
    TELEGRAM_BOT_TOKEN,
    TELEGRAM_DM_POLICY,
    DISCORD_BOT_TOKEN,
    DISCORD_DM_POLICY,
    SLACK_BOT_TOKEN,
    SLACK_APP_TOKEN,
    CDP_SECRET,
    WORKER_URL,
];

/// Every variable name the container environment may contain.
pub const OUTPUT_VARS: &[&str] = &[
    OPENAI_API_KEY,
    CF_AIG_AUTHORIZATION,
    AI_GATEWAY_CUSTOM_PROVIDER,
    ANTHROPIC_API_KEY,
    AI_GATEWAY_BASE_URL,
    OPENAI_BASE_URL,
    ANTHROPIC_BASE_URL,
    CLAWDBOT_GATEWAY_TOKEN,
    CLAWDBOT_DEV_MODE,
    CLAWDBOT_BIND_MODE,
    TELEGRAM_BOT_TOKEN,
    TELEGRAM_DM_POLICY,
    DISCORD_BOT_TOKEN,
    DISCORD_DM_POLICY,
    SLACK_BOT_TOKEN,
    SLACK_APP_TOKEN,
    CDP_SECRET,
    WORKER_URL,
];

/// Whether a variable is read by the resolver or written for the container.
pub fn is_managed(name: &str) -> bool {
    INPUT_VARS.contains(&name) || OUTPUT_VARS.contains(&name)
}

/// Name fragments that mark a variable's value as sensitive for display.
pub const SENSITIVE_MARKERS: &[&str] = &["KEY", "TOKEN", "SECRET", "AUTHORIZATION"];

/// Whether a variable holds a credential that should be redacted when shown.
pub fn is_sensitive(name: &str) -> bool {
    SENSITIVE_MARKERS.iter().any(|marker| name.contains(marker))
}
