use super::defaults::{KNOWN_BIND_MODES, KNOWN_DM_POLICIES};
use super::types::WorkerEnv;
use crate::env::{build_env_vars, keys, normalize_base_url, GatewayMode};
use anyhow::Result;
use serde::Serialize;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A finding about a worker environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvDiagnostic {
    pub severity: Severity,
    /// Input variable the finding is about.
    pub field: String,
    pub message: String,
}

impl EnvDiagnostic {
    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EnvDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{level}: {}: {}", self.field, self.message)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_http_url(field: &str, raw: &str, diagnostics: &mut Vec<EnvDiagnostic>) {
    match url::Url::parse(raw) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => diagnostics.push(EnvDiagnostic::error(
            field,
            format!("unsupported scheme '{}', expected http or https", parsed.scheme()),
        )),
        Err(e) => diagnostics.push(EnvDiagnostic::error(
            field,
            format!("not an absolute URL: {e}"),
        )),
    }
}

/// Inspect a worker environment for settings the container is likely to reject.
///
/// Diagnostics never change what [`build_env_vars`] produces.
pub fn validate_worker_env(env: &WorkerEnv) -> Vec<EnvDiagnostic> {
    let mut diagnostics = Vec::new();

    let base_url = non_blank(env.ai_gateway_base_url.as_deref());
    let mode = base_url.map(GatewayMode::from_base_url);

    // Base URLs
    if let Some(raw) = base_url {
        check_http_url(keys::AI_GATEWAY_BASE_URL, raw, &mut diagnostics);
    }

    // The direct base URL is only emitted when no gateway URL shadows it.
    let gateway_emitted = base_url.is_some_and(|url| !normalize_base_url(url).is_empty());
    if !gateway_emitted {
        if let Some(raw) = non_blank(env.anthropic_base_url.as_deref()) {
            check_http_url(keys::ANTHROPIC_BASE_URL, raw, &mut diagnostics);
        }
    }

    // Credentials
    if mode == Some(GatewayMode::Compat) {
        if non_blank(env.ai_gateway_provider_api_key.as_deref()).is_none() {
            diagnostics.push(EnvDiagnostic::warning(
                keys::AI_GATEWAY_PROVIDER_API_KEY,
                "compat gateway without a provider key; OPENAI_API_KEY falls back to the direct key",
            ));
        }
        if non_blank(env.ai_gateway_custom_provider.as_deref()).is_none() {
            diagnostics.push(EnvDiagnostic::warning(
                keys::AI_GATEWAY_CUSTOM_PROVIDER,
                "compat gateway without a custom provider name",
            ));
        }
    } else if base_url.is_none() && non_blank(env.ai_gateway_api_key.as_deref()).is_some() {
        diagnostics.push(EnvDiagnostic::warning(
            keys::AI_GATEWAY_API_KEY,
            "gateway key set without AI_GATEWAY_BASE_URL; it is passed as ANTHROPIC_API_KEY",
        ));
    }

    let resolved = build_env_vars(env);
    if !resolved.contains_key(keys::ANTHROPIC_API_KEY)
        && !resolved.contains_key(keys::OPENAI_API_KEY)
    {
        diagnostics.push(EnvDiagnostic::warning(
            keys::ANTHROPIC_API_KEY,
            "no provider credential resolves; the container will start without a model",
        ));
    }

    // Channels
    for field in [keys::TELEGRAM_DM_POLICY, keys::DISCORD_DM_POLICY] {
        if let Some(policy) = non_blank(env.get(field)) {
            if !KNOWN_DM_POLICIES.iter().any(|known| *known == policy) {
                diagnostics.push(EnvDiagnostic::warning(
                    field,
                    format!(
                        "unknown DM policy '{policy}', expected one of {}",
                        KNOWN_DM_POLICIES.join(", ")
                    ),
                ));
            }
        }
    }

    let slack_bot = non_blank(env.slack_bot_token.as_deref()).is_some();
    let slack_app = non_blank(env.slack_app_token.as_deref()).is_some();
    if slack_bot != slack_app {
        let missing = if slack_bot {
            keys::SLACK_APP_TOKEN
        } else {
            keys::SLACK_BOT_TOKEN
        };
        diagnostics.push(EnvDiagnostic::warning(
            missing,
            "Slack socket mode needs both SLACK_BOT_TOKEN and SLACK_APP_TOKEN",
        ));
    }

    if let Some(bind) = non_blank(env.clawdbot_bind_mode.as_deref()) {
        if !KNOWN_BIND_MODES.iter().any(|known| *known == bind) {
            diagnostics.push(EnvDiagnostic::warning(
                keys::CLAWDBOT_BIND_MODE,
                format!(
                    "unknown bind mode '{bind}', expected one of {}",
                    KNOWN_BIND_MODES.join(", ")
                ),
            ));
        }
    }

    // Pass-through values are forwarded verbatim.
    for field in [
        keys::MOLTBOT_GATEWAY_TOKEN,
        keys::DEV_MODE,
        keys::CLAWDBOT_BIND_MODE,
        keys::TELEGRAM_BOT_TOKEN,
        keys::TELEGRAM_DM_POLICY,
        keys::DISCORD_BOT_TOKEN,
        keys::DISCORD_DM_POLICY,
        keys::SLACK_BOT_TOKEN,
        keys::SLACK_APP_TOKEN,
        keys::CDP_SECRET,
        keys::WORKER_URL,
    ] {
        if let Some(value) = env.get(field) {
            if !value.trim().is_empty() && value.trim() != value {
                diagnostics.push(EnvDiagnostic::warning(
                    field,
                    "value has surrounding whitespace and is passed through untrimmed",
                ));
            }
        }
    }

    diagnostics
}

/// Validate a worker environment and fail on any error-level diagnostic.
pub fn validate_worker_env_strict(env: &WorkerEnv) -> Result<()> {
    let errors: Vec<String> = validate_worker_env(env)
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .map(|d| d.to_string())
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("Worker environment validation failed:\n{}", errors.join("\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> WorkerEnv {
        WorkerEnv::from_vars(pairs.iter().copied())
    }

    fn fields(diagnostics: &[EnvDiagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.field.as_str()).collect()
    }

    #[test]
    fn clean_gateway_setup_has_no_findings() {
        let diagnostics = validate_worker_env(&env(&[
            ("AI_GATEWAY_BASE_URL", "https://gateway.ai.cloudflare.com/v1/a/g/anthropic"),
            ("AI_GATEWAY_API_KEY", "gk"),
            ("TELEGRAM_DM_POLICY", "pairing"),
        ]));
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
    }

    #[test]
    fn missing_credential_warns() {
        let diagnostics = validate_worker_env(&WorkerEnv::default());
        assert_eq!(fields(&diagnostics), vec!["ANTHROPIC_API_KEY"]);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn relative_base_url_is_error() {
        let e = env(&[("AI_GATEWAY_BASE_URL", "gateway/openai"), ("AI_GATEWAY_API_KEY", "gk")]);
        let diagnostics = validate_worker_env(&e);
        assert!(diagnostics
            .iter()
            .any(|d| d.field == "AI_GATEWAY_BASE_URL" && d.severity == Severity::Error));
        assert!(validate_worker_env_strict(&e).is_err());
    }

    #[test]
    fn non_http_scheme_is_error() {
        let e = env(&[("AI_GATEWAY_BASE_URL", "ftp://x/openai"), ("AI_GATEWAY_API_KEY", "gk")]);
        let err = validate_worker_env_strict(&e).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn shadowed_direct_base_url_is_not_checked() {
        let diagnostics = validate_worker_env(&env(&[
            ("AI_GATEWAY_BASE_URL", "https://x/openai"),
            ("AI_GATEWAY_API_KEY", "gk"),
            ("ANTHROPIC_BASE_URL", "not a url"),
        ]));
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
    }

    #[test]
    fn direct_base_url_needs_http_scheme() {
        let e = env(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("ANTHROPIC_BASE_URL", "file:///etc/passwd"),
        ]);
        let diagnostics = validate_worker_env(&e);
        assert_eq!(fields(&diagnostics), vec!["ANTHROPIC_BASE_URL"]);
        assert_eq!(diagnostics[0].severity, Severity::Error);
        assert!(diagnostics[0].message.contains("unsupported scheme 'file'"));
    }

    #[test]
    fn compat_without_provider_details_warns() {
        let diagnostics = validate_worker_env(&env(&[
            ("AI_GATEWAY_BASE_URL", "https://x/compat"),
            ("AI_GATEWAY_API_KEY", "gk"),
            ("OPENAI_API_KEY", "direct"),
        ]));
        assert_eq!(
            fields(&diagnostics),
            vec!["AI_GATEWAY_PROVIDER_API_KEY", "AI_GATEWAY_CUSTOM_PROVIDER"]
        );
    }

    #[test]
    fn gateway_key_without_url_warns() {
        let diagnostics = validate_worker_env(&env(&[("AI_GATEWAY_API_KEY", "gk")]));
        assert_eq!(fields(&diagnostics), vec!["AI_GATEWAY_API_KEY"]);
    }

    #[test]
    fn unknown_dm_policy_and_bind_mode_warn() {
        let diagnostics = validate_worker_env(&env(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("DISCORD_DM_POLICY", "everyone"),
            ("CLAWDBOT_BIND_MODE", "public"),
        ]));
        assert_eq!(fields(&diagnostics), vec!["DISCORD_DM_POLICY", "CLAWDBOT_BIND_MODE"]);
        assert!(diagnostics[0].message.contains("everyone"));
    }

    #[test]
    fn half_configured_slack_warns() {
        let diagnostics = validate_worker_env(&env(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("SLACK_BOT_TOKEN", "xoxb"),
        ]));
        assert_eq!(fields(&diagnostics), vec!["SLACK_APP_TOKEN"]);
    }

    #[test]
    fn padded_passthrough_warns() {
        let diagnostics = validate_worker_env(&env(&[
            ("ANTHROPIC_API_KEY", "k"),
            ("WORKER_URL", "https://w "),
        ]));
        assert_eq!(fields(&diagnostics), vec!["WORKER_URL"]);
    }

    #[test]
    fn warnings_do_not_fail_strict_validation() {
        assert!(validate_worker_env_strict(&WorkerEnv::default()).is_ok());
    }

    #[test]
    fn display_format() {
        let d = EnvDiagnostic::warning("WORKER_URL", "oops");
        assert_eq!(d.to_string(), "warning: WORKER_URL: oops");
    }
}
