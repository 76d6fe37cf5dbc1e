//! Default configuration constants for worker environment loading.

/// Maximum size for a worker environment file (1 MiB).
pub const MAX_ENV_FILE_BYTES: u64 = 1024 * 1024;

/// Files looked up in the working directory when no path is given, in order.
pub const ENV_FILE_CANDIDATES: &[&str] = &[
    "moltbot-env.json",
    "moltbot-env.yaml",
    "moltbot-env.yml",
    "moltbot-env.toml",
    ".env",
];

/// Directory under `$HOME` holding the fallback `env.json`.
pub const HOME_CONFIG_DIR: &str = ".moltbot";

/// Default log filter directive.
pub const DEFAULT_LOG_DIRECTIVE: &str = "moltbot_env=info";

/// DM policies understood by the container's channel plugins.
pub const KNOWN_DM_POLICIES: &[&str] = &["pairing", "allowlist", "open", "disabled"];

/// Bind modes understood by the container's gateway.
pub const KNOWN_BIND_MODES: &[&str] = &["loopback", "lan", "auto", "custom", "tailnet"];

/// Parent variables kept when launching with a cleared environment.
pub const CLEAN_ENV_KEEP: &[&str] = &["PATH", "HOME", "TERM", "LANG", "TZ"];
