mod defaults;
mod error;
mod io;
mod types;
mod validation;

pub use defaults::*;
pub use error::*;
pub use io::*;
pub use types::*;
pub use validation::*;

use std::path::{Path, PathBuf};
use tracing::info;

impl WorkerEnv {
    /// Load the worker environment from a file and the process environment.
    ///
    /// The file is `path` when given, otherwise the first standard location
    /// that exists. Non-blank process variables override file values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(
            path,
            Path::new("."),
            dirs::home_dir().as_deref(),
            &WorkerEnv::from_process_env(),
        )
    }

    /// [`WorkerEnv::load`] with explicit search locations and overrides.
    pub fn load_with(
        path: Option<&Path>,
        search_dir: &Path,
        home: Option<&Path>,
        overrides: &WorkerEnv,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => find_env_file(search_dir, home),
        };

        let mut env = match file {
            Some(file) => {
                info!("Loading worker environment from {}", file.display());
                read_worker_env_file(&file)?
            }
            None => {
                info!("No environment file found, using process environment only");
                WorkerEnv::default()
            }
        };

        // Apply process environment overrides
        env.merge_from(overrides);

        Ok(env)
    }
}

/// Find the worker environment file in standard locations.
fn find_env_file(search_dir: &Path, home: Option<&Path>) -> Option<PathBuf> {
    for candidate in ENV_FILE_CANDIDATES {
        let path = search_dir.join(candidate);
        if path.exists() {
            return Some(path);
        }
    }

    // Check home directory
    if let Some(home) = home {
        let home_config = home.join(HOME_CONFIG_DIR).join("env.json");
        if home_config.exists() {
            return Some(home_config);
        }
    }

    None
}
