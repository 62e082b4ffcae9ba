//! Application-level configuration loading, including the role roster and host role.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "NEWLYWED_BACK_CONFIG_PATH";
/// Environment variable that overrides the configured question deck path.
const QUESTIONS_PATH_ENV: &str = "NEWLYWED_QUESTIONS_PATH";
/// Default question deck path, relative to the working directory.
const DEFAULT_QUESTIONS_PATH: &str = "questions.json";
/// Role that grants host authority unless configured otherwise.
const DEFAULT_HOST_ROLE: &str = "Jeffrey";
/// Points awarded for an answer marked correct.
const DEFAULT_POINTS_PER_CORRECT: u32 = 10;

/// A role players can claim, bound to its couple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSlot {
    /// Role name (e.g. "Eilene").
    pub role: String,
    /// Couple tag the role belongs to.
    pub couple: String,
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    host_role: String,
    points_per_correct: u32,
    questions_path: PathBuf,
    roles: Vec<RoleSlot>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        let config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        host_role = %app_config.host_role,
                        roles = app_config.roles.len(),
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        match env::var_os(QUESTIONS_PATH_ENV).filter(|value| !value.is_empty()) {
            Some(questions_path) => config.with_questions_path(questions_path),
            None => config,
        }
    }

    /// Replace the question deck path.
    pub fn with_questions_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.questions_path = path.into();
        self
    }

    /// Role whose claimant becomes host.
    pub fn host_role(&self) -> &str {
        &self.host_role
    }

    /// Whether `role` is the host role.
    pub fn is_host_role(&self, role: &str) -> bool {
        self.host_role == role
    }

    /// Points awarded per correct answer.
    pub fn points_per_correct(&self) -> u32 {
        self.points_per_correct
    }

    /// Location of the question deck.
    pub fn questions_path(&self) -> &PathBuf {
        &self.questions_path
    }

    /// Roles offered in the lobby.
    pub fn roles(&self) -> &[RoleSlot] {
        &self.roles
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host_role: DEFAULT_HOST_ROLE.into(),
            points_per_correct: DEFAULT_POINTS_PER_CORRECT,
            questions_path: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            roles: default_roles(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    host_role: Option<String>,
    points_per_correct: Option<u32>,
    questions_path: Option<PathBuf>,
    roles: Option<Vec<RawRole>>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            host_role: value.host_role.unwrap_or(defaults.host_role),
            points_per_correct: value
                .points_per_correct
                .unwrap_or(defaults.points_per_correct),
            questions_path: value.questions_path.unwrap_or(defaults.questions_path),
            roles: value
                .roles
                .map(|roles| roles.into_iter().map(Into::into).collect())
                .unwrap_or(defaults.roles),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of a single role entry inside the configuration file.
struct RawRole {
    name: String,
    couple: String,
}

impl From<RawRole> for RoleSlot {
    fn from(value: RawRole) -> Self {
        Self {
            role: value.name,
            couple: value.couple,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in roster: two couples of two.
fn default_roles() -> Vec<RoleSlot> {
    [("Jeffrey", "1"), ("Eilene", "1"), ("Nadja", "2"), ("Julian", "2")]
        .into_iter()
        .map(|(role, couple)| RoleSlot {
            role: role.into(),
            couple: couple.into(),
        })
        .collect()
}
