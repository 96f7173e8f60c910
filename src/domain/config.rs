use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{AuthContext, ProjectNames};

/// Non-secret defaults loaded from a TOML file.
///
/// Command-line flags and environment variables take precedence over every
/// value here. Tokens are deliberately not part of the file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Domain of a self-hosted GitLab instance.
    pub gitlab_domain: Option<String>,

    /// Directory containing local checkouts of projects.
    pub github_root_dir: Option<PathBuf>,

    /// Projects to install from `github_root_dir` instead of their remote.
    pub project_names: Vec<String>,

    /// The installer command line, e.g. `python3 -m pip`.
    ///
    /// The `install` subcommand is appended automatically.
    pub installer: Option<String>,
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Fills in the fields of `auth` that were not set explicitly.
    #[must_use]
    pub fn apply_defaults(&self, mut auth: AuthContext) -> AuthContext {
        let domain_unset = auth.gitlab_domain_override().is_none();
        let root_unset = auth.github_root_dir().is_none();

        if let (true, Some(domain)) = (domain_unset, &self.gitlab_domain) {
            auth = auth.with_gitlab_domain(domain.clone());
        }
        if let (true, Some(root)) = (root_unset, &self.github_root_dir) {
            auth = auth.with_github_root_dir(root.clone());
        }
        if auth.project_names().is_empty() {
            auth = auth.with_project_names(self.project_names.iter().collect::<ProjectNames>());
        }
        auth
    }
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gitlab_domain: Option<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        github_root_dir: Option<PathBuf>,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        project_names: Vec<String>,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        installer: Option<String>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                gitlab_domain,
                github_root_dir,
                project_names,
                installer,
            } => Self {
                gitlab_domain,
                github_root_dir,
                project_names,
                installer,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            gitlab_domain: config.gitlab_domain,
            github_root_dir: config.github_root_dir,
            project_names: config.project_names,
            installer: config.installer,
        }
    }
}
