use std::{
    fmt,
    path::{Path, PathBuf},
};

use non_empty_string::NonEmptyString;

/// The public GitLab domain, used when no self-hosted domain is configured.
pub const DEFAULT_GITLAB_DOMAIN: &str = "gitlab.com";

/// Credentials and filters that control how requirements are rewritten.
///
/// A single context is built at the command-line boundary and passed by value
/// into every recursive include. Nothing in the core reads the process
/// environment.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    github_token: Option<NonEmptyString>,
    ci_job_token: Option<NonEmptyString>,
    gitlab_domain: Option<NonEmptyString>,
    github_root_dir: Option<PathBuf>,
    project_names: ProjectNames,
}

impl AuthContext {
    /// Creates an empty context: no credentials, default GitLab domain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the personal access token used for GitHub URLs.
    ///
    /// An empty token is treated as absent.
    #[must_use]
    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = NonEmptyString::new(token.into()).ok();
        self
    }

    /// Sets the CI job token used for GitLab URLs.
    ///
    /// An empty token is treated as absent.
    #[must_use]
    pub fn with_ci_job_token(mut self, token: impl Into<String>) -> Self {
        self.ci_job_token = NonEmptyString::new(token.into()).ok();
        self
    }

    /// Sets the domain of a self-hosted GitLab instance.
    ///
    /// An empty domain is treated as absent.
    #[must_use]
    pub fn with_gitlab_domain(mut self, domain: impl Into<String>) -> Self {
        self.gitlab_domain = NonEmptyString::new(domain.into()).ok();
        self
    }

    /// Sets the directory holding local checkouts of projects.
    #[must_use]
    pub fn with_github_root_dir(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        self.github_root_dir = (!root.as_os_str().is_empty()).then_some(root);
        self
    }

    /// Sets the projects that should be installed from local checkouts.
    #[must_use]
    pub fn with_project_names(mut self, names: ProjectNames) -> Self {
        self.project_names = names;
        self
    }

    /// The GitHub personal access token, if any.
    #[must_use]
    pub fn github_token(&self) -> Option<&str> {
        self.github_token.as_ref().map(NonEmptyString::as_str)
    }

    /// The GitLab CI job token, if any.
    #[must_use]
    pub fn ci_job_token(&self) -> Option<&str> {
        self.ci_job_token.as_ref().map(NonEmptyString::as_str)
    }

    /// The effective GitLab domain.
    ///
    /// Falls back to [`DEFAULT_GITLAB_DOMAIN`] when none is configured.
    #[must_use]
    pub fn gitlab_domain(&self) -> &str {
        self.gitlab_domain
            .as_ref()
            .map_or(DEFAULT_GITLAB_DOMAIN, NonEmptyString::as_str)
    }

    /// The explicitly configured GitLab domain, without the default.
    #[must_use]
    pub fn gitlab_domain_override(&self) -> Option<&str> {
        self.gitlab_domain.as_ref().map(NonEmptyString::as_str)
    }

    /// The local checkout directory, if any.
    #[must_use]
    pub fn github_root_dir(&self) -> Option<&Path> {
        self.github_root_dir.as_deref()
    }

    /// The projects selected for local checkout substitution.
    #[must_use]
    pub const fn project_names(&self) -> &ProjectNames {
        &self.project_names
    }
}

// Tokens must never end up in logs.
impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |token: &Option<NonEmptyString>| token.as_ref().map(|_| "***");
        f.debug_struct("AuthContext")
            .field("github_token", &mask(&self.github_token))
            .field("ci_job_token", &mask(&self.ci_job_token))
            .field("gitlab_domain", &self.gitlab_domain())
            .field("github_root_dir", &self.github_root_dir)
            .field("project_names", &self.project_names)
            .finish()
    }
}

/// A list of project names, parsed from a comma-separated string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectNames(Vec<String>);

impl ProjectNames {
    /// Parses a comma-separated list, ignoring whitespace and empty entries.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        list.split(',').map(str::trim).collect()
    }

    /// Returns `true` if no project is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `name` is one of the selected projects.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Iterates over the selected project names.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for ProjectNames {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|s| s.as_ref().trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}
