use std::path::PathBuf;

mod install;
mod terminal;

use clap::ArgAction;
use install::Installer;
use pip_privates::{AuthContext, Config, ProjectNames, collect_requirements};
use terminal::Colorize;
use tracing::instrument;

const DEFAULT_INSTALLER: &str = "pip";

/// Install all requirements from the specified file with pip.
///
/// Optionally transform git+git and git+ssh URLs of private repositories to
/// use a Personal Access Token for GitHub, or a CI job token for GitLab. That
/// way installing them does not depend on an ssh-agent with suitable keys,
/// which you don't have when installing requirements in a Docker build.
///
/// This means that the following URL:
///   -e git+git@github.com:MyOrg/my-project.git@my-tag#egg=my_project
/// would be transformed to:
///   -e git+https://<token>:x-oauth-basic@github.com/MyOrg/my-project.git@my-tag#egg=my_project
#[derive(Debug, clap::Parser)]
#[command(version, about, verbatim_doc_comment)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Your Personal Access Token for private GitHub repositories
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// A CI job token for private GitLab repositories
    #[arg(long = "gitlab-token", env = "CI_JOB_TOKEN", hide_env_values = true)]
    ci_job_token: Option<String>,

    /// The domain of a self-hosted GitLab instance (default: gitlab.com)
    #[arg(long, env = "GITLAB_DOMAIN")]
    gitlab_domain: Option<String>,

    /// Directory containing local checkouts of the projects in --project-names
    #[arg(long, env = "GITHUB_ROOT_DIR")]
    github_root_dir: Option<PathBuf>,

    /// Comma-separated projects to install from --github-root-dir
    #[arg(long, env = "PROJECT_NAMES")]
    project_names: Option<String>,

    /// A TOML file with defaults for the non-secret options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// The installer to run, e.g. "python3 -m pip" (default: pip)
    #[arg(long, env = "PIP_INSTALLER")]
    installer: Option<String>,

    /// Print the collected pip arguments instead of installing them
    #[arg(long)]
    dry_run: bool,

    /// Path to the requirements file to install
    req_file: PathBuf,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!(e))?,
            None => Config::default(),
        };

        let auth = config.apply_defaults(self.auth_context());
        if auth.github_root_dir().is_some() == auth.project_names().is_empty() {
            eprintln!(
                "{}",
                "Local checkouts need both --github-root-dir and --project-names; ignoring"
                    .warning()
            );
        }

        let installer = self
            .installer
            .as_deref()
            .or(config.installer.as_deref())
            .unwrap_or(DEFAULT_INSTALLER);
        let installer = Installer::parse(installer)?;

        self.install(&auth, &installer)
    }

    /// The context given explicitly, by flag or environment variable.
    fn auth_context(&self) -> AuthContext {
        let mut auth = AuthContext::new();
        if let Some(token) = &self.token {
            auth = auth.with_github_token(token.clone());
        }
        if let Some(token) = &self.ci_job_token {
            auth = auth.with_ci_job_token(token.clone());
        }
        if let Some(domain) = &self.gitlab_domain {
            auth = auth.with_gitlab_domain(domain.clone());
        }
        if let Some(root) = &self.github_root_dir {
            auth = auth.with_github_root_dir(root.clone());
        }
        if let Some(names) = &self.project_names {
            auth = auth.with_project_names(ProjectNames::parse(names));
        }
        auth
    }

    #[instrument(skip(self, installer))]
    fn install(&self, auth: &AuthContext, installer: &Installer) -> anyhow::Result<()> {
        let args = collect_requirements(&self.req_file, auth)?;
        tracing::info!(
            "Collected {} arguments from {}",
            args.len(),
            self.req_file.display()
        );

        if self.dry_run {
            for arg in &args {
                println!("{arg}");
            }
            return Ok(());
        }

        installer.install(&args)?;
        eprintln!("{}", "Requirements installed".success());
        Ok(())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}
