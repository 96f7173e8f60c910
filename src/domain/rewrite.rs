//! Rewriting of source-control URLs to token authenticated HTTPS.
//!
//! Recognised URLs come in three transports for each forge:
//!
//! | transport | prefix                   |
//! |-----------|--------------------------|
//! | ssh       | `git+ssh://git@{host}/`  |
//! | scp       | `git+git@{host}:`        |
//! | https     | `git+https://{host}/`    |
//!
//! Everything after the matched prefix (path, `@ref`, `#egg=` fragment) is
//! carried over verbatim.

use std::fmt;

use super::AuthContext;

/// The well-known GitHub host.
pub const GITHUB_DOMAIN: &str = "github.com";

/// Basic-auth password paired with a GitHub personal access token.
pub const GITHUB_BASIC_AUTH_LABEL: &str = "x-oauth-basic";

/// Username paired with a GitLab CI job token.
pub const GITLAB_CI_TOKEN_LABEL: &str = "gitlab-ci-token";

/// Scheme prefixes a URL must start with to be considered for rewriting.
const CONVERTIBLE_SCHEMES: [&str; 3] = ["git+ssh", "git+git", "git+https"];

const TRANSPORTS: [Transport; 3] = [Transport::Ssh, Transport::Scp, Transport::Https];

/// A family of source-control hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forge {
    /// `github.com`
    GitHub,
    /// `gitlab.com` or a self-hosted GitLab domain.
    GitLab,
}

impl fmt::Display for Forge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHub => f.write_str("GitHub"),
            Self::GitLab => f.write_str("GitLab"),
        }
    }
}

/// The shape of a recognised source-control URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// `git+ssh://git@{host}/`
    Ssh,
    /// `git+git@{host}:`
    Scp,
    /// `git+https://{host}/`
    Https,
}

impl Transport {
    /// The literal prefix of this transport for the given host.
    #[must_use]
    pub fn prefix(self, host: &str) -> String {
        match self {
            Self::Ssh => format!("git+ssh://git@{host}/"),
            Self::Scp => format!("git+git@{host}:"),
            Self::Https => format!("git+https://{host}/"),
        }
    }
}

/// A recognised URL prefix and the forge it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    forge: Forge,
    transport: Transport,
    prefix: String,
}

impl RewriteRule {
    /// Creates the rule for `transport` on `host`.
    #[must_use]
    pub fn new(forge: Forge, transport: Transport, host: &str) -> Self {
        Self {
            forge,
            transport,
            prefix: transport.prefix(host),
        }
    }

    /// The forge this rule rewrites to.
    #[must_use]
    pub const fn forge(&self) -> Forge {
        self.forge
    }

    /// The transport this rule recognises.
    #[must_use]
    pub const fn transport(&self) -> Transport {
        self.transport
    }

    /// The literal prefix matched by this rule.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the remainder of `url` after this rule's prefix, if it matches.
    #[must_use]
    pub fn strip<'a>(&self, url: &'a str) -> Option<&'a str> {
        url.strip_prefix(self.prefix.as_str())
    }
}

/// The outcome of rewriting a single URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewritten {
    /// The URL matched a rule and was rewritten.
    Converted {
        /// The authenticated (or normalised) HTTPS URL.
        url: String,
        /// The forge whose rule matched.
        forge: Forge,
        /// The part of the original URL following the matched prefix.
        remainder: String,
    },
    /// The URL was not recognised and is returned as-is.
    Unchanged(String),
}

impl Rewritten {
    /// The resulting URL, rewritten or not.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Converted { url, .. } | Self::Unchanged(url) => url,
        }
    }

    /// Consumes the outcome, returning the resulting URL.
    #[must_use]
    pub fn into_url(self) -> String {
        match self {
            Self::Converted { url, .. } | Self::Unchanged(url) => url,
        }
    }

    /// Returns `true` if the URL matched a rule.
    #[must_use]
    pub const fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    /// The text following the matched prefix, if the URL was converted.
    #[must_use]
    pub fn remainder(&self) -> Option<&str> {
        match self {
            Self::Converted { remainder, .. } => Some(remainder),
            Self::Unchanged(_) => None,
        }
    }
}

/// Rewrites source-control URLs using the credentials of an [`AuthContext`].
#[derive(Debug)]
pub struct Rewriter<'a> {
    auth: &'a AuthContext,
    rules: Vec<RewriteRule>,
}

impl<'a> Rewriter<'a> {
    /// Builds the rule table for `auth`.
    ///
    /// GitLab rules come first so that a self-hosted domain is preferred
    /// over the well-known GitHub host.
    #[must_use]
    pub fn new(auth: &'a AuthContext) -> Self {
        let gitlab = auth.gitlab_domain();
        let rules = TRANSPORTS
            .iter()
            .map(|&t| RewriteRule::new(Forge::GitLab, t, gitlab))
            .chain(
                TRANSPORTS
                    .iter()
                    .map(|&t| RewriteRule::new(Forge::GitHub, t, GITHUB_DOMAIN)),
            )
            .collect();

        Self { auth, rules }
    }

    /// The rule table, in precedence order.
    #[must_use]
    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// The context this rewriter was built from.
    #[must_use]
    pub const fn auth(&self) -> &AuthContext {
        self.auth
    }

    /// Returns `true` if `url` uses one of the git schemes that can be
    /// rewritten.
    #[must_use]
    pub fn is_convertible(url: &str) -> bool {
        CONVERTIBLE_SCHEMES
            .iter()
            .any(|scheme| url.starts_with(scheme))
    }

    /// Determines which forge a URL most likely belongs to.
    ///
    /// A URL mentioning the effective GitLab domain is treated as GitLab,
    /// anything else as GitHub.
    #[must_use]
    pub fn forge_of(&self, url: &str) -> Forge {
        if url.contains(self.auth.gitlab_domain()) {
            Forge::GitLab
        } else {
            Forge::GitHub
        }
    }

    /// Rewrites `url` if it matches a known prefix.
    ///
    /// Rules of the forge chosen by [`Self::forge_of`] are tried first, then
    /// the remaining rules in table order. The first matching prefix wins.
    #[must_use]
    pub fn rewrite(&self, url: &str) -> Rewritten {
        if !Self::is_convertible(url) {
            return Rewritten::Unchanged(url.to_string());
        }

        let preferred = self.forge_of(url);
        let candidates = self
            .rules
            .iter()
            .filter(|rule| rule.forge == preferred)
            .chain(self.rules.iter().filter(|rule| rule.forge != preferred));

        for rule in candidates {
            if let Some(remainder) = rule.strip(url) {
                tracing::trace!(
                    "Matched {} {:?} prefix '{}'",
                    rule.forge,
                    rule.transport,
                    rule.prefix
                );
                return Rewritten::Converted {
                    url: self.target(rule.forge, remainder),
                    forge: rule.forge,
                    remainder: remainder.to_string(),
                };
            }
        }

        tracing::debug!("No rewrite rule matches '{url}'");
        Rewritten::Unchanged(url.to_string())
    }

    fn target(&self, forge: Forge, remainder: &str) -> String {
        match forge {
            Forge::GitHub => match self.auth.github_token() {
                Some(token) => format!(
                    "git+https://{token}:{GITHUB_BASIC_AUTH_LABEL}@{GITHUB_DOMAIN}/{remainder}"
                ),
                None => format!("git+https://{GITHUB_DOMAIN}/{remainder}"),
            },
            Forge::GitLab => {
                let domain = self.auth.gitlab_domain();
                match self.auth.ci_job_token() {
                    Some(token) => format!(
                        "git+https://{GITLAB_CI_TOKEN_LABEL}:{token}@{domain}/{remainder}"
                    ),
                    None => format!("git+https://{domain}/{remainder}"),
                }
            }
        }
    }
}

/// Appends an environment marker clause to a requirement, if there is one.
#[must_use]
pub fn with_marker(requirement: String, marker: Option<&str>) -> String {
    match marker {
        Some(marker) => format!("{requirement} ; {marker}"),
        None => requirement,
    }
}
