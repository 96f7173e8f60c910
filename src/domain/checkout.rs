//! Local checkout substitution.
//!
//! During development it is convenient to install some private projects from
//! a working copy instead of the remote repository. When a checkout root and
//! a list of project names are configured, recognised source-control URLs for
//! those projects are replaced by an editable install of
//! `<root>/<repository name>`.

use std::path::{Path, PathBuf};

use super::{AuthContext, ProjectNames, Rewritten};

/// Projects that are installed from a local checkout directory.
#[derive(Debug, Clone, Copy)]
pub struct LocalCheckouts<'a> {
    root: &'a Path,
    projects: &'a ProjectNames,
}

impl<'a> LocalCheckouts<'a> {
    /// Returns the substitution configured in `auth`.
    ///
    /// Both a root directory and at least one project name are required,
    /// otherwise no substitution takes place.
    #[must_use]
    pub fn from_auth(auth: &'a AuthContext) -> Option<Self> {
        let root = auth.github_root_dir()?;
        let projects = auth.project_names();
        if projects.is_empty() {
            return None;
        }
        Some(Self { root, projects })
    }

    /// Returns the local checkout path for a rewritten URL, if its repository
    /// is one of the selected projects.
    #[must_use]
    pub fn resolve(&self, rewritten: &Rewritten) -> Option<PathBuf> {
        let name = repository_name(rewritten.remainder()?)?;
        self.projects
            .contains(name)
            .then(|| self.root.join(name))
    }
}

/// Extracts the repository name from the path part of a source-control URL.
///
/// `Org/my-repo.git@v1#egg=my_repo` yields `my-repo`.
#[must_use]
pub fn repository_name(remainder: &str) -> Option<&str> {
    // Refs may contain slashes (`release/1.2`), so cut them off first.
    let path = remainder.split('#').next().unwrap_or(remainder);
    let path = path.split('@').next().unwrap_or(path);
    let segment = path.trim_end_matches('/').rsplit('/').next()?;
    let name = segment.strip_suffix(".git").unwrap_or(segment);
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{Forge, Rewriter};

    #[test_case("Org/my-repo.git@v1#egg=my_repo", Some("my-repo"); "ref and egg")]
    #[test_case("Org/my-repo.git", Some("my-repo"); "git suffix")]
    #[test_case("Org/my-repo", Some("my-repo"); "bare")]
    #[test_case("group/sub/proj@main", Some("proj"); "nested group with ref")]
    #[test_case("Org/repo#egg=pkg&subdirectory=src", Some("repo"); "fragment only")]
    #[test_case("Org/my-repo.git@release/1.2#egg=my_repo", Some("my-repo"); "ref containing slash")]
    #[test_case("group/proj@feature/x/y", Some("proj"); "nested branch ref")]
    #[test_case("", None; "empty")]
    fn extracts_repository_name(remainder: &str, expected: Option<&str>) {
        assert_eq!(repository_name(remainder), expected);
    }

    #[test]
    fn requires_root_and_projects() {
        let auth = AuthContext::new().with_github_root_dir("/src");
        assert!(LocalCheckouts::from_auth(&auth).is_none());

        let auth = AuthContext::new().with_project_names(ProjectNames::parse("repo"));
        assert!(LocalCheckouts::from_auth(&auth).is_none());

        let auth = AuthContext::new()
            .with_github_root_dir("/src")
            .with_project_names(ProjectNames::parse("repo"));
        assert!(LocalCheckouts::from_auth(&auth).is_some());
    }

    #[test]
    fn resolves_selected_projects_only() {
        let auth = AuthContext::new()
            .with_github_root_dir("/src")
            .with_project_names(ProjectNames::parse("my-repo"));
        let checkouts = LocalCheckouts::from_auth(&auth).unwrap();
        let rewriter = Rewriter::new(&auth);

        let selected = rewriter.rewrite("git+git@github.com:Org/my-repo.git@v1#egg=my_repo");
        assert_eq!(
            checkouts.resolve(&selected),
            Some(PathBuf::from("/src/my-repo"))
        );

        let other = rewriter.rewrite("git+git@github.com:Org/other.git");
        assert_eq!(checkouts.resolve(&other), None);
    }

    #[test]
    fn unchanged_urls_are_never_substituted() {
        let auth = AuthContext::new()
            .with_github_root_dir("/src")
            .with_project_names(ProjectNames::parse("my-repo"));
        let checkouts = LocalCheckouts::from_auth(&auth).unwrap();

        let unchanged = Rewritten::Unchanged("git+ssh://git@bitbucket.org/Org/my-repo.git".into());
        assert_eq!(checkouts.resolve(&unchanged), None);

        let converted = Rewritten::Converted {
            url: String::new(),
            forge: Forge::GitLab,
            remainder: "group/my-repo.git".to_string(),
        };
        assert_eq!(
            checkouts.resolve(&converted),
            Some(PathBuf::from("/src/my-repo"))
        );
    }
}
