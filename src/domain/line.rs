//! Classification of a single requirements line.
//!
//! The rules form a strict precedence chain; the first rule that applies
//! decides how the line is handled:
//!
//! 1. blank lines and `#` comments are skipped
//! 2. a single token, or a token followed by a `#` comment, is one specifier
//! 3. `-r <path>` includes another file
//! 4. `-e <url>` is an editable requirement
//! 5. a line containing a bare `;` token carries an environment marker
//! 6. anything else is passed to pip token by token

/// Flag introducing an included requirements file.
pub const INCLUDE_FLAG: &str = "-r";

/// Flag marking a requirement as editable.
pub const EDITABLE_FLAG: &str = "-e";

/// Token separating a requirement from its environment marker.
pub const MARKER_SEPARATOR: &str = ";";

/// The whitespace-separated tokens of one line, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSet(Vec<String>);

impl TokenSet {
    /// Splits `line` on whitespace.
    #[must_use]
    pub fn split(line: &str) -> Self {
        Self(line.split_whitespace().map(str::to_string).collect())
    }

    /// Removes single quotes from every token.
    ///
    /// Editable requirements with markers are shell-quoted, e.g.
    /// `-e 'git+...#egg=pkg ; python_version=="3.7"'`. Double quotes belong to
    /// the marker expression and are kept.
    #[must_use]
    pub fn strip_single_quotes(self) -> Self {
        Self(self.0.into_iter().map(|t| t.replace('\'', "")).collect())
    }

    /// The token at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// The number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the line had no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if one of the tokens is exactly `token`.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.0.iter().any(|t| t == token)
    }

    /// The token directly after the first bare `;`, if any.
    #[must_use]
    pub fn marker(&self) -> Option<&str> {
        let separator = self.0.iter().position(|t| t == MARKER_SEPARATOR)?;
        self.get(separator + 1)
    }

    /// Consumes the set, returning the tokens.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// How a line contributes to the pip argument list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    /// Blank line or comment.
    Skip,
    /// A single requirement specifier, possibly a source-control URL.
    Single(String),
    /// `-r <path>`: the path as written, relative to the including file.
    Include(String),
    /// `-e <url>` with an optional environment marker.
    Editable {
        /// The editable source, with single quotes removed.
        url: String,
        /// The token following `;`, if any.
        marker: Option<String>,
    },
    /// `<url> ; <marker>` on a non-editable line.
    Marked {
        /// The requirement preceding the marker.
        url: String,
        /// The token following `;`, if any.
        marker: Option<String>,
    },
    /// Anything else: every token is handed to pip unchanged.
    Passthrough(Vec<String>),
}

impl Classified {
    /// Classifies one raw line.
    #[must_use]
    pub fn classify(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Self::Skip;
        }

        let tokens = TokenSet::split(line);
        let Some(first) = tokens.get(0).map(str::to_string) else {
            return Self::Skip;
        };
        let second = tokens.get(1).map(str::to_string);

        match second.as_deref() {
            None => Self::Single(first),
            Some(comment) if comment.starts_with('#') => Self::Single(first),
            Some(path) if first == INCLUDE_FLAG => Self::Include(path.to_string()),
            Some(_) if first == EDITABLE_FLAG => {
                let tokens = tokens.strip_single_quotes();
                Self::Editable {
                    url: tokens.get(1).unwrap_or_default().to_string(),
                    marker: tokens.marker().map(str::to_string),
                }
            }
            Some(_) if tokens.contains(MARKER_SEPARATOR) => Self::Marked {
                url: first,
                marker: tokens.marker().map(str::to_string),
            },
            Some(_) => Self::Passthrough(tokens.into_inner()),
        }
    }
}
