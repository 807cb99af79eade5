//! Content-type alias resolution.
//!
//! Route declarations name request content types with short aliases (`json`,
//! `form`) or explicit MIME strings (`text/html`). This module maps aliases to
//! their canonical MIME types and builds the [`ContentFilter`] values that
//! route registrations carry.
//!
//! Any token containing a `/` is taken as an explicit MIME type and passed
//! through untouched. A bare token must match one of the known aliases;
//! anything else is rejected when the filter is constructed, so a typo in a
//! declaration surfaces at startup rather than when documentation is built.

use std::fmt;

const ALIASES: &[(&str, &str)] = &[
    ("json", "application/json"),
    ("text", "text/plain"),
    ("html", "text/html"),
    ("xml", "application/xml"),
    ("form", "application/x-www-form-urlencoded"),
    ("multipart", "multipart/form-data"),
    ("bin", "application/octet-stream"),
];

/// Error raised for content-type tokens that cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentTypeError {
    /// A bare token (no `/`) that matches none of the known aliases.
    UnknownAlias {
        /// The token as it appeared in the declaration
        alias: String,
    },
}

impl fmt::Display for ContentTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentTypeError::UnknownAlias { alias } => {
                write!(
                    f,
                    "unknown content-type alias '{}': use one of {} or an explicit MIME type such as 'text/html'",
                    alias,
                    ALIASES
                        .iter()
                        .map(|(a, _)| format!("'{a}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
        }
    }
}

impl std::error::Error for ContentTypeError {}

fn lookup(alias: &str) -> Option<&'static str> {
    ALIASES
        .iter()
        .find(|(a, _)| *a == alias)
        .map(|(_, mime)| *mime)
}

/// Resolve a single alias or MIME string to a canonical MIME type.
///
/// Tokens containing `/` pass through verbatim.
pub fn resolve(token: &str) -> Result<String, ContentTypeError> {
    if token.contains('/') {
        return Ok(token.to_string());
    }
    lookup(token)
        .map(str::to_string)
        .ok_or_else(|| ContentTypeError::UnknownAlias {
            alias: token.to_string(),
        })
}

/// Resolve a sequence of tokens, preserving declaration order and dropping
/// duplicates after resolution. Never reorders.
pub fn resolve_all<I, S>(tokens: I) -> Result<Vec<String>, ContentTypeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut mimes = Vec::new();
    for token in tokens {
        let mime = resolve(token.as_ref())?;
        if !mimes.contains(&mime) {
            mimes.push(mime);
        }
    }
    Ok(mimes)
}

/// Infallible variant used when re-deriving MIME types from tokens that were
/// already validated at declaration time. Unknown bare tokens pass through
/// verbatim instead of failing, which keeps document compilation total.
pub(crate) fn resolve_lenient(token: &str) -> String {
    if token.contains('/') {
        return token.to_string();
    }
    lookup(token)
        .map(str::to_string)
        .unwrap_or_else(|| token.to_string())
}

/// An ordered set of accepted content types, attached to a single route or to
/// a whole document as the application-wide default.
///
/// The filter stores the tokens exactly as declared; they are resolved to
/// MIME types each time a document is compiled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFilter {
    tokens: Vec<String>,
}

impl ContentFilter {
    /// The tokens as declared, in order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Resolved MIME types in declaration order, deduplicated.
    pub fn media_types(&self) -> Vec<String> {
        let mut mimes = Vec::new();
        for token in &self.tokens {
            let mime = resolve_lenient(token);
            if !mimes.contains(&mime) {
                mimes.push(mime);
            }
        }
        mimes
    }
}

/// Build a [`ContentFilter`] from aliases and/or MIME strings.
///
/// Every token is validated eagerly so that a bad alias fails here, at
/// declaration time.
pub fn accept<I, S>(tokens: I) -> Result<ContentFilter, ContentTypeError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
    for token in &tokens {
        resolve(token)?;
    }
    Ok(ContentFilter { tokens })
}
