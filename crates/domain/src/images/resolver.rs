//! Resolve portrait and token images against a pre-listed set of files.
//!
//! The probing strategy (checking each candidate path for existence) lives
//! with the file-source port in the engine; both walk the same
//! [`CandidateList`] so precedence is identical.

use serde::Serialize;

use super::candidates::{CandidateList, CandidateProfile, ImageCandidateSet};

/// Outcome of resolving one character's images. Missing images are `None`, never errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedImages {
    pub portrait: Option<String>,
    pub token: Option<String>,
}

impl ResolvedImages {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.portrait.is_none() && self.token.is_none()
    }
}

/// A flat list of available files, optionally restricted to a base path.
#[derive(Debug, Clone, Copy)]
pub struct FileListing<'a> {
    files: &'a [String],
    scope: Option<&'a str>,
}

impl<'a> FileListing<'a> {
    /// Every listed file is eligible.
    pub fn unscoped(files: &'a [String]) -> Self {
        Self { files, scope: None }
    }

    /// Only files equal to or below `scope` are eligible.
    pub fn scoped(files: &'a [String], scope: &'a str) -> Self {
        Self {
            files,
            scope: Some(scope),
        }
    }

    fn is_eligible(&self, path: &str) -> bool {
        let Some(scope) = self.scope.map(|s| s.trim_end_matches('/')) else {
            return true;
        };
        if scope.is_empty() {
            return true;
        }
        path == scope
            || path
                .strip_prefix(scope)
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// First eligible file whose basename equals `wanted`, ignoring case.
    ///
    /// Only whole-basename equality counts; `"adrian.png"` does not match
    /// `"adrian.png.bak"` or `"old adrian.png"`.
    pub fn find_by_basename(&self, wanted: &str) -> Option<&'a str> {
        let wanted = wanted.to_lowercase();
        self.files
            .iter()
            .map(String::as_str)
            .filter(|path| self.is_eligible(path))
            .find(|path| basename(path).to_lowercase() == wanted)
    }

    /// First listed file matching the highest-priority candidate.
    pub fn resolve(&self, candidates: &CandidateList) -> Option<String> {
        candidates
            .first_match(|candidate| self.find_by_basename(candidate))
            .map(str::to_string)
    }
}

/// Final path segment of a `/`-separated path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Resolve both images for `display_name` from a file listing.
pub fn resolve_from_listing(
    display_name: &str,
    profile: CandidateProfile,
    listing: FileListing<'_>,
) -> ResolvedImages {
    let candidates = ImageCandidateSet::for_name(display_name, profile);
    ResolvedImages {
        portrait: listing.resolve(&candidates.portrait),
        token: listing.resolve(&candidates.token),
    }
}
