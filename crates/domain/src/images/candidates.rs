//! Ordered image file name candidates.

use crate::common::{encode_uri_component, slugify, slugify_untrimmed};

/// File names to look for, highest priority first.
///
/// Precedence is positional: when several candidates exist, the one with the
/// lowest index wins regardless of how "good" a later match might look.
/// Every resolution strategy must walk the list front to back and stop at
/// the first hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateList(Vec<String>);

impl CandidateList {
    pub fn new(candidates: Vec<String>) -> Self {
        Self(candidates)
    }

    /// Candidates in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return the first candidate for which `lookup` produces a value.
    pub fn first_match<T>(&self, mut lookup: impl FnMut(&str) -> Option<T>) -> Option<T> {
        self.iter().find_map(&mut lookup)
    }

    /// Candidate paths under `base`, in priority order.
    pub fn paths_under(&self, base: &str) -> Vec<String> {
        self.iter().map(|c| join_path(base, c)).collect()
    }
}

/// Which naming convention the image files follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateProfile {
    /// Character import: URL-encoded artwork name first, then dashed slugs,
    /// `.png`/`.jpg`/`.jpeg`
    #[default]
    Import,
    /// Image refresh of existing actors: untrimmed underscore slugs, `.png`/`.jpg`
    Refresh,
}

/// Portrait and token candidates for one display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCandidateSet {
    pub portrait: CandidateList,
    pub token: CandidateList,
}

impl ImageCandidateSet {
    pub fn for_name(display_name: &str, profile: CandidateProfile) -> Self {
        match profile {
            CandidateProfile::Import => {
                let slug = slugify(display_name);
                let encoded_artwork =
                    format!("{}.png", encode_uri_component(&format!("{display_name} artwork")));
                Self {
                    portrait: CandidateList::new(vec![
                        encoded_artwork,
                        format!("{slug} artwork.png"),
                        format!("{slug}.png"),
                        format!("{slug}.jpg"),
                        format!("{slug}.jpeg"),
                    ]),
                    token: CandidateList::new(vec![format!("{slug} token.png")]),
                }
            }
            CandidateProfile::Refresh => {
                let slug = slugify_untrimmed(display_name, '_');
                Self {
                    portrait: CandidateList::new(vec![
                        format!("{slug} artwork.png"),
                        format!("{slug}.png"),
                        format!("{slug}.jpg"),
                    ]),
                    token: CandidateList::new(vec![format!("{slug} token.png")]),
                }
            }
        }
    }
}

fn join_path(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}
