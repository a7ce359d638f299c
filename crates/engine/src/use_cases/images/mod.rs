//! Image resolution over the file-source ports.
//!
//! Two strategies share the domain's ordered candidate lists:
//! - `Browse`: list a folder once, then match candidates against the listing
//! - `Probe`: check `<base>/<candidate>` for existence, one candidate at a time
//!
//! Characters are resolved concurrently; the candidates of one character are
//! always tried in order.

use std::sync::Arc;

use futures_util::future::join_all;
use tomebridge_domain::{
    resolve_from_listing, CandidateList, CandidateProfile, FileListing, ImageCandidateSet,
    ResolvedImages,
};

use crate::infrastructure::ports::{AssetProbe, FolderBrowser, SourceError};

/// Where image files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Browse a folder and match against every file below it
    Browse { root: String },
    /// Probe a fixed base path for each candidate
    Probe { base: String },
}

impl ImageSource {
    /// Folder or base path the images are taken from, for reporting.
    pub fn location(&self) -> &str {
        match self {
            Self::Browse { root } => root,
            Self::Probe { base } => base,
        }
    }
}

/// Resolves portraits and tokens for a batch of display names.
pub struct ResolveImages {
    browser: Arc<dyn FolderBrowser>,
    probe: Arc<dyn AssetProbe>,
}

impl ResolveImages {
    pub fn new(browser: Arc<dyn FolderBrowser>, probe: Arc<dyn AssetProbe>) -> Self {
        Self { browser, probe }
    }

    /// Images for each name, in input order.
    ///
    /// Only browsing can fail; a missing image is `None`.
    pub async fn resolve_all(
        &self,
        names: &[String],
        profile: CandidateProfile,
        source: &ImageSource,
    ) -> Result<Vec<ResolvedImages>, SourceError> {
        match source {
            ImageSource::Browse { root } => {
                let listing = self.browser.browse(root).await?;
                tracing::info!(
                    root = %listing.root,
                    files = listing.files.len(),
                    "Listed image folder"
                );
                let files = FileListing::scoped(&listing.files, &listing.root);
                Ok(names
                    .iter()
                    .map(|name| log_misses(name, resolve_from_listing(name, profile, files)))
                    .collect())
            }
            ImageSource::Probe { base } => Ok(join_all(
                names
                    .iter()
                    .map(|name| self.probe_one(name, profile, base)),
            )
            .await),
        }
    }

    /// Probe both images of one name, portrait candidates first.
    pub async fn probe_one(
        &self,
        name: &str,
        profile: CandidateProfile,
        base: &str,
    ) -> ResolvedImages {
        let candidates = ImageCandidateSet::for_name(name, profile);
        let portrait = self.probe_first(&candidates.portrait, base).await;
        let token = self.probe_first(&candidates.token, base).await;
        log_misses(name, ResolvedImages { portrait, token })
    }

    async fn probe_first(&self, candidates: &CandidateList, base: &str) -> Option<String> {
        for path in candidates.paths_under(base) {
            if self.probe.probe_exists(&path).await {
                return Some(path);
            }
        }
        None
    }
}

fn log_misses(name: &str, images: ResolvedImages) -> ResolvedImages {
    if images.portrait.is_none() {
        tracing::debug!(name, "No portrait image found");
    }
    if images.token.is_none() {
        tracing::debug!(name, "No token image found");
    }
    images
}
