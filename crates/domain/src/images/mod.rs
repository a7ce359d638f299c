//! Image resolution for character portraits and tokens.

mod candidates;
mod resolver;

pub use candidates::{CandidateList, CandidateProfile, ImageCandidateSet};
pub use resolver::{basename, resolve_from_listing, FileListing, ResolvedImages};
