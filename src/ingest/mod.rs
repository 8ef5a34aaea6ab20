//! Artifact ingestion: filename sanitization, category rules, blob
//! retrieval, and persistence.

mod fetch;
mod sanitize;
mod store;

pub use fetch::{Fetcher, HttpFetcher};
pub use sanitize::{SanitizedFilename, claimed_extension_matches, sanitize_filename};
pub use store::UploadStore;

/// Upload categories, each bound to one accepted extension and one
/// destination directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadCategory {
    Mission,
    Preset,
}

impl UploadCategory {
    /// Accepted file extension, matched case-insensitively.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mission => ".pbo",
            Self::Preset => ".html",
        }
    }

    /// Banner prepended to the public rebroadcast of a stored artifact.
    pub fn banner(self) -> &'static str {
        match self {
            Self::Mission => "Mission file received and archived:",
            Self::Preset => "Mod preset received and archived:",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mission => "mission",
            Self::Preset => "preset",
        }
    }
}

/// An untrusted upload offered over the gateway, bound to its category.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Claimed filename, possibly percent-encoded, possibly path-qualified.
    pub claimed_name: String,
    /// Declared byte size; informational only.
    pub size: u64,
    /// Source the blob is fetched from.
    pub url: String,
    pub category: UploadCategory,
}
