//! Platform binary selection.
//!
//! The game build system leaves the compiled binary at one of two paths
//! depending on the host platform. The target is resolved once, up front,
//! so a missing build surfaces as a named error rather than a not-found
//! failure partway through packaging.

use anyhow::{bail, Result};
use std::path::Path;

const UNIX_BINARY: &str = "build/src/cataclysm-tiles";
const WINDOWS_BINARY: &str = "build/src/cataclysm-tiles.exe";

/// Which platform's game binary a release is packaged from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryTarget {
    Unix,
    Windows,
}

impl BinaryTarget {
    /// Resolve the target by probing the build output under `root`.
    ///
    /// The unix binary wins when both are present.
    pub fn detect(root: &Path) -> Result<Self> {
        if root.join(UNIX_BINARY).is_file() {
            return Ok(Self::Unix);
        }
        if root.join(WINDOWS_BINARY).is_file() {
            return Ok(Self::Windows);
        }
        bail!(
            "No game binary found: neither {} nor {} exists under {}; run the game build first",
            UNIX_BINARY,
            WINDOWS_BINARY,
            root.display()
        );
    }

    /// Path of the compiled binary, relative to the release root.
    pub fn source_path(self) -> &'static Path {
        match self {
            Self::Unix => Path::new(UNIX_BINARY),
            Self::Windows => Path::new(WINDOWS_BINARY),
        }
    }

    /// Entry name the binary is distributed under inside the archive.
    ///
    /// The leading `./` is part of the distributed name.
    pub fn archive_name(self) -> &'static str {
        match self {
            Self::Unix => "./cataclysm-bnmt",
            Self::Windows => "./cataclysm-bnmt.exe",
        }
    }
}
