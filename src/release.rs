//! The BNMT release manifest and packaging run.
//!
//! The manifest is fixed: one renamed game binary, the README, the
//! keybinding definitions, and two directory trees of mod data and
//! documentation. Nothing is runtime-configurable.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::archive::ReleaseArchive;
use crate::binary::BinaryTarget;

/// Output archive written into the release root.
pub const ARCHIVE_NAME: &str = "bnmt-bindist.zip";

/// Individual files shipped at their source paths.
const RELEASE_FILES: &[&str] = &["README.md", "data/raw/keybindings/bnmt.json"];

/// Directory trees shipped recursively at their source paths.
const RELEASE_DIRS: &[&str] = &["data/mods/_me_interface", "doc/BNMT"];

/// Package a BNMT binary distribution from the tree at `root`.
///
/// Resolves the platform binary, then writes the renamed binary, the
/// release files, and the release directory trees into
/// `<root>/bnmt-bindist.zip`, truncating any previous archive. Returns the
/// archive path.
///
/// Any missing or unreadable source aborts the run; a partially written
/// archive may remain on disk.
pub fn build_release(root: &Path) -> Result<PathBuf> {
    let target = BinaryTarget::detect(root)?;

    let archive_path = root.join(ARCHIVE_NAME);
    println!("Packaging {}", archive_path.display());
    let mut archive = ReleaseArchive::create(&archive_path)?;

    println!(
        "  Binary: {} -> {}",
        target.source_path().display(),
        target.archive_name()
    );
    archive.add_file(&root.join(target.source_path()), target.archive_name())?;

    for file in RELEASE_FILES {
        println!("  File: {file}");
        archive.add_file(&root.join(file), file)?;
    }

    for dir in RELEASE_DIRS {
        println!("  Tree: {dir}");
        archive.add_dir(&root.join(dir), dir)?;
    }

    archive.finish()?;
    println!("  Done: {}", archive_path.display());
    Ok(archive_path)
}
