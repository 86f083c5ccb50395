//! Release packaging for BNMT binary distributions.
//!
//! Packages one compiled game binary together with the mod data and
//! documentation it ships with into a single deflate-compressed zip
//! archive (`bnmt-bindist.zip`):
//!
//! - **Binary selection** - Resolves the unix or windows build output and
//!   renames it to the distributed name
//! - **Archive builder** - Streams individual files and whole directory
//!   trees into the zip, preserving relative paths
//! - **Release manifest** - The fixed list of sources every release ships
//!
//! # Example
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! let archive = bnmt_release::build_release(Path::new("."))?;
//! println!("wrote {}", archive.display());
//! ```

pub mod archive;
pub mod binary;
pub mod release;

pub use archive::ReleaseArchive;
pub use binary::BinaryTarget;
pub use release::{build_release, ARCHIVE_NAME};
