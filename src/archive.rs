//! Zip archive creation for release bundles.
//!
//! Thin wrapper around `zip::ZipWriter` that adds single files and whole
//! directory trees under caller-chosen entry names. Entries are deflate
//! compressed and streamed from disk rather than buffered whole.

use anyhow::{Context, Result};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// An in-progress release archive.
///
/// Write-once and append-only: entries are added one at a time and the
/// central directory is written by [`ReleaseArchive::finish`]. Dropping the
/// builder without finishing closes the output file but leaves its contents
/// in an undefined partial state.
pub struct ReleaseArchive {
    writer: ZipWriter<File>,
    path: PathBuf,
}

impl ReleaseArchive {
    /// Open a new archive at `path`, truncating any existing file there.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create archive {}", path.display()))?;
        Ok(Self {
            writer: ZipWriter::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Path the archive is being written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add one regular file under the entry name `dest`.
    ///
    /// On unix the source permission bits are carried into the entry, so an
    /// executable stays executable after extraction.
    pub fn add_file(&mut self, src: &Path, dest: &str) -> Result<()> {
        let mut reader =
            File::open(src).with_context(|| format!("Failed to open {}", src.display()))?;

        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        #[cfg(unix)]
        let options = {
            use std::os::unix::fs::PermissionsExt;
            let metadata = reader
                .metadata()
                .with_context(|| format!("Failed to stat {}", src.display()))?;
            options.unix_permissions(metadata.permissions().mode())
        };

        self.writer
            .start_file(dest, options)
            .with_context(|| format!("Failed to start archive entry {dest}"))?;
        io::copy(&mut reader, &mut self.writer).with_context(|| {
            format!(
                "Failed to write {} into {}",
                src.display(),
                self.path.display()
            )
        })?;
        Ok(())
    }

    /// Add every file at any depth under `src_root`, placing each one at
    /// `dest_root` joined with its path relative to `src_root`.
    ///
    /// Directories themselves are not added as entries, only the files they
    /// contain. Entry order follows the walk and is not sorted.
    pub fn add_dir(&mut self, src_root: &Path, dest_root: &str) -> Result<()> {
        for entry in WalkDir::new(src_root) {
            let entry =
                entry.with_context(|| format!("Failed to walk {}", src_root.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let rel = entry.path().strip_prefix(src_root).with_context(|| {
                format!(
                    "Walked path {} escapes root {}",
                    entry.path().display(),
                    src_root.display()
                )
            })?;
            let dest = join_entry_name(dest_root, rel);
            self.add_file(entry.path(), &dest)?;
        }
        Ok(())
    }

    /// Finalize the central directory and flush the output file.
    pub fn finish(self) -> Result<()> {
        self.writer
            .finish()
            .with_context(|| format!("Failed to finalize archive {}", self.path.display()))?;
        Ok(())
    }
}

/// Join a destination root with a relative path using forward slashes,
/// the separator zip entry names use on every platform.
fn join_entry_name(dest_root: &str, rel: &Path) -> String {
    let mut name = dest_root.trim_end_matches('/').to_string();
    for part in rel.components() {
        name.push('/');
        name.push_str(&part.as_os_str().to_string_lossy());
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    fn entry_names(path: &Path) -> BTreeSet<String> {
        let archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        archive.file_names().map(String::from).collect()
    }

    #[test]
    fn add_file_stores_content_under_dest_name() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("readme.txt");
        fs::write(&src, "hello").unwrap();

        let out = tmp.path().join("test.zip");
        let mut archive = ReleaseArchive::create(&out).unwrap();
        archive.add_file(&src, "./renamed.txt").unwrap();
        archive.finish().unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let mut entry = zip.by_name("./renamed.txt").unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn add_file_missing_source_fails() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("test.zip");
        let mut archive = ReleaseArchive::create(&out).unwrap();
        let err = archive
            .add_file(&tmp.path().join("absent"), "absent")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to open"));
    }

    #[test]
    fn add_dir_preserves_relative_paths_without_dir_entries() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("tree");
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("top.json"), "{}").unwrap();
        fs::write(root.join("a/b/deep.json"), "{}").unwrap();

        let out = tmp.path().join("test.zip");
        let mut archive = ReleaseArchive::create(&out).unwrap();
        archive.add_dir(&root, "data/tree").unwrap();
        archive.finish().unwrap();

        let names = entry_names(&out);
        let expected: BTreeSet<String> = ["data/tree/top.json", "data/tree/a/b/deep.json"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn add_dir_missing_root_fails() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("test.zip");
        let mut archive = ReleaseArchive::create(&out).unwrap();
        let err = archive
            .add_dir(&tmp.path().join("no-such-dir"), "data")
            .unwrap_err();
        assert!(err.to_string().contains("Failed to walk"));
    }

    #[cfg(unix)]
    #[test]
    fn add_file_preserves_unix_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("tool");
        fs::write(&src, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&src, fs::Permissions::from_mode(0o755)).unwrap();

        let out = tmp.path().join("test.zip");
        let mut archive = ReleaseArchive::create(&out).unwrap();
        archive.add_file(&src, "tool").unwrap();
        archive.finish().unwrap();

        let mut zip = zip::ZipArchive::new(File::open(&out).unwrap()).unwrap();
        let entry = zip.by_name("tool").unwrap();
        assert_eq!(entry.unix_mode().unwrap() & 0o777, 0o755);
    }
}
