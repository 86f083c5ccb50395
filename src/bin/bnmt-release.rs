use std::path::Path;

use anyhow::{bail, Result};

fn usage() -> &'static str {
    "Usage:\n  bnmt-release\n\nPackages bnmt-bindist.zip from the current directory. Takes no arguments."
}

fn main() -> Result<()> {
    if std::env::args().len() > 1 {
        bail!(usage());
    }
    bnmt_release::build_release(Path::new("."))?;
    Ok(())
}
