//! Folder tree of the generated API project.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::constants::GITKEEP_FILE;
use crate::error::{Error, Result};

/// Creates every folder in `folders` under `base` and drops a `.gitkeep` in each.
///
/// Existing folders and `.gitkeep` files are left as they are, so running
/// this twice is harmless.
///
/// # Returns
/// * `Result<Vec<PathBuf>>` - The created (or already existing) folders, in order
pub fn create_folders<P: AsRef<Path>>(base: P, folders: &[&str]) -> Result<Vec<PathBuf>> {
    let base = base.as_ref();
    let mut created = Vec::with_capacity(folders.len());

    for folder in folders {
        let path = base.join(folder);
        fs::create_dir_all(&path).map_err(Error::IoError)?;

        let gitkeep = path.join(GITKEEP_FILE);
        if !gitkeep.exists() {
            fs::File::create(&gitkeep).map_err(Error::IoError)?;
        }
        info!("Folder + {GITKEEP_FILE}: {}", path.display());
        created.push(path);
    }

    Ok(created)
}
