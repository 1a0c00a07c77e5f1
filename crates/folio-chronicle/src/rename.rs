//! Recording roles in the file tree
//!
//! Region files are renamed `<stem>_<role>.<ext>`. Region directories of
//! pages that need review are renamed `<dir>_unchecked`. Renames are
//! skipped when the name already carries the role or the suffix, so a
//! second pass over the same tree changes nothing.

use crate::{ChronicleError, ChronicleResult, PageClassification, Role};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to the region directory of a page left for review
pub const UNCHECKED_SUFFIX: &str = "_unchecked";

/// Target file name for a region file labelled `role`
///
/// Returns `None` when no rename applies: the role is
/// [`Role::Unchecked`] or its name already occurs in the file name.
pub fn role_file_name(path: &Path, role: Role) -> ChronicleResult<Option<PathBuf>> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ChronicleError::InvalidPath(path.to_path_buf()))?;

    if role == Role::Unchecked || file_name.contains(role.name()) {
        return Ok(None);
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ChronicleError::InvalidPath(path.to_path_buf()))?;
    let new_name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}_{}.{}", stem, role.name(), ext),
        None => format!("{}_{}", stem, role.name()),
    };

    Ok(Some(path.with_file_name(new_name)))
}

/// Rename a region file to carry `role`, returning its final path
pub fn rename_with_role(path: &Path, role: Role) -> ChronicleResult<PathBuf> {
    match role_file_name(path, role)? {
        Some(target) => {
            fs::rename(path, &target)?;
            debug!("{} -> {}", path.display(), target.display());
            Ok(target)
        }
        None => Ok(path.to_path_buf()),
    }
}

/// Rename every region file of a page after its classification
///
/// `files` must be in region order. Returns the final paths.
pub fn rename_regions(
    files: &[PathBuf],
    classification: &PageClassification,
) -> ChronicleResult<Vec<PathBuf>> {
    if files.len() != classification.len() {
        return Err(ChronicleError::RegionCountMismatch {
            expected: classification.len(),
            actual: files.len(),
        });
    }

    files
        .iter()
        .zip(classification.roles())
        .map(|(file, role)| rename_with_role(file, *role))
        .collect()
}

/// True if `dir` already carries the unchecked suffix
pub fn is_unchecked_dir(dir: &Path) -> bool {
    dir.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(UNCHECKED_SUFFIX))
}

/// Rename a page's region directory to `<dir>_unchecked`
///
/// Returns the new path, or `None` if the directory was already marked.
pub fn mark_unchecked(dir: &Path) -> ChronicleResult<Option<PathBuf>> {
    if is_unchecked_dir(dir) {
        return Ok(None);
    }

    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ChronicleError::InvalidPath(dir.to_path_buf()))?;
    let target = dir.with_file_name(format!("{}{}", name, UNCHECKED_SUFFIX));

    fs::rename(dir, &target)?;
    info!("marked {} for review", target.display());
    Ok(Some(target))
}
