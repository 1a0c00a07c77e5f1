//! Directory tree conventions
//!
//! ```text
//! out/<doc>/<page>.<ext>          page raster
//! out/<doc>/<page>/<n>.<ext>      region n of the page
//! out/<doc>/<page>/<n>_<role>.<ext>
//! out/<doc>/<page>_unchecked/     page left for review
//! ```
//!
//! Listings are in natural order, so `2.png` sorts before `10.png`.

use folio_chronicle::UNCHECKED_SUFFIX;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Chunk<'a> {
    Number(u64, &'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut out = Vec::new();
    let mut start = 0;
    let bytes = s.as_bytes();
    while start < bytes.len() {
        let digit = bytes[start].is_ascii_digit();
        let end = bytes[start..]
            .iter()
            .position(|b| b.is_ascii_digit() != digit)
            .map_or(bytes.len(), |n| start + n);
        let part = &s[start..end];
        out.push(match part.parse::<u64>() {
            Ok(n) if digit => Chunk::Number(n, part),
            _ => Chunk::Text(part),
        });
        start = end;
    }
    out
}

/// Compare two names, treating runs of digits as numbers
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    chunks(a).cmp(&chunks(b))
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn sort_natural(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&name_of(a), &name_of(b)));
}

/// Files directly inside `dir` with extension `ext` (case-insensitive)
pub fn list_files(dir: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if path.is_file() && matches {
            files.push(path);
        }
    }
    sort_natural(&mut files);
    Ok(files)
}

/// Directories directly inside `dir`
pub fn list_sub_dirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    sort_natural(&mut dirs);
    Ok(dirs)
}

/// Page rasters of every document under `root`
pub fn list_pages(root: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let mut pages = Vec::new();
    for doc in list_sub_dirs(root)? {
        pages.extend(list_files(&doc, ext)?);
    }
    Ok(pages)
}

/// Region directories of every page under `root`, marked ones included
pub fn list_region_dirs(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for doc in list_sub_dirs(root)? {
        dirs.extend(list_sub_dirs(&doc)?);
    }
    Ok(dirs)
}

/// Region directory of a page raster: the page path without extension
pub fn region_dir(page: &Path) -> PathBuf {
    page.with_extension("")
}

/// Review directory of a page raster: its region directory, marked
pub fn unchecked_dir(page: &Path) -> PathBuf {
    let mut marked = region_dir(page).into_os_string();
    marked.push(UNCHECKED_SUFFIX);
    PathBuf::from(marked)
}

/// True once the page has been left for review
///
/// Marked pages are never processed again automatically.
pub fn is_marked(page: &Path) -> bool {
    unchecked_dir(page).is_dir()
}

/// Remove the files with extension `ext` directly inside `dir`
///
/// Returns the number of files removed.
pub fn clear_files(dir: &Path, ext: &str) -> io::Result<usize> {
    let files = list_files(dir, ext)?;
    for file in &files {
        fs::remove_file(file)?;
    }
    Ok(files.len())
}

/// Make `dir` an empty directory, creating it if needed
pub fn reset_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_order() {
        let mut names = vec!["10.png", "2.png", "1_political.png", "1.png", "a", "page2", "page10"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(
            names,
            vec!["1.png", "1_political.png", "2.png", "10.png", "a", "page2", "page10"]
        );
    }

    #[test]
    fn test_listing_and_clearing() {
        let root = tempfile::tempdir().unwrap();
        let doc = root.path().join("chronicle");
        fs::create_dir_all(doc.join("10")).unwrap();
        fs::create_dir_all(doc.join("2_unchecked")).unwrap();
        for name in ["10.png", "2.PNG", "notes.txt"] {
            fs::write(doc.join(name), b"x").unwrap();
        }

        let pages = list_pages(root.path(), "png").unwrap();
        assert_eq!(pages, vec![doc.join("2.PNG"), doc.join("10.png")]);

        let dirs = list_region_dirs(root.path()).unwrap();
        assert_eq!(dirs, vec![doc.join("2_unchecked"), doc.join("10")]);

        assert_eq!(region_dir(&doc.join("10.png")), doc.join("10"));
        assert_eq!(unchecked_dir(&doc.join("2.PNG")), doc.join("2_unchecked"));
        assert!(is_marked(&doc.join("2.PNG")));
        assert!(!is_marked(&doc.join("10.png")));

        assert_eq!(clear_files(&doc, "png").unwrap(), 2);
        assert!(doc.join("notes.txt").exists());
    }

    #[test]
    fn test_reset_dir() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("3");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("1.png"), b"x").unwrap();
        reset_dir(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }
}
