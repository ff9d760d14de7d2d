// Directory scanning: find eligible files and read their text.
//
// Eligible entries sit directly under the root (no recursion), do not
// start with '.', and carry a configured extension. Directories and links
// to directories are skipped. Every other eligible entry is read, dangling
// links included. Entries are sorted by file name so repeated runs over the
// same directory report sectors in the same order.
//
// Reading is fail-fast: the first file that cannot be read as UTF-8 text
// aborts the scan with `ReflectError::ReadFile`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::ReflectionConfig;
use crate::error::ReflectError;

/// One scanned file's name and contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    /// Display name (file name without directory).
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Raw character count of the text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// List eligible files under `root`, sorted by name.
pub fn list_sources(root: &Path, config: &ReflectionConfig) -> Result<Vec<PathBuf>, ReflectError> {
    let read_dir_err = |source| ReflectError::ReadDir {
        path: root.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(root).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if !config.is_eligible(&name) {
            continue;
        }
        let path = entry.path();
        let file_type = entry.file_type().map_err(read_dir_err)?;
        // Dangling links are kept so the read fails loudly.
        let is_dir = file_type.is_dir()
            || (file_type.is_symlink() && fs::metadata(&path).is_ok_and(|m| m.is_dir()));
        if is_dir {
            debug!(path = %path.display(), "skipping directory entry");
            continue;
        }
        paths.push(path);
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Read one file as text.
pub fn read_source(path: &Path) -> Result<SourceFile, ReflectError> {
    let text = fs::read_to_string(path).map_err(|source| ReflectError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceFile { name, text })
}

/// List and read every eligible file under `root`, stopping at the first
/// read failure.
pub fn read_sources(root: &Path, config: &ReflectionConfig) -> Result<Vec<SourceFile>, ReflectError> {
    list_sources(root, config)?
        .iter()
        .map(|path| read_source(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, text: &str) {
        fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn lists_only_eligible_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.js", "feed");
        write(dir.path(), "a.md", "life");
        write(dir.path(), "c.css", "");
        write(dir.path(), "d.html", "");
        write(dir.path(), ".secret.md", "kill");
        write(dir.path(), "notes.txt", "kill");
        write(dir.path(), "introspect.py", "kill");
        fs::create_dir(dir.path().join("folder.md")).unwrap();

        let config = ReflectionConfig::default();
        let names: Vec<String> = list_sources(dir.path(), &config)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["a.md", "b.js", "c.css", "d.html"]);
    }

    #[test]
    fn reads_name_and_text() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "sector.js", "Life finds a way");
        let files = read_sources(dir.path(), &ReflectionConfig::default()).unwrap();
        assert_eq!(files, vec![SourceFile::new("sector.js", "Life finds a way")]);
        assert_eq!(files[0].char_count(), 16);
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_sources(dir.path(), &ReflectionConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn missing_root_is_read_dir_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let err = list_sources(&missing, &ReflectionConfig::default()).unwrap_err();
        assert!(matches!(err, ReflectError::ReadDir { .. }));
    }

    #[test]
    fn non_utf8_file_aborts_scan() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "life");
        fs::write(dir.path().join("b.md"), [0xff, 0xfe, 0x00, 0x9f]).unwrap();
        let err = read_sources(dir.path(), &ReflectionConfig::default()).unwrap_err();
        match err {
            ReflectError::ReadFile { path, .. } => assert!(path.ends_with("b.md")),
            other => panic!("expected ReadFile, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_aborts_scan() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.md", "life");
        std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("lost.md")).unwrap();

        let config = ReflectionConfig::default();
        let listed = list_sources(dir.path(), &config).unwrap();
        assert!(listed.iter().any(|p| p.ends_with("lost.md")));
        let err = read_sources(dir.path(), &config).unwrap_err();
        match err {
            ReflectError::ReadFile { path, .. } => assert!(path.ends_with("lost.md")),
            other => panic!("expected ReadFile, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_follow_their_target() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "real.txt", "feed");
        fs::create_dir(dir.path().join("sub")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("linked.md")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("sub"), dir.path().join("dir.md")).unwrap();

        let files = read_sources(dir.path(), &ReflectionConfig::default()).unwrap();
        assert_eq!(files, vec![SourceFile::new("linked.md", "feed")]);
    }

    #[test]
    fn char_count_counts_chars_not_bytes() {
        let file = SourceFile::new("x.md", "héllo");
        assert_eq!(file.char_count(), 5);
    }
}
