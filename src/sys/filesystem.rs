//! Filesystem access used by probes.

use include_dir::Dir;
use std::io;
use std::path::Path;

/// Read-mostly filesystem access.
pub trait FileSystem: Send + Sync {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Names of the entries directly inside `path`, sorted.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Write the contents of an embedded archive below `dest`.
    fn extract_archive(&self, archive: &Dir<'_>, dest: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemFileSystem;

impl FileSystem for SystemFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        // read_dir order is platform-dependent
        names.sort();
        Ok(names)
    }

    fn extract_archive(&self, archive: &Dir<'_>, dest: &Path) -> io::Result<()> {
        std::fs::create_dir_all(dest)?;
        archive.extract(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use include_dir::include_dir;
    use std::fs;
    use tempfile::TempDir;

    static FIXTURE: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/fixtures/cocoapods-verification");

    #[test]
    fn list_dir_is_sorted() {
        let temp = TempDir::new().unwrap();
        for name in ["25.0.2", "23.0.1", "24.0.0"] {
            fs::create_dir_all(temp.path().join(name)).unwrap();
        }

        let names = SystemFileSystem.list_dir(temp.path()).unwrap();
        assert_eq!(names, vec!["23.0.1", "24.0.0", "25.0.2"]);
    }

    #[test]
    fn list_dir_missing_directory_errors() {
        let temp = TempDir::new().unwrap();
        assert!(SystemFileSystem
            .list_dir(&temp.path().join("nope"))
            .is_err());
    }

    #[test]
    fn exists_reports_files_and_dirs() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("file"), "x").unwrap();

        assert!(SystemFileSystem.exists(temp.path()));
        assert!(SystemFileSystem.exists(&temp.path().join("file")));
        assert!(!SystemFileSystem.exists(&temp.path().join("missing")));
    }

    #[test]
    fn extract_archive_writes_fixture_project() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("out");

        SystemFileSystem.extract_archive(&FIXTURE, &dest).unwrap();

        assert!(dest.join("cocoapods").join("Podfile").is_file());
        assert!(dest
            .join("cocoapods")
            .join("cocoapods.xcodeproj")
            .join("project.pbxproj")
            .is_file());
    }
}
