//! Filesystem lookups behind a small trait.
//!
//! Existence validation only ever asks two questions of the disk, so the
//! trait stays at two predicates and the validation logic can be exercised
//! against an in-memory tree in tests.

use std::path::{Path, PathBuf};

/// Existence predicates used by module validation. `Sync` so the existence
/// pass can fan out over rayon.
pub trait Filesystem: Sync {
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;
}

/// The real filesystem.
pub struct OsFs;

impl Filesystem for OsFs {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

/// Map a dotted module name to a relative path, one directory per segment.
pub fn module_rel_path(module: &str) -> PathBuf {
    module.split('.').collect()
}

/// In-memory tree for unit tests.
#[cfg(test)]
#[derive(Default)]
pub struct FakeFs {
    files: std::collections::HashSet<PathBuf>,
    dirs: std::collections::HashSet<PathBuf>,
}

#[cfg(test)]
impl FakeFs {
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    pub fn dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }
}

#[cfg(test)]
impl Filesystem for FakeFs {
    fn is_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_rel_path_maps_dots_to_separators() {
        let p = module_rel_path("homeassistant.components.demo");
        assert_eq!(p, Path::new("homeassistant/components/demo"));
    }

    #[test]
    fn test_fake_fs_predicates() {
        let fs = FakeFs::default()
            .file("/repo/homeassistant/core.py")
            .dir("/repo/homeassistant");
        assert!(fs.is_file(Path::new("/repo/homeassistant/core.py")));
        assert!(!fs.is_dir(Path::new("/repo/homeassistant/core.py")));
        assert!(fs.is_dir(Path::new("/repo/homeassistant")));
        assert!(!fs.is_file(Path::new("/repo/missing.py")));
    }
}
