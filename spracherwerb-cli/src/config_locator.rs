//! Config Locator - find the configuration file the normalizer should load
//!
//! Looks in the project's `configs/` directory first, then in the user's
//! config directory. Inside a directory `config.json` wins, then any other
//! JSON/YAML file in name order. The shipped `config_example.*` is a
//! template and never picked up.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PREFERRED_CONFIG: &str = "config.json";
const EXAMPLE_CONFIG_STEM: &str = "config_example";

/// Searches a fixed list of directories for a config file
pub struct ConfigLocator {
    search_dirs: Vec<PathBuf>,
}

impl ConfigLocator {
    /// Create a locator using `./configs` and the user config directory
    /// (e.g. ~/.config/spracherwerb)
    pub fn new() -> Self {
        let mut search_dirs = vec![PathBuf::from("configs")];
        if let Some(dir) = Self::user_config_dir() {
            search_dirs.push(dir);
        }
        Self { search_dirs }
    }

    pub fn with_dirs(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|base| base.join("spracherwerb"))
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Explicit path wins, even if missing, so that loading reports it.
    /// `None` means the built-in ruleset should be used.
    pub fn locate(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }

        for dir in &self.search_dirs {
            if let Some(found) = Self::find_in_dir(dir) {
                debug!(path = %found.display(), "found config file");
                return Some(found);
            }
            debug!(dir = %dir.display(), "no config file in directory");
        }
        None
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        let preferred = dir.join(PREFERRED_CONFIG);
        if preferred.is_file() {
            return Some(preferred);
        }

        let entries = fs::read_dir(dir).ok()?;
        let mut candidates: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && Self::is_config_file(path))
            .collect();
        candidates.sort();

        candidates.into_iter().next()
    }

    fn is_config_file(path: &Path) -> bool {
        let is_example = path.file_stem().and_then(|s| s.to_str()) == Some(EXAMPLE_CONFIG_STEM);
        !is_example
            && matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("json") | Some("yaml") | Some("yml")
            )
    }
}

impl Default for ConfigLocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, "{}").unwrap();
        path
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "config.json");
        let locator = ConfigLocator::with_dirs(vec![dir.path().to_path_buf()]);
        let explicit = Path::new("/somewhere/else.yaml");
        assert_eq!(locator.locate(Some(explicit)), Some(explicit.to_path_buf()));
    }

    #[test]
    fn test_config_json_preferred() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a_custom.yaml");
        touch(dir.path(), "config_example.json");
        let preferred = touch(dir.path(), "config.json");
        let locator = ConfigLocator::with_dirs(vec![dir.path().to_path_buf()]);
        assert_eq!(locator.locate(None), Some(preferred));
    }

    #[test]
    fn test_custom_config_before_example() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "config_example.json");
        let custom = touch(dir.path(), "lessons.yaml");
        touch(dir.path(), "notes.txt");
        let locator = ConfigLocator::with_dirs(vec![dir.path().to_path_buf()]);
        assert_eq!(locator.locate(None), Some(custom));
    }

    #[test]
    fn test_example_is_never_picked() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "config_example.json");
        touch(dir.path(), "config_example.yaml");
        let locator = ConfigLocator::with_dirs(vec![dir.path().to_path_buf()]);
        assert_eq!(locator.locate(None), None);
    }

    #[test]
    fn test_later_directories_searched() {
        let empty = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        let found = touch(user.path(), "config.json");
        let locator = ConfigLocator::with_dirs(vec![
            empty.path().to_path_buf(),
            PathBuf::from("/nonexistent/spracherwerb"),
            user.path().to_path_buf(),
        ]);
        assert_eq!(locator.locate(None), Some(found));
    }

    #[test]
    fn test_nothing_found() {
        let empty = tempfile::tempdir().unwrap();
        let locator = ConfigLocator::with_dirs(vec![empty.path().to_path_buf()]);
        assert_eq!(locator.locate(None), None);
    }
}
