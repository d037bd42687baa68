use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
};

use huecheck_core::PreferenceStore;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or saving the preference file.
#[derive(Debug, Error)]
pub(crate) enum PreferenceError {
    /// The preference file exists but could not be read.
    #[error("failed to read preferences at {path}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The preference file is not a flat TOML table of strings.
    #[error("preferences at {path} are not a table of strings")]
    Parse {
        /// File that was parsed.
        path: PathBuf,
        /// Underlying TOML failure.
        #[source]
        source: toml::de::Error,
    },
    /// The entries could not be encoded as TOML.
    #[error("failed to encode preferences")]
    Encode(#[from] toml::ser::Error),
    /// The preference file could not be written.
    #[error("failed to write preferences to {path}")]
    Write {
        /// File that was written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Preference store persisted as a TOML table.
///
/// Changes stay in memory until [`FilePreferences::save`] is called.
#[derive(Debug)]
pub(crate) struct FilePreferences {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl FilePreferences {
    /// Loads the store at `path`. A missing file yields an empty store.
    pub(crate) fn load(path: &Path) -> Result<Self, PreferenceError> {
        let entries = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|source| PreferenceError::Parse {
                path: path.to_path_buf(),
                source,
            })?,
            Err(error) if error.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => {
                return Err(PreferenceError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        debug!(path = %path.display(), entries = entries.len(), "preferences loaded");
        Ok(Self {
            path: path.to_path_buf(),
            entries,
            dirty: false,
        })
    }

    /// File backing the store.
    #[must_use]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Writes pending changes back to disk.
    ///
    /// Returns `false` without touching the file when nothing changed.
    pub(crate) fn save(&mut self) -> Result<bool, PreferenceError> {
        if !self.dirty {
            return Ok(false);
        }
        let contents = toml::to_string(&self.entries)?;
        fs::write(&self.path, contents).map_err(|source| PreferenceError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.dirty = false;
        debug!(path = %self.path.display(), "preferences saved");
        Ok(true)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.entries.get(key).map(String::as_str) != Some(value) {
            let _ = self.entries.insert(key.to_owned(), value.to_owned());
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huecheck_core::{
        display_mode, save_verdict, DeficiencyType, DisplayMode, Verdict, DISPLAY_MODE_KEY,
    };
    use tempfile::TempDir;

    fn scratch_file(dir: &TempDir) -> PathBuf {
        dir.path().join("preferences.toml")
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().expect("temp dir");
        let path = scratch_file(&dir);
        let store = FilePreferences::load(&path).expect("missing file is fine");
        assert_eq!(store.get(DISPLAY_MODE_KEY), None);
        assert_eq!(display_mode(&store), DisplayMode::Normal);
        assert_eq!(store.path(), path.as_path());
    }

    #[test]
    fn saved_verdict_survives_a_reload() {
        let dir = TempDir::new().expect("temp dir");
        let path = scratch_file(&dir);
        let mut store = FilePreferences::load(&path).expect("load");
        save_verdict(
            &mut store,
            &Verdict::new(DeficiencyType::Tritanopia, DisplayMode::Tritanopia),
        );
        assert!(store.save().expect("save"));
        assert!(!store.save().expect("nothing pending"));

        let reloaded = FilePreferences::load(&path).expect("reload");
        assert_eq!(display_mode(&reloaded), DisplayMode::Tritanopia);
        assert_eq!(reloaded.get("deficiencyType").as_deref(), Some("tritanopia"));
        assert_eq!(reloaded.get("firstTimeDone").as_deref(), Some("true"));
    }

    #[test]
    fn unchanged_values_do_not_mark_the_store_dirty() {
        let dir = TempDir::new().expect("temp dir");
        let path = scratch_file(&dir);
        fs::write(&path, "colorMode = \"protanopia\"\n").expect("seed file");
        let mut store = FilePreferences::load(&path).expect("load");
        store.set(DISPLAY_MODE_KEY, "protanopia");
        assert!(!store.save().expect("save"));
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = TempDir::new().expect("temp dir");
        let path = scratch_file(&dir);
        fs::write(&path, "colorMode = [1, 2]\n").expect("seed file");
        let error = FilePreferences::load(&path).expect_err("not a string table");
        assert!(matches!(error, PreferenceError::Parse { .. }));
    }
}
