use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{DeficiencyType, DisplayMode, Verdict};

/// Key holding the active [`DisplayMode`].
pub const DISPLAY_MODE_KEY: &str = "colorMode";
/// Key holding the most recently detected [`DeficiencyType`].
pub const DEFICIENCY_TYPE_KEY: &str = "deficiencyType";
/// Key set once the learner has completed onboarding.
pub const ONBOARDING_DONE_KEY: &str = "firstTimeDone";

/// String key-value store backing persisted learner preferences.
pub trait PreferenceStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory preference store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryPreferences {
    entries: BTreeMap<String, String>,
}

impl MemoryPreferences {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn from_entries(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Read-only view of every stored entry.
    #[must_use]
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let _ = self.entries.insert(key.to_owned(), value.to_owned());
    }
}

/// Reads the active display mode, defaulting to normal.
#[must_use]
pub fn display_mode<S>(store: &S) -> DisplayMode
where
    S: PreferenceStore + ?Sized,
{
    store
        .get(DISPLAY_MODE_KEY)
        .map_or(DisplayMode::Normal, |raw| DisplayMode::parse_or_default(&raw))
}

/// Parses and stores `raw` as the active display mode.
///
/// Unknown modes are logged and replaced with [`DisplayMode::Normal`]. Returns
/// the mode that was stored.
pub fn set_display_mode<S>(store: &mut S, raw: &str) -> DisplayMode
where
    S: PreferenceStore + ?Sized,
{
    let mode = DisplayMode::parse_or_default(raw);
    store.set(DISPLAY_MODE_KEY, mode.as_str());
    debug!(mode = mode.as_str(), "display mode stored");
    mode
}

/// Reads the most recently detected deficiency type.
///
/// Unparseable values are logged and treated as absent.
#[must_use]
pub fn detected_deficiency<S>(store: &S) -> Option<DeficiencyType>
where
    S: PreferenceStore + ?Sized,
{
    let raw = store.get(DEFICIENCY_TYPE_KEY)?;
    match raw.parse() {
        Ok(deficiency) => Some(deficiency),
        Err(error) => {
            warn!(%error, "ignoring stored deficiency type");
            None
        }
    }
}

/// Persists a completed verdict: detected type, recommended mode and the
/// onboarding flag.
pub fn save_verdict<S>(store: &mut S, verdict: &Verdict)
where
    S: PreferenceStore + ?Sized,
{
    store.set(DEFICIENCY_TYPE_KEY, verdict.category.as_str());
    store.set(DISPLAY_MODE_KEY, verdict.recommended_mode.as_str());
    store.set(ONBOARDING_DONE_KEY, "true");
}
