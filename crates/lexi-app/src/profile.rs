use std::fs;
use std::path::Path;
use std::sync::Arc;

use lexi_core::{JsonFilePreferenceStore, PreferenceError, Preferences};

/// Open the user's preference file.
///
/// A corrupt file is moved aside and replaced by first-run defaults rather
/// than keeping the app from starting.
pub fn open_preferences(path: &Path) -> anyhow::Result<Preferences> {
    let store = match JsonFilePreferenceStore::open(path) {
        Ok(store) => store,
        Err(PreferenceError::ParseError(e)) => {
            let backup = path.with_extension("json.bak");
            tracing::warn!(
                "Preferences at {} are unreadable ({e}), moving them to {}",
                path.display(),
                backup.display()
            );
            fs::rename(path, &backup)?;
            JsonFilePreferenceStore::open(path)?
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Using preferences at {}", store.path().display());
    Ok(Preferences::new(Arc::new(store)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_preferences_are_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "{{{").unwrap();

        let prefs = open_preferences(&path).unwrap();

        assert!(prefs.suggestions_enabled());
        assert!(dir.path().join("preferences.json.bak").exists());
        prefs.set_suggestions_enabled(false).unwrap();
        assert!(!open_preferences(&path).unwrap().suggestions_enabled());
    }
}
