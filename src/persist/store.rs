use std::collections::HashMap;
use std::path::PathBuf;

use crate::foundation::error::{ShotframeError, ShotframeResult};
use crate::persist::schema::{LoadedProject, load_project_str, project_to_json};
use crate::style::project::Project;

/// Key-value storage for serialized projects.
pub trait ProjectStore {
    /// Stored value for `key`, `None` when absent.
    fn load(&self, key: &str) -> ShotframeResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, value: &str) -> ShotframeResult<()>;
}

/// In-process store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProjectStore for MemoryStore {
    fn load(&self, key: &str) -> ShotframeResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> ShotframeResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Store rooted at `root`; the directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> ShotframeResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(ShotframeError::persistence(format!(
                "invalid store key '{key}'"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl ProjectStore for DirStore {
    fn load(&self, key: &str) -> ShotframeResult<Option<String>> {
        let p = self.path_for(key)?;
        match std::fs::read_to_string(&p) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ShotframeError::persistence(format!(
                "failed to read '{}': {e}",
                p.display()
            ))),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> ShotframeResult<()> {
        let p = self.path_for(key)?;
        std::fs::create_dir_all(&self.root).map_err(|e| {
            ShotframeError::persistence(format!(
                "failed to create '{}': {e}",
                self.root.display()
            ))
        })?;
        std::fs::write(&p, value).map_err(|e| {
            ShotframeError::persistence(format!("failed to write '{}': {e}", p.display()))
        })
    }
}

/// Store wrapper that runs the schema upgrade chain on load.
///
/// Storage problems never reach the caller: they are logged and treated as "nothing stored" or
/// "not persisted".
pub struct PersistenceAdapter<S> {
    store: S,
}

impl<S: ProjectStore> PersistenceAdapter<S> {
    /// Wrap `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load and upgrade the project under `key`.
    pub fn load_project(&self, key: &str) -> Option<LoadedProject> {
        let raw = match self.store.load(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "project store unavailable");
                return None;
            }
        };
        match load_project_str(&raw) {
            Ok(loaded) => Some(loaded),
            Err(e) => {
                tracing::warn!(key, error = %e, "stored project unreadable");
                None
            }
        }
    }

    /// Persist `project` under `key`. Returns whether it was stored.
    pub fn save_project(&mut self, key: &str, project: &Project) -> bool {
        let json = match project_to_json(project) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "project not serializable");
                return false;
            }
        };
        match self.store.save(key, &json) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "project not persisted");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/persist/store.rs"]
mod tests;
