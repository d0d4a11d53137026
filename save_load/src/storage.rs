use {
    crate::SaveError,
    bevy::platform::collections::HashMap,
    std::{
        fs, io,
        path::{Path, PathBuf},
        sync::{Arc, Mutex, PoisonError},
    },
};

/// Durable key-value store for serialized saves.
pub trait SaveStorage: Send + Sync {
    /// `Ok(None)` when nothing has been stored under `key`.
    fn read(&self, key: &str) -> Result<Option<String>, SaveError>;
    fn write(&self, key: &str, data: &str) -> Result<(), SaveError>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SaveStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, data: &str) -> Result<(), SaveError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Write then rename so a crash mid-write never leaves a truncated save.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, data)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }
}

impl SaveStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SaveError> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, data: &str) -> Result<(), SaveError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), data.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));

        assert!(storage.read("slot").unwrap().is_none());
        storage.write("slot", "{\"level\":2}").unwrap();
        assert_eq!(storage.read("slot").unwrap().as_deref(), Some("{\"level\":2}"));
        assert!(storage.path_for("slot").ends_with("nested/slot.json"));

        storage.write("slot", "{}").unwrap();
        assert_eq!(storage.read("slot").unwrap().as_deref(), Some("{}"));
        assert!(!storage.path_for("slot").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_storage_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        // A directory where the file should be cannot be read as text.
        fs::create_dir(storage.path_for("slot")).unwrap();
        assert!(matches!(storage.read("slot"), Err(SaveError::Io(_))));
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let storage = MemoryStorage::default();
        let view = storage.clone();
        storage.write("slot", "data").unwrap();
        assert_eq!(view.get("slot").as_deref(), Some("data"));
    }
}
