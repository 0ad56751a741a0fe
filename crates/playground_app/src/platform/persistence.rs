use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use playground_logging::{pg_info, pg_warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

/// Storage key of the API key.
pub const CREDENTIAL_KEY: &str = "__rvp_apiKey";
const STORE_FILENAME: &str = "credentials.ron";

#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("state directory unavailable: {0}")]
    StateDir(String),
    #[error("failed to serialize credential: {0}")]
    Serialize(#[from] ron::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Process-wide holder of the API key.
pub trait CredentialStore: Send {
    /// Stored credential, or `None` when nothing was saved or it is unreadable.
    fn load(&self) -> Option<String>;
    fn save(&self, value: &str) -> Result<(), PersistError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct PersistedEntries(BTreeMap<String, String>);

/// Keeps the credential in `{dir}/credentials.ron`.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path(&self) -> PathBuf {
        self.dir.join(STORE_FILENAME)
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<String> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                pg_warn!("Failed to read credential from {:?}: {}", path, err);
                return None;
            }
        };

        let PersistedEntries(mut entries) = match ron::from_str::<PersistedEntries>(&content) {
            Ok(entries) => entries,
            Err(err) => {
                pg_warn!("Failed to parse credential file {:?}: {}", path, err);
                return None;
            }
        };
        pg_info!("Loaded credential from {:?}", path);
        entries.remove(CREDENTIAL_KEY)
    }

    fn save(&self, value: &str) -> Result<(), PersistError> {
        let mut entries = BTreeMap::new();
        entries.insert(CREDENTIAL_KEY.to_string(), value.to_string());
        let content =
            ron::ser::to_string_pretty(&PersistedEntries(entries), ron::ser::PrettyConfig::new())?;
        write_atomically(&self.dir, STORE_FILENAME, &content)
    }
}

/// Write `{dir}/{filename}` through a temp file in the same directory so a
/// crash never leaves a truncated file behind.
fn write_atomically(dir: &Path, filename: &str, content: &str) -> Result<(), PersistError> {
    if dir.exists() && !dir.is_dir() {
        return Err(PersistError::StateDir(format!("{dir:?} is not a directory")));
    }
    fs::create_dir_all(dir).map_err(|err| PersistError::StateDir(err.to_string()))?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(dir.join(filename))
        .map_err(|err| PersistError::Io(err.error))?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::{Arc, Mutex};

    use super::{CredentialStore, PersistError};

    /// In-memory store whose contents stay observable through clones.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryCredentialStore {
        value: Arc<Mutex<Option<String>>>,
    }

    impl MemoryCredentialStore {
        pub fn current(&self) -> Option<String> {
            self.value.lock().unwrap().clone()
        }
    }

    impl CredentialStore for MemoryCredentialStore {
        fn load(&self) -> Option<String> {
            self.current()
        }

        fn save(&self, value: &str) -> Result<(), PersistError> {
            *self.value.lock().unwrap() = Some(value.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_nothing() {
        let temp = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp.path().join("state"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_then_load_round_trips_and_creates_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("state");
        let store = FileCredentialStore::new(dir.clone());

        store.save("secret-key").unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.load().as_deref(), Some("secret-key"));

        store.save("").unwrap();
        assert_eq!(store.load().as_deref(), Some(""));
    }

    #[test]
    fn file_uses_the_fixed_key() {
        let temp = TempDir::new().unwrap();
        let store = FileCredentialStore::new(temp.path().to_path_buf());
        store.save("abc").unwrap();

        let raw = fs::read_to_string(temp.path().join(STORE_FILENAME)).unwrap();
        assert!(raw.contains(CREDENTIAL_KEY));
        assert!(raw.contains("abc"));
    }

    #[test]
    fn corrupt_file_loads_nothing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(STORE_FILENAME), "{{{ nope").unwrap();
        let store = FileCredentialStore::new(temp.path().to_path_buf());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn save_fails_when_state_dir_is_a_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("not_a_dir");
        fs::write(&file_path, "x").unwrap();

        let store = FileCredentialStore::new(file_path);
        assert!(matches!(store.save("k"), Err(PersistError::StateDir(_))));
    }
}
