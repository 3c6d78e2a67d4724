use std::fs;
use std::io::{self, Read as _, Seek, SeekFrom, Write as _};
use std::path::{Path, PathBuf};

use crate::config::BrandVoiceConfig;
use crate::error::CoreError;
use crate::session::{BrandSession, SessionSnapshot};

/// Directory name searched for by [`SessionStorage::discover`].
pub const HOME_DIR: &str = ".brandvoice";
pub const SESSION_FILE: &str = "session.json";

/// A brand voice home directory: `config.json` plus the persisted session.
///
/// Reads take a shared file lock, writes an exclusive one, so several
/// processes (CLI, MCP server) can work against the same home.
#[derive(Debug, Clone)]
pub struct SessionStorage {
    home: PathBuf,
}

impl SessionStorage {
    /// Use `home` as-is. Nothing is checked or created.
    pub fn open(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Find `.brandvoice/` in the current directory or one of its ancestors.
    pub fn discover() -> Result<Self, CoreError> {
        let cwd = std::env::current_dir()?;
        Self::discover_from(&cwd).ok_or(CoreError::NotInitialized)
    }

    pub fn discover_from(start: &Path) -> Option<Self> {
        start
            .ancestors()
            .map(|dir| dir.join(HOME_DIR))
            .find(|candidate| candidate.is_dir())
            .map(Self::open)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    fn session_path(&self) -> PathBuf {
        self.home.join(SESSION_FILE)
    }

    pub fn is_initialized(&self) -> bool {
        self.session_path().is_file()
    }

    /// Create the home, write the config and start a fresh session.
    /// An existing config is kept (and enabled); an existing session is replaced.
    pub fn init(&self) -> Result<BrandSession, CoreError> {
        fs::create_dir_all(&self.home)?;

        let config = match BrandVoiceConfig::load(&self.home) {
            Ok(existing) => BrandVoiceConfig {
                enabled: true,
                ..existing
            },
            Err(e) => {
                tracing::warn!(error = %e, "Replacing unreadable config with defaults");
                BrandVoiceConfig::default_init()
            }
        };
        config.save(&self.home)?;

        let session = BrandSession::new();
        self.save(&session)?;
        tracing::info!(home = %self.home.display(), session = %session.id().short(), "Initialized brand voice home");
        Ok(session)
    }

    pub fn config(&self) -> Result<BrandVoiceConfig, CoreError> {
        BrandVoiceConfig::load(&self.home)
    }

    /// Load the persisted session under a shared lock, recomputing its profile.
    pub fn load(&self) -> Result<BrandSession, CoreError> {
        let file = self.open_session_file(fs::OpenOptions::new().read(true))?;
        fs2::FileExt::lock_shared(&file).map_err(CoreError::Io)?;
        let mut data = String::new();
        let read = (&file).read_to_string(&mut data);
        fs2::FileExt::unlock(&file).map_err(CoreError::Io)?;
        read?;

        let snapshot: SessionSnapshot = serde_json::from_str(&data)?;
        Ok(BrandSession::from_snapshot(snapshot))
    }

    /// Overwrite the persisted session with an exclusive lock.
    pub fn save(&self, session: &BrandSession) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(&session.snapshot())?;
        let file = fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(self.session_path())?;
        fs2::FileExt::lock_exclusive(&file).map_err(CoreError::Io)?;
        let written = write_locked(&file, &json);
        fs2::FileExt::unlock(&file).map_err(CoreError::Io)?;
        written
    }

    /// Load, apply `f`, and write back, all under one exclusive lock.
    pub fn update<T>(&self, f: impl FnOnce(&BrandSession) -> T) -> Result<T, CoreError> {
        let file = self.open_session_file(fs::OpenOptions::new().read(true).write(true))?;
        fs2::FileExt::lock_exclusive(&file).map_err(CoreError::Io)?;
        let result = Self::update_locked(&file, f);
        fs2::FileExt::unlock(&file).map_err(CoreError::Io)?;
        result
    }

    fn update_locked<T>(
        file: &fs::File,
        f: impl FnOnce(&BrandSession) -> T,
    ) -> Result<T, CoreError> {
        // Re-read under lock to get latest state
        let mut data = String::new();
        (&*file).read_to_string(&mut data)?;
        let snapshot: SessionSnapshot = serde_json::from_str(&data)?;
        let session = BrandSession::from_snapshot(snapshot);

        let out = f(&session);

        let json = serde_json::to_string_pretty(&session.snapshot())?;
        write_locked(file, &json)?;
        Ok(out)
    }

    /// Clear the persisted session, keeping its id.
    pub fn reset(&self) -> Result<(), CoreError> {
        self.update(|session| session.reset())
    }

    fn open_session_file(&self, options: &fs::OpenOptions) -> Result<fs::File, CoreError> {
        options.open(self.session_path()).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                CoreError::NotInitialized
            } else {
                CoreError::Io(e)
            }
        })
    }
}

fn write_locked(file: &fs::File, json: &str) -> Result<(), CoreError> {
    file.set_len(0)?;
    let mut file = file;
    file.seek(SeekFrom::Start(0))?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldValue, Method, PartialParameterSet};
    use tempfile::TempDir;

    fn traits(values: &[&str]) -> PartialParameterSet {
        let mut set = PartialParameterSet::default();
        set.personality.primary_traits = FieldValue::list(values.iter().copied());
        set
    }

    #[test]
    fn test_uninitialized_home() {
        let tmp = TempDir::new().unwrap();
        let storage = SessionStorage::open(tmp.path().join(HOME_DIR));
        assert!(!storage.is_initialized());
        assert!(matches!(storage.load(), Err(CoreError::NotInitialized)));
        assert!(matches!(
            storage.update(|_| ()),
            Err(CoreError::NotInitialized)
        ));
    }

    #[test]
    fn test_init_then_load() {
        let tmp = TempDir::new().unwrap();
        let storage = SessionStorage::open(tmp.path().join(HOME_DIR));
        let session = storage.init().unwrap();

        assert!(storage.is_initialized());
        assert!(storage.config().unwrap().enabled);
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.id(), session.id());
        assert!(!loaded.any_used());
    }

    #[test]
    fn test_update_persists_and_recomputes() {
        let tmp = TempDir::new().unwrap();
        let storage = SessionStorage::open(tmp.path());
        storage.init().unwrap();

        let profile = storage
            .update(|s| s.commit(Method::WebScraper, traits(&["bold"])))
            .unwrap();
        assert_eq!(profile.personality.primary_traits, vec!["bold"]);

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.get_profile(), profile);
        assert!(loaded.get_method_status()[&Method::WebScraper].used);
    }

    #[test]
    fn test_shorter_write_leaves_valid_file() {
        let tmp = TempDir::new().unwrap();
        let storage = SessionStorage::open(tmp.path());
        storage.init().unwrap();
        storage
            .update(|s| s.commit(Method::DocumentUpload, traits(&["a", "b", "c", "d", "e"])))
            .unwrap();
        storage.reset().unwrap();

        let loaded = storage.load().unwrap();
        assert!(!loaded.any_used());
    }

    #[test]
    fn test_reinit_replaces_session_keeps_config() {
        let tmp = TempDir::new().unwrap();
        let storage = SessionStorage::open(tmp.path());
        let first = storage.init().unwrap();

        let mut config = storage.config().unwrap();
        config.max_document_bytes = 42;
        config.save(storage.home()).unwrap();
        storage
            .update(|s| s.commit(Method::BrandInterview, traits(&["calm"])))
            .unwrap();

        let second = storage.init().unwrap();
        assert_ne!(first.id(), second.id());
        assert!(!storage.load().unwrap().any_used());
        assert_eq!(storage.config().unwrap().max_document_bytes, 42);
    }

    #[test]
    fn test_corrupt_session_file() {
        let tmp = TempDir::new().unwrap();
        let storage = SessionStorage::open(tmp.path());
        storage.init().unwrap();
        fs::write(tmp.path().join(SESSION_FILE), "{").unwrap();
        assert!(matches!(storage.load(), Err(CoreError::InvalidSession(_))));
    }

    #[test]
    fn test_discover_from_nested_dir() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join(HOME_DIR);
        fs::create_dir_all(&home).unwrap();
        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let found = SessionStorage::discover_from(&nested).unwrap();
        assert_eq!(found.home(), home.as_path());
    }

    #[test]
    fn test_concurrent_updates_are_serialized() {
        let tmp = TempDir::new().unwrap();
        let storage = SessionStorage::open(tmp.path());
        storage.init().unwrap();

        let handles: Vec<_> = Method::ALL
            .iter()
            .map(|method| {
                let storage = storage.clone();
                let method = *method;
                std::thread::spawn(move || {
                    storage
                        .update(|s| s.commit(method, traits(&[method.as_str()])))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let status = storage.load().unwrap().get_method_status();
        assert!(status.values().all(|s| s.used));
    }
}
