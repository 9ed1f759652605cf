//! Persistence collaborators.
//!
//! The store treats storage as an opaque key-value service: load a whole
//! profile by owner key, save a whole profile back. Retry policy, if any,
//! belongs to the implementation behind this trait.

use crate::error::RepositoryError;
use bento_core::UserProfile;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Load and save whole profiles by owner key.
pub trait ProfileRepository {
    /// Fetch the profile stored for `owner`.
    fn load_profile(&self, owner: &str) -> Result<UserProfile, RepositoryError>;

    /// Replace the stored profile for `profile.id`.
    fn save_profile(&self, profile: &UserProfile) -> Result<(), RepositoryError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    profiles: HashMap<String, UserProfile>,
    fail_saves: bool,
    saves: usize,
}

/// Process-local repository. Clones share the same storage, so a test can
/// keep a handle to inspect what the store persisted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    /// Empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-seeded with one profile.
    #[must_use]
    pub fn with_profile(profile: UserProfile) -> Self {
        let repo = Self::new();
        repo.lock().profiles.insert(profile.id.clone(), profile);
        repo
    }

    /// Make every subsequent save fail (or succeed again).
    pub fn fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.lock().saves
    }

    /// Currently stored profile for `owner`.
    #[must_use]
    pub fn stored(&self, owner: &str) -> Option<UserProfile> {
        self.lock().profiles.get(owner).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProfileRepository for InMemoryRepository {
    fn load_profile(&self, owner: &str) -> Result<UserProfile, RepositoryError> {
        self.lock()
            .profiles
            .get(owner)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(owner.to_string()))
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(RepositoryError::Unavailable("saves are disabled".to_string()));
        }
        state.profiles.insert(profile.id.clone(), profile.clone());
        state.saves += 1;
        Ok(())
    }
}

/// One pretty-printed `bentoProfile-{owner}.json` document per owner.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    /// Repository rooted at `dir`; the directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `owner`'s profile.
    #[must_use]
    pub fn path_for(&self, owner: &str) -> PathBuf {
        let key: String = owner
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("bentoProfile-{key}.json"))
    }
}

impl ProfileRepository for JsonFileRepository {
    fn load_profile(&self, owner: &str) -> Result<UserProfile, RepositoryError> {
        let path = self.path_for(owner);
        if !path.exists() {
            return Err(RepositoryError::NotFound(owner.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn save_profile(&self, profile: &UserProfile) -> Result<(), RepositoryError> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(profile)?;
        fs::write(self.path_for(&profile.id), json)?;
        Ok(())
    }
}
