//! Named cache of [`CipherEngine`] instances.
//!
//! Names are case-insensitive and unique. Lookups share a read lock, so any
//! number of threads can fetch engines at once; `add`, `remove` and `dispose`
//! take the write lock and are atomic with respect to each other and to `get`.
//!
//! Applications normally own one [`EngineRegistry`] at their composition root
//! and pass it around. A process-wide instance is available through
//! [`EngineRegistry::initialize`] for code that cannot be handed one.

use std::sync::{Arc, OnceLock};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use parking_lot::RwLock;

use crate::engine::{CipherEngine, EngineOptions};
use crate::error::{CipherError, Result};
use crate::logging::{LogLevels, log_event};
use crate::types::CipherMode;

static GLOBAL: OnceLock<EngineRegistry> = OnceLock::new();

struct Registered {
    /// Name as first spelled by the caller.
    name: String,
    engine: Arc<CipherEngine>,
}

pub struct EngineRegistry {
    entries: RwLock<HashMap<String, Registered>>,
    log_levels: LogLevels,
}

impl EngineRegistry {
    #[must_use]
    pub fn new(log_levels: LogLevels) -> Self {
        Self { entries: RwLock::new(HashMap::new()), log_levels }
    }

    /// Initializes the process-wide registry and returns it.
    ///
    /// The first call wins; later calls, including concurrent ones, return the
    /// same instance and ignore their `log_levels`.
    pub fn initialize(log_levels: LogLevels) -> &'static Self {
        GLOBAL.get_or_init(|| {
            log_event!(log_levels, INFORMATION, "engine registry initialized");
            Self::new(log_levels)
        })
    }

    /// The process-wide registry, if [`EngineRegistry::initialize`] has run.
    #[must_use]
    pub fn global() -> Option<&'static Self> {
        GLOBAL.get()
    }

    /// Creates an engine with default options in `mode` and registers it as `name`.
    ///
    /// # Errors
    ///
    /// * [`CipherError::InvalidArgument`] if `name` or `key` is empty.
    /// * [`CipherError::DuplicateName`] if `name` is taken, ignoring case.
    pub fn add(&self, name: &str, key: &str, iv: Option<&str>, mode: CipherMode) -> Result<bool> {
        let options = EngineOptions::default().with_mode(mode).with_log_levels(self.log_levels);
        self.add_with_options(name, key, iv, options)
    }

    /// Same as [`EngineRegistry::add`] with explicit engine options.
    pub fn add_with_options(&self, name: &str, key: &str, iv: Option<&str>, options: EngineOptions) -> Result<bool> {
        Self::require_name(name)?;
        let engine = CipherEngine::with_options(key, iv, options)?;
        self.insert(name, engine)
    }

    /// Registers an already constructed engine.
    ///
    /// # Errors
    ///
    /// * [`CipherError::InvalidArgument`] if `name` is empty.
    /// * [`CipherError::DuplicateName`] if `name` is taken, ignoring case.
    pub fn insert(&self, name: &str, engine: CipherEngine) -> Result<bool> {
        Self::require_name(name)?;

        let mut entries = self.entries.write();
        match entries.entry(fold(name)) {
            Entry::Occupied(existing) => {
                log_event!(self.log_levels, WARNING, name, existing = %existing.get().name, "duplicate engine name");
                Err(CipherError::DuplicateName { name: name.to_owned() })
            }
            Entry::Vacant(slot) => {
                let mode = engine.mode();
                slot.insert(Registered { name: name.to_owned(), engine: Arc::new(engine) });
                log_event!(self.log_levels, DEBUG, name, mode = %mode, count = entries.len(), "engine registered");
                Ok(true)
            }
        }
    }

    /// Looks up an engine, ignoring case.
    ///
    /// The engine stays owned by the registry; callers get a shared handle.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<CipherEngine>> {
        self.entries.read().get(&fold(name)).map(|entry| Arc::clone(&entry.engine))
    }

    /// Like [`EngineRegistry::get`], failing with [`CipherError::NotFound`].
    pub fn require(&self, name: &str) -> Result<Arc<CipherEngine>> {
        self.get(name).ok_or_else(|| CipherError::NotFound { name: name.to_owned() })
    }

    /// Removes and disposes an engine, ignoring case.
    ///
    /// Removing a name that is not registered succeeds. The name is free for
    /// reuse as soon as this returns.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self.entries.write().remove(&fold(name));
        if let Some(entry) = removed {
            log_event!(self.log_levels, DEBUG, name = %entry.name, "engine removed");
        }
        true
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(&fold(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of the registered names and engines.
    #[must_use]
    pub fn items(&self) -> Vec<(String, Arc<CipherEngine>)> {
        self.entries.read().values().map(|entry| (entry.name.clone(), Arc::clone(&entry.engine))).collect()
    }

    /// Drops every registered engine and clears the map. Safe to call repeatedly.
    pub fn dispose(&self) {
        let drained: Vec<Registered> = self.entries.write().drain().map(|(_, entry)| entry).collect();
        if !drained.is_empty() {
            log_event!(self.log_levels, INFORMATION, count = drained.len(), "engine registry disposed");
        }
    }

    fn require_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(CipherError::invalid("name", "cannot be empty or whitespace"));
        }
        Ok(())
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new(LogLevels::default())
    }
}

impl Drop for EngineRegistry {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self.entries.read();
        let names: Vec<&str> = entries.values().map(|entry| entry.name.as_str()).collect();
        f.debug_struct("EngineRegistry").field("names", &names).finish()
    }
}

fn fold(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    const KEY: &str = "$#%&(kjh565&*IKJ$#%&(kjh565&*IKJ";
    const IV: &str = "1234567887654321";

    #[test]
    fn test_add_and_get_case_insensitive() {
        let registry = EngineRegistry::default();
        assert!(registry.add("Payments", KEY, Some(IV), CipherMode::Cbc).unwrap());

        let engine = registry.get("PAYMENTS").expect("registered");
        assert_eq!(engine.encrypt_string("ShortText").unwrap(), "fz1sHNfZi2HaotBkQYthUQ==");
        assert!(registry.contains("payments"));
        assert!(registry.get("other").is_none());
    }

    #[test]
    fn test_duplicate_name_any_case() {
        let registry = EngineRegistry::default();
        registry.add("X", KEY, Some(IV), CipherMode::Cbc).unwrap();

        let err = registry.add("x", KEY, None, CipherMode::Ecb).unwrap_err();
        assert!(matches!(err, CipherError::DuplicateName { ref name } if name == "x"));
        assert!(err.is_conflict());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("X").unwrap().mode(), CipherMode::Cbc);
    }

    #[test]
    fn test_remove_then_add_again() {
        let registry = EngineRegistry::default();
        registry.add("X", KEY, Some(IV), CipherMode::Cbc).unwrap();

        assert!(registry.remove("x"));
        assert!(registry.get("X").is_none());
        assert!(registry.add("X", KEY, Some(IV), CipherMode::Cfb).unwrap());
        assert_eq!(registry.get("x").unwrap().mode(), CipherMode::Cfb);
    }

    #[test]
    fn test_remove_missing_is_success() {
        let registry = EngineRegistry::default();
        assert!(registry.remove("never-added"));
    }

    #[test]
    fn test_require_not_found() {
        let registry = EngineRegistry::default();
        let err = registry.require("missing").unwrap_err();
        assert!(matches!(err, CipherError::NotFound { .. }));
    }

    #[test]
    fn test_add_rejects_invalid_input() {
        let registry = EngineRegistry::default();
        assert!(registry.add("", KEY, Some(IV), CipherMode::Cbc).unwrap_err().is_misuse());
        assert!(registry.add("empty-key", "", Some(IV), CipherMode::Cbc).unwrap_err().is_misuse());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_items_keep_original_spelling() {
        let registry = EngineRegistry::default();
        registry.add("Alpha", KEY, Some(IV), CipherMode::Cbc).unwrap();
        registry.add("beta", KEY, Some(IV), CipherMode::Ecb).unwrap();

        let mut names: Vec<String> = registry.items().into_iter().map(|(name, _)| name).collect();
        names.sort();
        assert_eq!(names, vec!["Alpha".to_owned(), "beta".to_owned()]);
    }

    #[test]
    fn test_removed_engine_handle_stays_usable() {
        let registry = EngineRegistry::default();
        registry.add("X", KEY, Some(IV), CipherMode::Cbc).unwrap();
        let engine = registry.get("X").unwrap();

        registry.remove("X");
        assert_eq!(engine.decrypt_string("fz1sHNfZi2HaotBkQYthUQ==").unwrap(), "ShortText");
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let registry = EngineRegistry::default();
        registry.add("one", KEY, Some(IV), CipherMode::Cbc).unwrap();
        registry.add("two", KEY, Some(IV), CipherMode::Cbc).unwrap();

        registry.dispose();
        assert!(registry.is_empty());
        registry.dispose();
        assert!(registry.is_empty());

        assert!(registry.add("one", KEY, Some(IV), CipherMode::Cbc).unwrap());
    }

    #[test]
    fn test_concurrent_add_same_name_single_winner() {
        let registry = EngineRegistry::default();

        let successes = thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|i| {
                    let registry = &registry;
                    let name = if i % 2 == 0 { "Shared" } else { "SHARED" };
                    scope.spawn(move || registry.add(name, KEY, Some(IV), CipherMode::Cbc).is_ok())
                })
                .collect();
            handles.into_iter().map(|handle| handle.join().unwrap()).filter(|ok| *ok).count()
        });

        assert_eq!(successes, 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_concurrent_readers_and_writers() {
        let registry = EngineRegistry::default();
        registry.add("stable", KEY, Some(IV), CipherMode::Cbc).unwrap();

        thread::scope(|scope| {
            for i in 0..4 {
                let registry = &registry;
                scope.spawn(move || {
                    let name = format!("worker-{i}");
                    for _ in 0..50 {
                        registry.add(&name, KEY, Some(IV), CipherMode::Cbc).unwrap();
                        assert!(registry.remove(&name));
                    }
                });
            }
            for _ in 0..4 {
                let registry = &registry;
                scope.spawn(move || {
                    for _ in 0..50 {
                        let engine = registry.get("Stable").unwrap();
                        assert_eq!(engine.encrypt_string("ShortText").unwrap(), "fz1sHNfZi2HaotBkQYthUQ==");
                    }
                });
            }
        });

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_global_first_initialize_wins() {
        let first = EngineRegistry::initialize(LogLevels::DEBUG);
        let second = EngineRegistry::initialize(LogLevels::TRACE);
        assert!(std::ptr::eq(first, second));
        assert!(std::ptr::eq(EngineRegistry::global().unwrap(), first));

        first.add("global-test-engine", KEY, Some(IV), CipherMode::Cbc).unwrap();
        assert!(second.contains("GLOBAL-TEST-ENGINE"));
        assert!(first.remove("global-test-engine"));
    }
}
