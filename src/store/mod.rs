//! Theme store: the single source of truth for the theme preference.
//!
//! This module provides:
//!
//! - [`ThemeOptions`]: Construction options with a fluent builder API
//! - [`ThemeStore`]: Preference state, resolution, persistence, and
//!   subscriber notification
//! - [`Subscription`]: Removal handle returned by the subscribe methods
//! - [`ThemeBinding`]: Component-local reactive view of the store
//!
//! # Design
//!
//! The store owns three observable values: the preference, the resolved
//! mode derived from it, and the mirror of the OS color-scheme signal.
//! All collaborators are injected at build time ([`Storage`],
//! [`SystemSignal`], [`RootAttachment`]) so tests substitute in-memory
//! fakes for real storage and OS hooks.
//!
//! [`ThemeStore::set_preference`] runs synchronously end to end:
//! mutate, persist, recompute, apply, notify. Persistence and signal
//! failures are logged and swallowed; the store always ends up on a
//! valid light/dark display mode.

mod binding;
mod subscribers;

pub use binding::ThemeBinding;
pub use subscribers::Subscription;

use std::sync::{Arc, Mutex, Weak};

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::attach::{NoopAttachment, RootAttachment};
use crate::persist::{MemoryStorage, Storage};
use crate::signal::{OsSignal, SignalError, SystemSignal};
use crate::theme::{ColorMode, InvalidPreferenceError, Preference};
use subscribers::SubscriberSet;

/// Options for building a [`ThemeStore`].
///
/// The same options drive the live store and the generated pre-paint
/// script (see [`crate::script`]), which keeps the two in agreement on
/// the storage key and root markers.
///
/// # Example
///
/// ```rust
/// use duotone::{Preference, ThemeOptions};
///
/// let options = ThemeOptions::new()
///     .with_storage_key("acme-theme")
///     .with_data_attribute("data-theme")
///     .with_default_preference(Preference::System);
/// ```
#[derive(Debug, Clone)]
pub struct ThemeOptions {
    pub(crate) storage_key: String,
    pub(crate) default_preference: Preference,
    pub(crate) update_class: bool,
    pub(crate) data_attribute: Option<String>,
    pub(crate) color_scheme: bool,
}

impl ThemeOptions {
    /// Creates the default options: key `"theme"`, default preference
    /// `system`, class updates on, no data attribute, `color-scheme` on.
    pub fn new() -> Self {
        Self {
            storage_key: "theme".to_string(),
            default_preference: Preference::System,
            update_class: true,
            data_attribute: None,
            color_scheme: true,
        }
    }

    /// Sets the persistence key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the preference used when nothing valid is persisted.
    pub fn with_default_preference(mut self, preference: Preference) -> Self {
        self.default_preference = preference;
        self
    }

    /// Enables or disables toggling a `light`/`dark` class on the root.
    pub fn with_update_class(mut self, update_class: bool) -> Self {
        self.update_class = update_class;
        self
    }

    /// Also mirrors the resolved mode into the named root attribute.
    pub fn with_data_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.data_attribute = Some(attribute.into());
        self
    }

    /// Enables or disables setting the root's CSS `color-scheme`.
    pub fn with_color_scheme(mut self, color_scheme: bool) -> Self {
        self.color_scheme = color_scheme;
        self
    }

    /// The persistence key.
    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// The preference used when nothing valid is persisted.
    pub fn default_preference(&self) -> Preference {
        self.default_preference
    }
}

impl Default for ThemeOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
struct StoreState {
    preference: Preference,
    system: ColorMode,
    resolved: ColorMode,
}

/// Builder wiring a [`ThemeStore`] to its collaborators.
///
/// Defaults: [`MemoryStorage`], [`OsSignal`], [`NoopAttachment`].
pub struct ThemeStoreBuilder {
    options: ThemeOptions,
    storage: Box<dyn Storage>,
    signal: Box<dyn SystemSignal>,
    attachment: Box<dyn RootAttachment>,
}

impl ThemeStoreBuilder {
    fn new() -> Self {
        Self {
            options: ThemeOptions::new(),
            storage: Box::new(MemoryStorage::new()),
            signal: Box::new(OsSignal::new()),
            attachment: Box::new(NoopAttachment),
        }
    }

    /// Replaces the default options.
    pub fn options(mut self, options: ThemeOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the persistence backend.
    pub fn storage(mut self, storage: impl Storage + 'static) -> Self {
        self.storage = Box::new(storage);
        self
    }

    /// Replaces the color-scheme signal.
    pub fn signal(mut self, signal: impl SystemSignal + 'static) -> Self {
        self.signal = Box::new(signal);
        self
    }

    /// Replaces the UI attachment point.
    pub fn attachment(mut self, attachment: impl RootAttachment + 'static) -> Self {
        self.attachment = Box::new(attachment);
        self
    }

    /// Builds and initializes the store.
    ///
    /// Reads the persisted preference (absent or invalid values fall
    /// back to the default), snapshots the color-scheme signal (failure
    /// falls back to light), applies the initial resolved mode to the
    /// attachment, and registers the change watcher. Never fails: every
    /// degraded path still yields a store resolving to light or dark.
    pub fn build(self) -> Arc<ThemeStore> {
        let Self {
            options,
            storage,
            signal,
            attachment,
        } = self;

        let persisted = match storage.load(&options.storage_key) {
            Ok(Some(raw)) => match raw.parse::<Preference>() {
                Ok(preference) => Some(preference),
                Err(err) => {
                    warn!(value = %err.value, "ignoring invalid persisted theme preference");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "theme storage unreadable, using default preference");
                None
            }
        };
        let preference = persisted.unwrap_or(options.default_preference);

        let system = match signal.current() {
            Ok(mode) => mode,
            Err(err) => {
                warn!(error = %err, "color-scheme signal unavailable, assuming light");
                ColorMode::Light
            }
        };
        let resolved = preference.resolve(system);

        let store = Arc::new(ThemeStore {
            options,
            state: Mutex::new(StoreState {
                preference,
                system,
                resolved,
            }),
            subscribers: SubscriberSet::new(),
            storage,
            attachment,
        });

        store.attachment.apply(resolved);
        debug!(%preference, %system, %resolved, "theme store initialized");

        let weak: Weak<ThemeStore> = Arc::downgrade(&store);
        let watch_result = signal.watch(Box::new(move |mode| {
            if let Some(store) = weak.upgrade() {
                store.system_changed(mode);
            }
        }));
        match watch_result {
            Ok(()) => {}
            Err(SignalError::WatchUnsupported) => {
                debug!("color-scheme signal is snapshot-only, keeping initial reading");
            }
            Err(err) => {
                warn!(error = %err, "color-scheme watch failed, keeping initial reading");
            }
        }

        store
    }
}

/// Process-wide holder for theme preference, resolution, and persistence.
///
/// Build one with [`ThemeStore::builder`]; share it as an `Arc`. For
/// app-wide access, register it with [`init_global`].
///
/// # Example
///
/// ```rust
/// use duotone::{ColorMode, ManualSignal, Preference, ThemeStore};
///
/// let signal = ManualSignal::new(ColorMode::Dark);
/// let store = ThemeStore::builder().signal(signal.clone()).build();
///
/// // No persisted value: defaults to system, resolves to the OS mode.
/// assert_eq!(store.preference(), Preference::System);
/// assert_eq!(store.resolved(), ColorMode::Dark);
///
/// store.set_preference(Preference::Light);
/// assert_eq!(store.resolved(), ColorMode::Light);
/// ```
pub struct ThemeStore {
    options: ThemeOptions,
    state: Mutex<StoreState>,
    subscribers: Arc<SubscriberSet>,
    storage: Box<dyn Storage>,
    attachment: Box<dyn RootAttachment>,
}

impl ThemeStore {
    /// Starts building a store.
    pub fn builder() -> ThemeStoreBuilder {
        ThemeStoreBuilder::new()
    }

    /// The options the store was built with.
    pub fn options(&self) -> &ThemeOptions {
        &self.options
    }

    /// Current preference. No side effects.
    pub fn preference(&self) -> Preference {
        self.state.lock().unwrap().preference
    }

    /// Current resolved mode. Always light or dark.
    pub fn resolved(&self) -> ColorMode {
        self.state.lock().unwrap().resolved
    }

    /// Current mirror of the OS color-scheme signal.
    pub fn system(&self) -> ColorMode {
        self.state.lock().unwrap().system
    }

    /// Sets the preference.
    ///
    /// Updates state, persists the wire form (failures are logged and
    /// swallowed), recomputes the resolved mode, applies it to the
    /// attachment and notifies resolved subscribers only when it
    /// changed, then notifies preference subscribers unconditionally so
    /// idempotent callers still observe the set.
    pub fn set_preference(&self, preference: Preference) {
        let resolved_change = {
            let mut state = self.state.lock().unwrap();
            let before = state.resolved;
            state.preference = preference;
            state.resolved = preference.resolve(state.system);
            (state.resolved != before).then_some(state.resolved)
        };

        if let Err(err) = self
            .storage
            .store(&self.options.storage_key, preference.as_str())
        {
            warn!(error = %err, "failed to persist theme preference");
        }

        if let Some(resolved) = resolved_change {
            debug!(%preference, %resolved, "resolved theme changed");
            self.attachment.apply(resolved);
            self.subscribers.notify_resolved(resolved);
        }
        self.subscribers.notify_preference(preference);
    }

    /// Sets the preference from an untrusted string.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPreferenceError`] for anything outside `light`,
    /// `dark`, `system`; prior state is left untouched.
    pub fn set_preference_str(&self, raw: &str) -> Result<(), InvalidPreferenceError> {
        let preference = raw.parse::<Preference>()?;
        self.set_preference(preference);
        Ok(())
    }

    /// Subscribes to preference changes. Fires on every set.
    pub fn on_preference_change(
        &self,
        callback: impl Fn(Preference) + Send + Sync + 'static,
    ) -> Subscription {
        SubscriberSet::add_preference(&self.subscribers, Arc::new(callback))
    }

    /// Subscribes to resolved-mode changes. Fires only on change.
    pub fn on_resolved_change(
        &self,
        callback: impl Fn(ColorMode) + Send + Sync + 'static,
    ) -> Subscription {
        SubscriberSet::add_resolved(&self.subscribers, Arc::new(callback))
    }

    /// Subscribes to OS color-scheme changes. Fires only on change.
    pub fn on_system_change(
        &self,
        callback: impl Fn(ColorMode) + Send + Sync + 'static,
    ) -> Subscription {
        SubscriberSet::add_system(&self.subscribers, Arc::new(callback))
    }

    /// Handles a color-scheme change delivered by the signal watcher.
    ///
    /// An unchanged mode is a no-op. Otherwise the mirror updates and
    /// system subscribers fire; the resolved mode follows only while the
    /// preference is `system`.
    pub(crate) fn system_changed(&self, mode: ColorMode) {
        let resolved_change = {
            let mut state = self.state.lock().unwrap();
            if state.system == mode {
                return;
            }
            state.system = mode;
            let before = state.resolved;
            state.resolved = state.preference.resolve(mode);
            (state.resolved != before).then_some(state.resolved)
        };

        debug!(system = %mode, "system color scheme changed");
        self.subscribers.notify_system(mode);
        if let Some(resolved) = resolved_change {
            self.attachment.apply(resolved);
            self.subscribers.notify_resolved(resolved);
        }
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        f.debug_struct("ThemeStore")
            .field("preference", &state.preference)
            .field("system", &state.system)
            .field("resolved", &state.resolved)
            .finish_non_exhaustive()
    }
}

static GLOBAL_STORE: OnceCell<Arc<ThemeStore>> = OnceCell::new();

/// Registers the process-wide store. The first call wins; later calls
/// log and return the already-registered store unchanged.
pub fn init_global(store: Arc<ThemeStore>) -> &'static Arc<ThemeStore> {
    if GLOBAL_STORE.get().is_some() {
        debug!("global theme store already initialized, keeping existing");
    }
    GLOBAL_STORE.get_or_init(|| store)
}

/// The process-wide store, if [`init_global`] has run.
pub fn global() -> Option<&'static Arc<ThemeStore>> {
    GLOBAL_STORE.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attach::FnAttachment;
    use crate::signal::ManualSignal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recording_attachment() -> (Arc<Mutex<Vec<ColorMode>>>, FnAttachment) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let attachment = FnAttachment::new(move |mode| sink.lock().unwrap().push(mode));
        (seen, attachment)
    }

    #[test]
    fn test_build_applies_initial_mode_once() {
        let (seen, attachment) = recording_attachment();
        let _store = ThemeStore::builder()
            .signal(ManualSignal::new(ColorMode::Dark))
            .attachment(attachment)
            .build();

        assert_eq!(*seen.lock().unwrap(), vec![ColorMode::Dark]);
    }

    #[test]
    fn test_set_preference_persists_wire_form() {
        let storage = Arc::new(MemoryStorage::new());

        struct Shared(Arc<MemoryStorage>);
        impl Storage for Shared {
            fn load(&self, key: &str) -> Result<Option<String>, crate::StorageError> {
                self.0.load(key)
            }
            fn store(&self, key: &str, value: &str) -> Result<(), crate::StorageError> {
                self.0.store(key, value)
            }
        }

        let store = ThemeStore::builder()
            .storage(Shared(Arc::clone(&storage)))
            .signal(ManualSignal::new(ColorMode::Light))
            .build();

        store.set_preference(Preference::Dark);
        assert_eq!(storage.load("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_invalid_persisted_value_falls_back_to_default() {
        let storage = MemoryStorage::new();
        storage.store("theme", "blue").unwrap();

        let store = ThemeStore::builder()
            .storage(storage)
            .signal(ManualSignal::new(ColorMode::Dark))
            .build();

        assert_eq!(store.preference(), Preference::System);
        assert_eq!(store.resolved(), ColorMode::Dark);
    }

    #[test]
    fn test_signal_unavailable_degrades_to_light() {
        let store = ThemeStore::builder()
            .signal(ManualSignal::unavailable())
            .build();

        assert_eq!(store.system(), ColorMode::Light);
        assert_eq!(store.resolved(), ColorMode::Light);
    }

    #[test]
    fn test_set_preference_str_rejects_unknown_and_keeps_state() {
        let store = ThemeStore::builder()
            .signal(ManualSignal::new(ColorMode::Light))
            .build();
        store.set_preference(Preference::Dark);

        let err = store.set_preference_str("blue").unwrap_err();
        assert_eq!(err.value, "blue");
        assert_eq!(store.preference(), Preference::Dark);
        assert_eq!(store.resolved(), ColorMode::Dark);
    }

    #[test]
    fn test_idempotent_set_notifies_preference_but_not_resolved() {
        let (seen, attachment) = recording_attachment();
        let store = ThemeStore::builder()
            .signal(ManualSignal::new(ColorMode::Light))
            .attachment(attachment)
            .build();

        let pref_count = Arc::new(AtomicUsize::new(0));
        let resolved_count = Arc::new(AtomicUsize::new(0));
        let p = Arc::clone(&pref_count);
        let r = Arc::clone(&resolved_count);
        let _pref_sub = store.on_preference_change(move |_| {
            p.fetch_add(1, Ordering::SeqCst);
        });
        let _resolved_sub = store.on_resolved_change(move |_| {
            r.fetch_add(1, Ordering::SeqCst);
        });

        store.set_preference(Preference::Dark);
        store.set_preference(Preference::Dark);

        assert_eq!(pref_count.load(Ordering::SeqCst), 2);
        assert_eq!(resolved_count.load(Ordering::SeqCst), 1);
        // Initial apply plus exactly one change.
        assert_eq!(*seen.lock().unwrap(), vec![ColorMode::Light, ColorMode::Dark]);
    }

    #[test]
    fn test_system_flip_updates_resolved_only_under_system_preference() {
        let signal = ManualSignal::new(ColorMode::Light);
        let store = ThemeStore::builder().signal(signal.clone()).build();

        let resolved_count = Arc::new(AtomicUsize::new(0));
        let r = Arc::clone(&resolved_count);
        let _sub = store.on_resolved_change(move |_| {
            r.fetch_add(1, Ordering::SeqCst);
        });

        signal.set(ColorMode::Dark);
        assert_eq!(store.resolved(), ColorMode::Dark);
        assert_eq!(resolved_count.load(Ordering::SeqCst), 1);

        store.set_preference(Preference::Light);
        resolved_count.store(0, Ordering::SeqCst);

        signal.set(ColorMode::Light);
        assert_eq!(store.system(), ColorMode::Light);
        assert_eq!(store.resolved(), ColorMode::Light);
        assert_eq!(resolved_count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscriber_may_reenter_store() {
        let store = ThemeStore::builder()
            .signal(ManualSignal::new(ColorMode::Light))
            .build();

        let reentered = Arc::new(AtomicUsize::new(0));
        let flag = Arc::clone(&reentered);
        let inner = Arc::clone(&store);
        let _sub = store.on_resolved_change(move |mode| {
            if flag.fetch_add(1, Ordering::SeqCst) == 0 && mode == ColorMode::Dark {
                inner.set_preference(Preference::Light);
            }
        });

        store.set_preference(Preference::Dark);
        assert_eq!(store.preference(), Preference::Light);
        assert_eq!(store.resolved(), ColorMode::Light);
    }
}
