//! Component-local view of the theme store.
//!
//! A [`ThemeBinding`] mirrors the store's preference and resolved mode
//! into values a UI component can read synchronously, and keeps them
//! fresh through one subscription per observable. Dropping the binding
//! removes both subscriptions, so a torn-down component never leaks a
//! callback into the store.

use std::sync::{Arc, Mutex};

use super::{Subscription, ThemeStore};
use crate::theme::{ColorMode, Preference};

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    preference: Preference,
    resolved: ColorMode,
}

/// A live, component-local pair of (preference, resolved mode).
///
/// The initial values are read synchronously on attach, so a component
/// renders the correct theme on its first frame. The optional change
/// hook is the host's re-render trigger; it fires after the local
/// mirror has been updated, so reading the binding from inside the hook
/// always observes the fresh value.
///
/// # Example
///
/// ```rust
/// use duotone::{ColorMode, ManualSignal, Preference, ThemeBinding, ThemeStore};
///
/// let store = ThemeStore::builder()
///     .signal(ManualSignal::new(ColorMode::Light))
///     .build();
///
/// let binding = ThemeBinding::attach(&store);
/// assert_eq!(binding.preference(), Preference::System);
/// assert_eq!(binding.resolved(), ColorMode::Light);
///
/// binding.set_theme(Preference::Dark);
/// assert_eq!(binding.resolved(), ColorMode::Dark);
/// ```
pub struct ThemeBinding {
    store: Arc<ThemeStore>,
    current: Arc<Mutex<Snapshot>>,
    _preference_sub: Subscription,
    _resolved_sub: Subscription,
}

impl ThemeBinding {
    /// Attaches to `store` without a change hook.
    pub fn attach(store: &Arc<ThemeStore>) -> Self {
        Self::attach_with(store, || {})
    }

    /// Attaches to `store`, invoking `on_change` after each update to
    /// the local mirror.
    ///
    /// A single `set_theme` that flips the resolved mode fires the hook
    /// twice (once per observable); hosts coalescing re-renders should
    /// treat the hook as a dirty flag rather than a frame request.
    pub fn attach_with(
        store: &Arc<ThemeStore>,
        on_change: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        let current = Arc::new(Mutex::new(Snapshot {
            preference: store.preference(),
            resolved: store.resolved(),
        }));
        let on_change = Arc::new(on_change);

        let mirror = Arc::clone(&current);
        let notify = Arc::clone(&on_change);
        let _preference_sub = store.on_preference_change(move |preference| {
            mirror.lock().unwrap().preference = preference;
            notify();
        });

        let mirror = Arc::clone(&current);
        let notify = Arc::clone(&on_change);
        let _resolved_sub = store.on_resolved_change(move |resolved| {
            mirror.lock().unwrap().resolved = resolved;
            notify();
        });

        Self {
            store: Arc::clone(store),
            current,
            _preference_sub,
            _resolved_sub,
        }
    }

    /// The mirrored preference.
    pub fn preference(&self) -> Preference {
        self.current.lock().unwrap().preference
    }

    /// The mirrored resolved mode.
    pub fn resolved(&self) -> ColorMode {
        self.current.lock().unwrap().resolved
    }

    /// Pass-through to [`ThemeStore::set_preference`].
    pub fn set_theme(&self, preference: Preference) {
        self.store.set_preference(preference);
    }
}

impl std::fmt::Debug for ThemeBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let snapshot = *self.current.lock().unwrap();
        f.debug_struct("ThemeBinding")
            .field("preference", &snapshot.preference)
            .field("resolved", &snapshot.resolved)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::ManualSignal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn store_with(system: ColorMode) -> Arc<ThemeStore> {
        ThemeStore::builder()
            .signal(ManualSignal::new(system))
            .build()
    }

    #[test]
    fn test_attach_reads_current_values_synchronously() {
        let store = store_with(ColorMode::Dark);
        store.set_preference(Preference::Light);

        let binding = ThemeBinding::attach(&store);
        assert_eq!(binding.preference(), Preference::Light);
        assert_eq!(binding.resolved(), ColorMode::Light);
    }

    #[test]
    fn test_mirror_tracks_store_mutations() {
        let store = store_with(ColorMode::Light);
        let binding = ThemeBinding::attach(&store);

        store.set_preference(Preference::Dark);
        assert_eq!(binding.preference(), Preference::Dark);
        assert_eq!(binding.resolved(), ColorMode::Dark);
    }

    #[test]
    fn test_change_hook_observes_fresh_values() {
        let store = store_with(ColorMode::Light);
        let fired = Arc::new(AtomicUsize::new(0));

        let count = Arc::clone(&fired);
        let binding = Arc::new(Mutex::new(None::<ThemeBinding>));
        let reader = Arc::clone(&binding);
        *binding.lock().unwrap() = Some(ThemeBinding::attach_with(&store, move || {
            count.fetch_add(1, Ordering::SeqCst);
            if let Some(b) = reader.try_lock().ok().and_then(|g| {
                g.as_ref().map(|b| b.resolved())
            }) {
                assert_eq!(b, ColorMode::Dark);
            }
        }));

        store.set_preference(Preference::Dark);
        // Resolved flip plus the unconditional preference notification.
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_detach_removes_both_listeners() {
        let store = store_with(ColorMode::Light);
        let fired = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&fired);
        let binding = ThemeBinding::attach_with(&store, move || {
            count.fetch_add(1, Ordering::SeqCst);
        });
        drop(binding);

        store.set_preference(Preference::Dark);
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_set_theme_passes_through() {
        let store = store_with(ColorMode::Light);
        let binding = ThemeBinding::attach(&store);

        binding.set_theme(Preference::Dark);
        assert_eq!(store.preference(), Preference::Dark);
        assert_eq!(binding.resolved(), ColorMode::Dark);
    }
}
