//! Light/dark/system theme resolution with persistence and flash-free
//! startup.
//!
//! duotone keeps a three-state theme preference (`light`, `dark`,
//! `system`), resolves it against the OS color-scheme signal, persists
//! it, and notifies subscribers when either the preference or the
//! resolved mode changes. A generated pre-paint script applies the same
//! resolution before any stylesheet loads, so a page never flashes the
//! wrong theme.
//!
//! # Quick Start
//!
//! ```rust
//! use duotone::{ColorMode, ManualSignal, Preference, ThemeStore};
//!
//! // The signal is the host's bridge to the environment; tests and
//! // native apps drive it by hand, `OsSignal` snapshots the OS.
//! let signal = ManualSignal::new(ColorMode::Dark);
//! let store = ThemeStore::builder().signal(signal.clone()).build();
//!
//! assert_eq!(store.preference(), Preference::System);
//! assert_eq!(store.resolved(), ColorMode::Dark);
//!
//! let sub = store.on_resolved_change(|mode| {
//!     println!("now rendering {mode}");
//! });
//!
//! store.set_preference(Preference::Light);
//! assert_eq!(store.resolved(), ColorMode::Light);
//! drop(sub);
//! ```
//!
//! # Pieces
//!
//! - [`ThemeStore`]: preference state, resolution, persistence,
//!   subscriber notification ([`store`])
//! - [`ThemeBinding`]: component-local reactive view with automatic
//!   unsubscribe ([`store`])
//! - [`theme_script`] / [`forced_theme_script`]: self-contained
//!   pre-paint snippets ([`script`])
//! - [`Storage`], [`SystemSignal`], [`RootAttachment`]: injectable
//!   collaborator seams ([`persist`], [`signal`], [`attach`])
//! - [`Typography`] / [`TypographyAdjustments`]: the class-applying
//!   wrapper element and its reader-tunable settings ([`typography`])
//!
//! # Degraded Modes
//!
//! The store never surfaces an internal failure: unreadable storage
//! means "nothing persisted", unwritable storage means in-memory only,
//! and a missing color-scheme signal pins the system mirror to light.
//! Every path still lands on a valid light/dark display mode. The only
//! error callers handle is [`InvalidPreferenceError`] when parsing an
//! untrusted preference string.

pub mod attach;
pub mod persist;
pub mod script;
pub mod signal;
pub mod store;
pub mod theme;
pub mod typography;

pub use attach::{FnAttachment, NoopAttachment, RootAttachment};
pub use persist::{FileStorage, MemoryStorage, Storage, StorageError};
pub use script::{forced_theme_script, theme_script, ScriptError};
pub use signal::{
    set_mode_detector, ManualSignal, OsSignal, SignalCallback, SignalError, StaticSignal,
    SystemSignal,
};
pub use store::{
    global, init_global, Subscription, ThemeBinding, ThemeOptions, ThemeStore, ThemeStoreBuilder,
};
pub use theme::{ColorMode, InvalidPreferenceError, Preference};
pub use typography::{Typography, TypographyAdjustments, BASE_CLASS};
