//! OS color-scheme signal.
//!
//! The theme store reads the environment's "prefers dark" state once at
//! init and watches it for changes. [`SystemSignal`] abstracts that
//! environment so hosts and tests can substitute their own source:
//!
//! - [`OsSignal`]: snapshots the OS setting via `dark-light`. Snapshot
//!   only; the crate does not poll, so [`SystemSignal::watch`] reports
//!   [`SignalError::WatchUnsupported`].
//! - [`ManualSignal`]: a clonable handle whose [`ManualSignal::set`]
//!   feeds watchers. Hosts with native theme-change events (winit,
//!   browser `matchMedia`, etc.) forward them through this.
//! - [`StaticSignal`]: a fixed mode that never changes.
//!
//! A store given a signal whose `current` fails falls back to
//! [`ColorMode::Light`]; a failed `watch` leaves the snapshot in place
//! with no further updates. Neither failure is surfaced to callers.

use std::sync::{Arc, Mutex};

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::theme::ColorMode;

/// Callback invoked with the new mode on each color-scheme change.
pub type SignalCallback = Box<dyn Fn(ColorMode) + Send + Sync>;

/// Errors from a color-scheme signal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    /// The signal source cannot be read at all.
    #[error("color-scheme signal unavailable: {0}")]
    Unavailable(String),

    /// The signal can be read but not watched for changes.
    #[error("color-scheme change watching is not supported by this signal")]
    WatchUnsupported,
}

/// Source of the environment's color-scheme state.
pub trait SystemSignal: Send + Sync {
    /// Reads the current color-scheme state.
    fn current(&self) -> Result<ColorMode, SignalError>;

    /// Registers a callback fired on each subsequent change.
    ///
    /// Implementations that cannot deliver changes return
    /// [`SignalError::WatchUnsupported`]; the caller keeps its snapshot.
    fn watch(&self, callback: SignalCallback) -> Result<(), SignalError>;
}

type ModeDetector = fn() -> ColorMode;

static MODE_DETECTOR: Lazy<Mutex<ModeDetector>> = Lazy::new(|| Mutex::new(os_mode_detector));

/// Overrides the detector used by [`OsSignal`] to read the OS setting.
///
/// This is useful for testing or when you want to force a specific mode
/// process-wide.
pub fn set_mode_detector(detector: ModeDetector) {
    let mut guard = MODE_DETECTOR.lock().unwrap();
    *guard = detector;
}

pub(crate) fn detect_color_mode() -> ColorMode {
    let detector = MODE_DETECTOR.lock().unwrap();
    (*detector)()
}

fn os_mode_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        OsThemeMode::Light => ColorMode::Light,
    }
}

/// Snapshot of the OS color-scheme setting.
///
/// Reads through the process-wide detector (see [`set_mode_detector`]).
/// Watching is unsupported: the OS is re-read only when a new store is
/// built. Hosts that receive live theme-change events should bridge
/// them with a [`ManualSignal`] instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSignal;

impl OsSignal {
    /// Creates an OS snapshot signal.
    pub fn new() -> Self {
        Self
    }
}

impl SystemSignal for OsSignal {
    fn current(&self) -> Result<ColorMode, SignalError> {
        Ok(detect_color_mode())
    }

    fn watch(&self, _callback: SignalCallback) -> Result<(), SignalError> {
        Err(SignalError::WatchUnsupported)
    }
}

type SharedCallback = Arc<dyn Fn(ColorMode) + Send + Sync>;

#[derive(Default)]
struct ManualInner {
    mode: Mutex<Option<ColorMode>>,
    watchers: Mutex<Vec<SharedCallback>>,
}

/// A host-driven color-scheme signal.
///
/// Clone the handle, hand one clone to the store builder, and call
/// [`ManualSignal::set`] from the host's event loop whenever the
/// environment reports a change. Watchers fire only when the mode
/// actually changes, matching media-query `change` event semantics.
///
/// # Example
///
/// ```rust
/// use duotone::{ColorMode, ManualSignal, SystemSignal};
///
/// let signal = ManualSignal::new(ColorMode::Light);
/// assert_eq!(signal.current().unwrap(), ColorMode::Light);
///
/// signal.set(ColorMode::Dark);
/// assert_eq!(signal.current().unwrap(), ColorMode::Dark);
/// ```
#[derive(Clone)]
pub struct ManualSignal {
    inner: Arc<ManualInner>,
}

impl ManualSignal {
    /// Creates a signal reporting `initial`.
    pub fn new(initial: ColorMode) -> Self {
        let inner = ManualInner::default();
        *inner.mode.lock().unwrap() = Some(initial);
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Creates a signal with no readable state.
    ///
    /// `current` fails with [`SignalError::Unavailable`] until the first
    /// [`ManualSignal::set`]; stores built on it degrade to light.
    pub fn unavailable() -> Self {
        Self {
            inner: Arc::new(ManualInner::default()),
        }
    }

    /// Updates the reported mode, notifying watchers on change.
    pub fn set(&self, mode: ColorMode) {
        {
            let mut current = self.inner.mode.lock().unwrap();
            if *current == Some(mode) {
                return;
            }
            *current = Some(mode);
        }
        // Snapshot so a watcher may re-enter the signal.
        let watchers: Vec<SharedCallback> = {
            let list = self.inner.watchers.lock().unwrap();
            list.iter().map(Arc::clone).collect()
        };
        for watcher in watchers {
            watcher(mode);
        }
    }
}

impl SystemSignal for ManualSignal {
    fn current(&self) -> Result<ColorMode, SignalError> {
        self.inner
            .mode
            .lock()
            .unwrap()
            .ok_or_else(|| SignalError::Unavailable("no mode reported yet".to_string()))
    }

    fn watch(&self, callback: SignalCallback) -> Result<(), SignalError> {
        self.inner.watchers.lock().unwrap().push(Arc::from(callback));
        Ok(())
    }
}

/// A signal pinned to one mode.
///
/// `watch` succeeds but never fires: a fixed mode has no changes to
/// deliver. Useful for demos and for hosts without any color-scheme
/// source.
#[derive(Debug, Clone, Copy)]
pub struct StaticSignal(pub ColorMode);

impl SystemSignal for StaticSignal {
    fn current(&self) -> Result<ColorMode, SignalError> {
        Ok(self.0)
    }

    fn watch(&self, _callback: SignalCallback) -> Result<(), SignalError> {
        Ok(())
    }
}
