//! UI attachment point.
//!
//! The store reflects the resolved mode onto a single root-level marker
//! (a class or attribute in a DOM host, a repaint in a native one).
//! [`RootAttachment`] is that marker's seam; the store calls
//! [`RootAttachment::apply`] once when built and again on each resolved
//! change, never on a no-op set.

use crate::theme::ColorMode;

/// Receives the resolved mode whenever it changes.
pub trait RootAttachment: Send + Sync {
    /// Applies `mode` to the UI root.
    fn apply(&self, mode: ColorMode);
}

/// An attachment that does nothing.
///
/// The default for stores whose host applies the theme some other way
/// (e.g. via a resolved-theme subscriber or the pre-paint script).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAttachment;

impl RootAttachment for NoopAttachment {
    fn apply(&self, _mode: ColorMode) {}
}

/// Adapts a closure to [`RootAttachment`].
///
/// # Example
///
/// ```rust
/// use duotone::{ColorMode, FnAttachment, RootAttachment};
///
/// let attachment = FnAttachment::new(|mode: ColorMode| {
///     println!("<html class=\"{mode}\">");
/// });
/// attachment.apply(ColorMode::Dark);
/// ```
pub struct FnAttachment {
    apply: Box<dyn Fn(ColorMode) + Send + Sync>,
}

impl FnAttachment {
    /// Wraps `apply` as an attachment.
    pub fn new(apply: impl Fn(ColorMode) + Send + Sync + 'static) -> Self {
        Self {
            apply: Box::new(apply),
        }
    }
}

impl RootAttachment for FnAttachment {
    fn apply(&self, mode: ColorMode) {
        (self.apply)(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_fn_attachment_forwards_mode() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let attachment = FnAttachment::new(move |mode| sink.lock().unwrap().push(mode));

        attachment.apply(ColorMode::Dark);
        attachment.apply(ColorMode::Light);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![ColorMode::Dark, ColorMode::Light]
        );
    }
}
