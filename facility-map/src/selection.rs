use std::sync::Arc;

use maybe_sync::{MaybeSend, MaybeSync};

use crate::facility::Facility;
use crate::provider::MarkerClickHandler;

/// Function called with the facility of a clicked marker.
pub trait SelectionHandler: Fn(&Facility) + MaybeSend + MaybeSync {}

impl<T: Fn(&Facility) + MaybeSend + MaybeSync> SelectionHandler for T {}

/// Shared selection handler. The map compares callbacks by identity of the `Arc`.
pub type SelectionCallback = Arc<dyn SelectionHandler>;

/// Reports marker clicks to the application.
#[derive(Clone, Default)]
pub struct SelectionNotifier {
    callback: Option<SelectionCallback>,
}

impl SelectionNotifier {
    /// Creates a new notifier. Without a callback, clicks are ignored.
    pub fn new(callback: Option<SelectionCallback>) -> Self {
        Self { callback }
    }

    /// Returns true if both notifiers call the same callback instance.
    pub fn same_callback(&self, other: Option<&SelectionCallback>) -> bool {
        match (&self.callback, other) {
            (Some(current), Some(other)) => Arc::ptr_eq(current, other),
            (None, None) => true,
            _ => false,
        }
    }

    /// The callback.
    pub fn callback(&self) -> Option<&SelectionCallback> {
        self.callback.as_ref()
    }

    /// Creates the click handler for the marker of the given facility.
    ///
    /// The handler calls the callback once per click with the full facility record.
    pub fn handler_for(&self, facility: &Facility) -> MarkerClickHandler {
        let callback = self.callback.clone();
        let facility = facility.clone();

        Box::new(move || match &callback {
            Some(callback) => {
                log::debug!("Marker clicked: {facility:?}");
                callback(&facility);
            }
            None => log::debug!("Marker clicked, but no selection callback is set"),
        })
    }
}
