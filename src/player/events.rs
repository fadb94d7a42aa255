use std::sync::{Mutex, PoisonError};

/// Notifications broadcast at open/close transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MediaEvent {
    /// The track layout changed (fires on both open and close).
    TracksChanged,
    /// A media source finished opening.
    MediaOpened,
    /// The open media source was closed.
    MediaClosed,
}

/// Synchronous observer list.
///
/// Callbacks run in registration order on the thread that triggered the
/// transition, after the session lock has been released. A callback may call
/// back into the player's accessors, but must not register further
/// observers.
#[derive(Default)]
pub(crate) struct EventBroadcaster {
    observers: Mutex<Vec<Box<dyn FnMut(MediaEvent) + Send>>>,
}

impl EventBroadcaster {
    pub(crate) fn subscribe(&self, callback: impl FnMut(MediaEvent) + Send + 'static) {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(callback));
    }

    pub(crate) fn broadcast(&self, event: MediaEvent) {
        let mut observers = self.observers.lock().unwrap_or_else(PoisonError::into_inner);
        for observer in observers.iter_mut() {
            observer(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn broadcast_reaches_observers_in_registration_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let broadcaster = EventBroadcaster::default();

        for tag in ["a", "b"] {
            let seen = seen.clone();
            broadcaster.subscribe(move |event| {
                seen.lock().unwrap().push((tag, event));
            });
        }

        broadcaster.broadcast(MediaEvent::TracksChanged);
        broadcaster.broadcast(MediaEvent::MediaOpened);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("a", MediaEvent::TracksChanged),
                ("b", MediaEvent::TracksChanged),
                ("a", MediaEvent::MediaOpened),
                ("b", MediaEvent::MediaOpened),
            ]
        );
    }

    #[test]
    fn broadcast_without_observers_is_a_no_op() {
        EventBroadcaster::default().broadcast(MediaEvent::MediaClosed);
    }
}
