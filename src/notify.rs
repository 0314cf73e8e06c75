// Field-change publish/subscribe.
// `ChangeSignal` holds the registered callbacks. Emission takes a snapshot
// of the registered handles under a short lock, releases it, then invokes
// each callback synchronously on the emitting thread. A subscription takes
// effect for every emission whose snapshot is taken after it was inserted.

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::models::{MachineField, PropertyChanged};

new_key_type! {
    /// Handle returned by [`ChangeSignal::subscribe`], used to unsubscribe.
    pub struct SubscriptionId;
}

type Callback = Arc<dyn Fn(&PropertyChanged) + Send + Sync>;

#[derive(Default)]
pub struct ChangeSignal {
    subscribers: Mutex<SlotMap<SubscriptionId, Callback>>,
}

impl ChangeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for every field change.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        self.subscribers.lock().insert(Arc::new(callback))
    }

    /// Register a callback for changes to one field only.
    pub fn subscribe_field<F>(&self, field: MachineField, callback: F) -> SubscriptionId
    where
        F: Fn(&PropertyChanged) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if event.field == field {
                callback(event);
            }
        })
    }

    /// Returns `true` if the subscription existed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.lock().remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    /// Deliver `event` to the currently registered callbacks.
    ///
    /// The subscriber lock is not held while callbacks run, so callbacks may
    /// subscribe or unsubscribe; such changes apply from the next emission.
    pub fn emit(&self, event: PropertyChanged) {
        let callbacks: Vec<Callback> = self.subscribers.lock().values().cloned().collect();
        tracing::trace!(
            field = %event.field,
            subscribers = callbacks.len(),
            "emitting property change"
        );
        for callback in callbacks {
            callback(&event);
        }
    }
}

impl std::fmt::Debug for ChangeSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
