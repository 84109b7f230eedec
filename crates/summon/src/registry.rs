//! The table of pending modal requests.
use crate::{
    Str, id,
    notifier::{ChangeNotifier, Subscription},
    request::ModalRequest,
    sync::Shared,
};

thread_local! {
    static REGISTRY: ModalRegistry = ModalRegistry::default();
}

/// Mapping from modal id to [`ModalRequest`], in insertion order.
///
/// Every [`ModalRegistry::open`] notifies subscribers synchronously, before
/// it returns. [`ModalRegistry::delete`] does not notify.
///
/// Cloning gives another handle to the same registry. Applications normally
/// use the thread's default registry through [`crate::open`]; tests create
/// their own with [`ModalRegistry::default`].
#[derive(Clone, Default)]
pub struct ModalRegistry {
    entries: Shared<Vec<(Str, ModalRequest)>>,
    notifier: ChangeNotifier,
}

impl ModalRegistry {
    /// The thread's default registry.
    pub fn global() -> Self {
        REGISTRY.with(Clone::clone)
    }

    /// Register a request and notify subscribers.
    ///
    /// Requests without an id are given a generated one. A request reusing a
    /// pending id replaces the pending request in place. Returns the id.
    pub fn open(&self, mut request: ModalRequest) -> Str {
        let id = match request.id.take() {
            Some(id) if !id.is_empty() => id,
            _ => id::generate(),
        };
        request.id = Some(id.clone());
        {
            let mut entries = self.entries.get_mut();
            match entries.iter_mut().find(|(k, _)| k == &id) {
                Some((_, pending)) => {
                    log::debug!("replacing pending modal '{id}'");
                    *pending = request;
                }
                None => {
                    log::debug!("registering modal '{id}'");
                    entries.push((id.clone(), request));
                }
            }
        }
        self.notifier.notify();
        id
    }

    /// Remove a request. Returns whether it was present.
    pub fn delete(&self, id: &str) -> bool {
        let mut entries = self.entries.get_mut();
        let before = entries.len();
        entries.retain(|(k, _)| k.as_str() != id);
        let removed = entries.len() != before;
        if removed {
            log::debug!("deleted modal '{id}'");
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<ModalRequest> {
        self.entries
            .get()
            .iter()
            .find(|(k, _)| k.as_str() == id)
            .map(|(_, request)| request.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.get().iter().any(|(k, _)| k.as_str() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.get().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.get().is_empty()
    }

    pub fn ids(&self) -> Vec<Str> {
        self.entries.get().iter().map(|(k, _)| k.clone()).collect()
    }

    /// A snapshot of the current entries.
    pub fn entries(&self) -> Vec<(Str, ModalRequest)> {
        self.entries.get().clone()
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        self.notifier.unsubscribe(subscription)
    }
}
