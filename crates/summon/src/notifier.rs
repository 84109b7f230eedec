//! Change notification fan-out.
use std::rc::Rc;

use crate::sync::Shared;

/// Token returned by [`ChangeNotifier::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

#[derive(Default)]
struct Subscribers {
    next: u64,
    callbacks: Vec<(Subscription, Rc<dyn Fn()>)>,
}

/// A set of zero-argument callbacks, invoked synchronously and in
/// subscription order on every [`ChangeNotifier::notify`].
///
/// Nothing is queued or coalesced. A panicking subscriber unwinds out of
/// `notify` and skips the subscribers after it.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    subscribers: Shared<Subscribers>,
}

impl ChangeNotifier {
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        let mut subscribers = self.subscribers.get_mut();
        let subscription = Subscription(subscribers.next);
        subscribers.next += 1;
        subscribers
            .callbacks
            .push((subscription, Rc::new(callback)));
        log::trace!("subscribed {subscription:?}");
        subscription
    }

    /// Remove a subscriber. Returns whether it was subscribed.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut subscribers = self.subscribers.get_mut();
        let before = subscribers.callbacks.len();
        subscribers.callbacks.retain(|(s, _)| *s != subscription);
        log::trace!("unsubscribed {subscription:?}");
        subscribers.callbacks.len() != before
    }

    pub fn notify(&self) {
        // Subscribers commonly open or close modals, which subscribes and
        // notifies again, so iterate over a snapshot.
        let callbacks = self
            .subscribers
            .get()
            .callbacks
            .iter()
            .map(|(_, callback)| callback.clone())
            .collect::<Vec<_>>();
        log::trace!("notifying {} subscribers", callbacks.len());
        for callback in callbacks.iter() {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.get().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn notifies_in_subscription_order() {
        let notifier = ChangeNotifier::default();
        let calls = Shared::new(vec![]);
        let a = notifier.subscribe({
            let calls = calls.clone();
            move || calls.get_mut().push("a")
        });
        notifier.subscribe({
            let calls = calls.clone();
            move || calls.get_mut().push("b")
        });
        notifier.notify();
        assert_eq!(vec!["a", "b"], *calls.get());

        assert!(notifier.unsubscribe(a));
        assert!(!notifier.unsubscribe(a));
        notifier.notify();
        assert_eq!(vec!["a", "b", "b"], *calls.get());
        assert_eq!(1, notifier.len());
    }

    #[test]
    fn subscribers_may_subscribe_during_notify() {
        let notifier = ChangeNotifier::default();
        let count = Shared::new(0);
        notifier.subscribe({
            let notifier = notifier.clone();
            let count = count.clone();
            move || {
                *count.get_mut() += 1;
                let count = count.clone();
                notifier.subscribe(move || *count.get_mut() += 100);
            }
        });
        notifier.notify();
        assert_eq!(1, *count.get());
        notifier.notify();
        assert_eq!(102, *count.get());
    }

    #[test]
    #[should_panic(expected = "subscriber bug")]
    fn subscriber_panics_propagate() {
        let notifier = ChangeNotifier::default();
        notifier.subscribe(|| panic!("subscriber bug"));
        notifier.notify();
    }
}
