//! The modal lifecycle coordinator.
//!
//! A [`ModalProvider`] is mounted once, near the root of the application. It
//! subscribes to a [`ModalRegistry`] and, on every change, materializes each
//! pending request into an instance exactly once and hands it to the
//! [`PresentationShell`] for the chosen platform.
//!
//! Each instance moves through [`ModalPhase`]s:
//!
//! `Pending` -> `Open` -> `Closing` -> `Removed`
//!
//! `Removed` is terminal. Opening the same id again afterwards starts a brand
//! new instance.
//!
//! Content reaches its own lifecycle through the [`ModalHandle`] passed to its
//! render factory.
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use serde_json::Value;
use snafu::ResultExt;

use crate::{
    Str,
    error::{DoneSnafu, PlatformMismatchSnafu, Result},
    node::Node,
    notifier::Subscription,
    options::{ModalOptions, ModalType},
    registry::ModalRegistry,
    request::{ModalRequest, OnDone},
    shell::{Platform, PresentationShell, ShellProps},
};

/// Where a modal id is in its lifecycle, as seen by one provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalPhase {
    /// Registered, not yet materialized.
    Pending,
    /// Materialized and presented.
    Open,
    /// Closing has started, the instance is about to be evicted.
    Closing,
    /// Not known to the registry or the provider.
    Removed,
}

/// A snapshot of one materialized instance.
#[derive(Clone, Debug, PartialEq)]
pub struct InstanceSnapshot {
    pub id: Str,
    pub is_open: bool,
    pub phase: ModalPhase,
    pub modal_type: ModalType,
    pub options: ModalOptions,
}

/// The provider side of a [`ModalHandle`].
trait InstanceHost {
    fn is_live(&self, id: &Str, serial: u64) -> bool;
    fn close_instance(&self, id: &Str, serial: u64);
    /// `None` when the instance is gone or already closing.
    fn completion(&self, id: &Str, serial: u64) -> Option<Option<OnDone>>;
    fn finish_instance(&self, id: &Str, serial: u64);
}

/// The `close`/`done` capability of one modal instance.
///
/// Handles are cheap to clone and may outlive the instance or the provider,
/// in which case their operations do nothing.
#[derive(Clone)]
pub struct ModalHandle {
    id: Str,
    serial: u64,
    host: Weak<dyn InstanceHost>,
}

impl std::fmt::Debug for ModalHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalHandle")
            .field("id", &self.id)
            .field("serial", &self.serial)
            .finish()
    }
}

impl ModalHandle {
    pub fn id(&self) -> &Str {
        &self.id
    }

    /// Whether the instance this handle belongs to is still materialized.
    pub fn is_live(&self) -> bool {
        self.host
            .upgrade()
            .is_some_and(|host| host.is_live(&self.id, self.serial))
    }

    /// Close the modal.
    ///
    /// Calls `on_close`, animates the modal out and removes it from the
    /// registry. Does nothing if the instance is already closing or gone.
    pub fn close(&self) {
        match self.host.upgrade() {
            Some(host) => host.close_instance(&self.id, self.serial),
            None => log::warn!("modal '{}' closed after its provider unmounted", self.id),
        }
    }

    /// Finish the modal with a result.
    ///
    /// Awaits `on_done` with `data`, then removes the modal like
    /// [`ModalHandle::close`] does, without calling `on_close`.
    ///
    /// ## Errors
    /// If `on_done` fails the error is returned and the modal stays open.
    pub async fn done(&self, data: Value) -> Result<()> {
        let completion = match self.host.upgrade() {
            Some(host) => host.completion(&self.id, self.serial),
            None => {
                log::warn!("modal '{}' done after its provider unmounted", self.id);
                return Ok(());
            }
        };
        let Some(on_done) = completion else {
            log::debug!("modal '{}' is no longer live, ignoring done", self.id);
            return Ok(());
        };
        if let Some(on_done) = on_done {
            log::debug!("awaiting on_done of modal '{}'", self.id);
            on_done(data).await.context(DoneSnafu {
                id: self.id.clone(),
            })?;
        }
        // The provider may have been unmounted while `on_done` was pending.
        match self.host.upgrade() {
            Some(host) => host.finish_instance(&self.id, self.serial),
            None => log::warn!(
                "modal '{}' finished after its provider unmounted",
                self.id
            ),
        }
        Ok(())
    }
}

struct Instance<F> {
    id: Str,
    serial: u64,
    request: ModalRequest,
    handle: ModalHandle,
    content: Option<Node>,
    is_open: bool,
    closing: bool,
    frame: Option<F>,
}

impl<F> Instance<F> {
    fn phase(&self) -> ModalPhase {
        if self.closing {
            ModalPhase::Closing
        } else {
            ModalPhase::Open
        }
    }

    fn snapshot(&self) -> InstanceSnapshot {
        InstanceSnapshot {
            id: self.id.clone(),
            is_open: self.is_open,
            phase: self.phase(),
            modal_type: self.request.options.modal_type,
            options: self.request.options.clone(),
        }
    }
}

struct ProviderState<F> {
    instances: Vec<Instance<F>>,
    next_serial: u64,
}

impl<F> ProviderState<F> {
    fn find(&self, id: &str) -> Option<&Instance<F>> {
        self.instances.iter().find(|i| i.id.as_str() == id)
    }

    fn find_live(&mut self, id: &Str, serial: u64) -> Option<&mut Instance<F>> {
        self.instances
            .iter_mut()
            .find(|i| &i.id == id && i.serial == serial)
    }

    fn take(&mut self, id: &Str, serial: u64) -> Option<Instance<F>> {
        let index = self
            .instances
            .iter()
            .position(|i| &i.id == id && i.serial == serial)?;
        Some(self.instances.remove(index))
    }
}

struct ProviderCore<S: PresentationShell> {
    this: Weak<ProviderCore<S>>,
    shell: S,
    registry: ModalRegistry,
    state: RefCell<ProviderState<S::Frame>>,
}

impl<S: PresentationShell> ProviderCore<S> {
    /// Evict an instance and delete its registry entry.
    ///
    /// Returns `false` if the instance was already gone.
    fn evict(&self, id: &Str, serial: u64) -> bool {
        let Some(mut instance) = self.state.borrow_mut().take(id, serial) else {
            return false;
        };
        instance.is_open = false;
        if let Some(frame) = instance.frame.take() {
            self.shell.dismiss(frame);
        }
        self.registry.delete(id);
        log::debug!("removed modal '{id}'");
        true
    }

    fn reconcile(&self) {
        let entries = self.registry.entries();

        // Requests deleted from the registry by someone other than us.
        let stale = self
            .state
            .borrow()
            .instances
            .iter()
            .filter(|i| !i.closing && !entries.iter().any(|(id, _)| id == &i.id))
            .map(|i| (i.id.clone(), i.serial))
            .collect::<Vec<_>>();
        for (id, serial) in stale {
            log::debug!("modal '{id}' left the registry, evicting");
            self.evict(&id, serial);
        }

        for (id, _) in entries {
            // Factories run during this pass may have closed, deleted or
            // replaced later entries.
            let Some(request) = self.registry.get(&id) else {
                log::trace!("modal '{id}' left the registry during reconcile");
                continue;
            };
            if self.state.borrow().find(&id).is_some() {
                log::trace!("modal '{id}' already materialized");
                continue;
            }
            self.materialize(id, request);
        }
    }

    fn materialize(&self, id: Str, request: ModalRequest) {
        let this: Weak<dyn InstanceHost> = self.this.clone();
        let handle = {
            let mut state = self.state.borrow_mut();
            let serial = state.next_serial;
            state.next_serial += 1;
            let handle = ModalHandle {
                id: id.clone(),
                serial,
                host: this,
            };
            state.instances.push(Instance {
                id: id.clone(),
                serial,
                request: request.clone(),
                handle: handle.clone(),
                content: None,
                is_open: false,
                closing: false,
                frame: None,
            });
            handle
        };
        log::debug!("materializing modal '{id}'");

        // The factory runs with no borrows held, it may open or close modals.
        let content = request.render.build(&handle);
        if !self.is_live(&id, handle.serial) {
            log::debug!("modal '{id}' closed while it was being built");
            return;
        }

        let props = ShellProps::new(false, &request.options);
        match self.shell.present(&props, &content, &handle) {
            Ok(mut frame) => {
                self.shell.set_open(&mut frame, true);
                let mut state = self.state.borrow_mut();
                match state.find_live(&id, handle.serial) {
                    Some(instance) => {
                        instance.content = Some(content);
                        instance.frame = Some(frame);
                        instance.is_open = true;
                        log::debug!("opened modal '{id}'");
                    }
                    None => {
                        drop(state);
                        self.shell.teardown(frame);
                    }
                }
            }
            Err(err) => {
                log::error!("could not present modal '{id}': {err}");
                self.evict(&id, handle.serial);
            }
        }
    }

    fn teardown_all(&self) {
        let instances = std::mem::take(&mut self.state.borrow_mut().instances);
        for instance in instances {
            if let Some(frame) = instance.frame {
                self.shell.teardown(frame);
            }
        }
    }
}

impl<S: PresentationShell> InstanceHost for ProviderCore<S> {
    fn is_live(&self, id: &Str, serial: u64) -> bool {
        self.state.borrow_mut().find_live(id, serial).is_some()
    }

    fn close_instance(&self, id: &Str, serial: u64) {
        let on_close = {
            let mut state = self.state.borrow_mut();
            let Some(instance) = state.find_live(id, serial) else {
                log::trace!("modal '{id}' is not live, ignoring close");
                return;
            };
            if instance.closing {
                return;
            }
            // Mark first so a close from inside `on_close` is ignored.
            instance.closing = true;
            instance.request.on_close.clone()
        };
        log::debug!("closing modal '{id}'");
        if let Some(on_close) = on_close {
            on_close();
        }
        self.evict(id, serial);
    }

    fn completion(&self, id: &Str, serial: u64) -> Option<Option<OnDone>> {
        let mut state = self.state.borrow_mut();
        let instance = state.find_live(id, serial)?;
        if instance.closing {
            return None;
        }
        Some(instance.request.on_done.clone())
    }

    fn finish_instance(&self, id: &Str, serial: u64) {
        {
            let mut state = self.state.borrow_mut();
            match state.find_live(id, serial) {
                Some(instance) if !instance.closing => instance.closing = true,
                _ => {
                    log::debug!("modal '{id}' was removed while finishing");
                    return;
                }
            }
        }
        log::debug!("modal '{id}' done");
        self.evict(id, serial);
    }
}

/// Renders every modal requested through a [`ModalRegistry`].
///
/// Mount exactly one provider per registry. Dropping the provider (or calling
/// [`ModalProvider::unmount`]) unsubscribes it and tears down its frames.
/// Pending requests stay in the registry and are picked up by the next
/// provider mounted against it.
pub struct ModalProvider<S: PresentationShell> {
    core: Rc<ProviderCore<S>>,
    subscription: Option<Subscription>,
}

impl<S: PresentationShell> ModalProvider<S> {
    /// Mount a provider for `platform`, presenting with `shell`.
    ///
    /// ## Errors
    /// Fails with a configuration error if `platform` was not compiled into
    /// this build, or if `shell` presents for a different platform.
    pub fn mount(registry: &ModalRegistry, platform: Platform, shell: S) -> Result<Self> {
        let platform = platform.ensure_available()?;
        let provided = shell.platform();
        snafu::ensure!(
            provided == platform,
            PlatformMismatchSnafu {
                requested: platform,
                provided,
            }
        );

        let core = Rc::new_cyclic(|this| ProviderCore {
            this: this.clone(),
            shell,
            registry: registry.clone(),
            state: RefCell::new(ProviderState {
                instances: vec![],
                next_serial: 0,
            }),
        });
        let subscription = registry.subscribe({
            let core = Rc::downgrade(&core);
            move || {
                if let Some(core) = core.upgrade() {
                    core.reconcile();
                }
            }
        });
        log::debug!("mounted {platform} modal provider");
        core.reconcile();
        Ok(ModalProvider {
            core,
            subscription: Some(subscription),
        })
    }

    /// Mount against the thread's default registry.
    pub fn mount_global(platform: Platform, shell: S) -> Result<Self> {
        Self::mount(&ModalRegistry::global(), platform, shell)
    }

    pub fn platform(&self) -> Platform {
        self.core.shell.platform()
    }

    pub fn shell(&self) -> &S {
        &self.core.shell
    }

    pub fn registry(&self) -> &ModalRegistry {
        &self.core.registry
    }

    /// Synchronize instances with the registry.
    ///
    /// This runs on mount and on every registry notification. Deleting from
    /// the registry does not notify, so callers that delete requests directly
    /// can reconcile to evict the matching instances.
    pub fn reconcile(&self) {
        self.core.reconcile();
    }

    /// The lifecycle handle of a live instance.
    pub fn handle(&self, id: &str) -> Option<ModalHandle> {
        self.core
            .state
            .borrow()
            .find(id)
            .map(|i| i.handle.clone())
    }

    /// The materialized content of a live instance.
    pub fn content(&self, id: &str) -> Option<Node> {
        self.core
            .state
            .borrow()
            .find(id)
            .and_then(|i| i.content.clone())
    }

    pub fn phase(&self, id: &str) -> ModalPhase {
        if let Some(instance) = self.core.state.borrow().find(id) {
            return instance.phase();
        }
        if self.core.registry.contains(id) {
            ModalPhase::Pending
        } else {
            ModalPhase::Removed
        }
    }

    /// Snapshots of every instance, in materialization order.
    pub fn instances(&self) -> Vec<InstanceSnapshot> {
        self.core
            .state
            .borrow()
            .instances
            .iter()
            .map(Instance::snapshot)
            .collect()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.core
            .state
            .borrow()
            .find(id)
            .is_some_and(|i| i.is_open)
    }

    /// Close the live instance with the given id, if any.
    pub fn close(&self, id: &str) {
        if let Some(handle) = self.handle(id) {
            handle.close();
        }
    }

    /// Finish the live instance with the given id, if any.
    pub async fn done(&self, id: &str, data: Value) -> Result<()> {
        match self.handle(id) {
            Some(handle) => handle.done(data).await,
            None => Ok(()),
        }
    }

    pub fn unmount(self) {}
}

impl<S: PresentationShell> Drop for ModalProvider<S> {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.core.registry.unsubscribe(subscription);
        }
        self.core.teardown_all();
        log::debug!("unmounted {} modal provider", self.core.shell.platform());
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;

    use futures_lite::future::block_on;
    use serde_json::json;

    use super::*;
    use crate::{
        error::{BoxError, Error},
        node::Text,
        request::Render,
        sync::Shared,
    };

    /// A shell that records what it is asked to do.
    #[derive(Clone)]
    struct RecordingShell {
        platform: Platform,
        log: Shared<Vec<String>>,
        fail: Shared<bool>,
    }

    impl RecordingShell {
        fn new() -> Self {
            RecordingShell {
                platform: Platform::Mobile,
                log: Default::default(),
                fail: Default::default(),
            }
        }

        fn take_log(&self) -> Vec<String> {
            std::mem::take(&mut *self.log.get_mut())
        }
    }

    impl PresentationShell for RecordingShell {
        type Frame = Str;

        fn platform(&self) -> Platform {
            self.platform
        }

        fn present(&self, props: &ShellProps, content: &Node, handle: &ModalHandle) -> Result<Str> {
            if *self.fail.get() {
                return Err(Error::Dom {
                    msg: "no surface".into(),
                });
            }
            self.log.get_mut().push(format!(
                "present {} {} {} {}",
                handle.id(),
                props.is_open,
                props.modal_type,
                content.html_string()
            ));
            Ok(handle.id().clone())
        }

        fn set_open(&self, frame: &mut Str, is_open: bool) {
            self.log.get_mut().push(format!("set_open {frame} {is_open}"));
        }

        fn dismiss(&self, frame: Str) {
            self.log.get_mut().push(format!("dismiss {frame}"));
        }

        fn teardown(&self, frame: Str) {
            self.log.get_mut().push(format!("teardown {frame}"));
        }
    }

    fn mount() -> (ModalRegistry, ModalProvider<RecordingShell>, RecordingShell) {
        let registry = ModalRegistry::default();
        let shell = RecordingShell::new();
        let provider = ModalProvider::mount(&registry, Platform::Mobile, shell.clone()).unwrap();
        (registry, provider, shell)
    }

    fn text(s: &'static str) -> ModalRequest {
        ModalRequest::new(Text::new(s))
    }

    #[test]
    fn mismatched_shell_is_a_configuration_error() {
        let registry = ModalRegistry::default();
        let result = ModalProvider::mount(&registry, Platform::Web, RecordingShell::new());
        let err = match result {
            Ok(_) => panic!("mounted with the wrong shell"),
            Err(err) => err,
        };
        assert!(err.is_configuration(), "{err}");
        assert!(registry.notifier().is_empty());
    }

    #[test]
    fn open_presents_closed_then_opens() {
        let (registry, provider, shell) = mount();
        registry.open(text("hi").id("m1"));
        assert_eq!(
            vec!["present m1 false modal hi", "set_open m1 true"],
            shell.take_log()
        );
        assert_eq!(ModalPhase::Open, provider.phase("m1"));
        assert!(provider.is_open("m1"));
        assert_eq!(1, provider.instances().len());
    }

    #[test]
    fn pending_requests_are_materialized_on_mount() {
        let registry = ModalRegistry::default();
        registry.open(text("early").id("early"));
        let shell = RecordingShell::new();
        let provider = ModalProvider::mount(&registry, Platform::Mobile, shell.clone()).unwrap();
        assert!(provider.is_open("early"));
        assert_eq!(2, shell.take_log().len());
    }

    #[test]
    fn duplicate_open_of_live_id_is_ignored() {
        let (registry, provider, shell) = mount();
        let built = Rc::new(Cell::new(0));
        let factory = {
            let built = built.clone();
            Render::factory(move |_| {
                built.set(built.get() + 1);
                Text::new("first")
            })
        };
        registry.open(ModalRequest::new(factory).id("m1"));
        registry.open(text("second").id("m1"));
        assert_eq!(1, built.get());
        assert_eq!(1, provider.instances().len());
        assert_eq!(
            "first",
            provider.content("m1").unwrap().html_string()
        );
        assert_eq!(2, shell.take_log().len());
    }

    #[test]
    fn close_calls_on_close_once_and_removes() {
        let (registry, provider, shell) = mount();
        let closed = Rc::new(Cell::new(0));
        registry.open(text("hi").id("m1").on_close({
            let closed = closed.clone();
            move || closed.set(closed.get() + 1)
        }));
        let handle = provider.handle("m1").unwrap();
        shell.take_log();

        handle.close();
        handle.close();
        provider.close("m1");
        assert_eq!(1, closed.get());
        assert_eq!(vec!["dismiss m1"], shell.take_log());
        assert!(!registry.contains("m1"));
        provider.reconcile();
        assert!(provider.handle("m1").is_none());
        assert_eq!(ModalPhase::Removed, provider.phase("m1"));
        assert!(!handle.is_live());
    }

    #[test]
    fn on_close_sees_the_closing_phase() {
        let (registry, provider, _shell) = mount();
        let provider = Rc::new(provider);
        let seen = Shared::new(None);
        registry.open(text("hi").id("m1").on_close({
            let provider = Rc::downgrade(&provider);
            let seen = seen.clone();
            move || {
                let provider = provider.upgrade().unwrap();
                *seen.get_mut() = Some(provider.phase("m1"));
                // Closing again from inside on_close is ignored.
                provider.close("m1");
            }
        }));
        provider.close("m1");
        assert_eq!(Some(ModalPhase::Closing), *seen.get());
        assert_eq!(ModalPhase::Removed, provider.phase("m1"));
    }

    #[test]
    fn done_passes_data_and_skips_on_close() {
        let (registry, provider, _shell) = mount();
        let closed = Rc::new(Cell::new(false));
        let received = Shared::new(None);
        registry.open(
            text("form")
                .id("m1")
                .on_close({
                    let closed = closed.clone();
                    move || closed.set(true)
                })
                .on_done_sync({
                    let received = received.clone();
                    move |data| {
                        *received.get_mut() = Some(data);
                        Ok::<_, BoxError>(())
                    }
                }),
        );
        block_on(provider.done("m1", json!({"value": "x"}))).unwrap();
        assert_eq!(Some(json!({"value": "x"})), *received.get());
        assert!(!closed.get());
        assert_eq!(ModalPhase::Removed, provider.phase("m1"));
    }

    #[test]
    fn failing_done_keeps_the_modal_open() {
        let (registry, provider, shell) = mount();
        let attempts = Rc::new(Cell::new(0));
        registry.open(text("form").id("m1").on_done({
            let attempts = attempts.clone();
            move |_| {
                attempts.set(attempts.get() + 1);
                let attempt = attempts.get();
                async move {
                    if attempt == 1 {
                        Err("server said no")
                    } else {
                        Ok(())
                    }
                }
            }
        }));
        shell.take_log();
        let handle = provider.handle("m1").unwrap();

        let err = block_on(handle.done(json!(1))).unwrap_err();
        assert!(matches!(&err, Error::Done { id, .. } if id == "m1"));
        assert!(err.to_string().contains("server said no"));
        assert!(provider.is_open("m1"));
        assert!(registry.contains("m1"));
        assert!(shell.take_log().is_empty());

        block_on(handle.done(json!(2))).unwrap();
        assert_eq!(ModalPhase::Removed, provider.phase("m1"));
        assert_eq!(vec!["dismiss m1"], shell.take_log());
    }

    #[test]
    fn done_without_on_done_just_closes() {
        let (registry, provider, _shell) = mount();
        registry.open(text("hi").id("m1"));
        block_on(provider.done("m1", Value::Null)).unwrap();
        assert!(!registry.contains("m1"));
        assert!(provider.instances().is_empty());
    }

    #[test]
    fn instances_are_independent() {
        let (registry, provider, _shell) = mount();
        registry.open(text("a").id("a"));
        registry.open(text("b").id("b").modal_type(ModalType::BottomSheet));
        provider.close("a");
        let instances = provider.instances();
        assert_eq!(1, instances.len());
        assert_eq!("b", instances[0].id.as_str());
        assert!(instances[0].is_open);
        assert_eq!(ModalType::BottomSheet, instances[0].modal_type);
    }

    #[test]
    fn ids_are_reusable_after_removal() {
        let (registry, provider, _shell) = mount();
        registry.open(text("X").id("a"));
        let first = provider.handle("a").unwrap();
        first.close();
        registry.open(text("Y").id("a"));
        assert_eq!("Y", provider.content("a").unwrap().html_string());
        let second = provider.handle("a").unwrap();
        assert!(second.is_live());
        // The old handle does not reach the new instance.
        first.close();
        assert!(second.is_live());
    }

    #[test]
    fn stale_done_does_not_remove_a_reopened_instance() {
        let (registry, provider, _shell) = mount();
        let (tx, rx) = async_channel::bounded::<()>(1);
        registry.open(text("X").id("a").on_done(move |_| {
            let rx = rx.clone();
            async move {
                let _ = rx.recv().await;
                Ok::<_, BoxError>(())
            }
        }));
        let first = provider.handle("a").unwrap();
        let mut pending = Box::pin(first.done(Value::Null));
        assert!(block_on(futures_lite::future::poll_once(&mut pending)).is_none());

        // Closed and reopened while on_done is still pending.
        first.close();
        registry.open(text("Y").id("a"));
        tx.try_send(()).unwrap();
        block_on(pending).unwrap();
        assert!(provider.is_open("a"));
        assert_eq!("Y", provider.content("a").unwrap().html_string());
    }

    #[test]
    fn done_after_unmount_is_a_no_op() {
        let (registry, provider, shell) = mount();
        let (tx, rx) = async_channel::bounded::<()>(1);
        registry.open(text("X").id("a").on_done(move |_| {
            let rx = rx.clone();
            async move {
                let _ = rx.recv().await;
                Ok::<_, BoxError>(())
            }
        }));
        let handle = provider.handle("a").unwrap();
        let mut pending = Box::pin(handle.done(Value::Null));
        assert!(block_on(futures_lite::future::poll_once(&mut pending)).is_none());

        provider.unmount();
        assert!(shell.take_log().contains(&"teardown a".to_owned()));
        tx.try_send(()).unwrap();
        block_on(pending).unwrap();
        assert!(shell.take_log().is_empty());
        assert!(registry.notifier().is_empty());
    }

    #[test]
    fn factory_can_close_its_own_modal() {
        let (registry, provider, shell) = mount();
        registry.open(ModalRequest::new(Render::factory(|modal: ModalHandle| {
            modal.close();
            Text::new("gone")
        }))
        .id("a"));
        assert_eq!(ModalPhase::Removed, provider.phase("a"));
        assert!(shell.take_log().is_empty());
    }

    #[test]
    fn factory_can_open_another_modal() {
        let (registry, provider, _shell) = mount();
        registry.open(
            ModalRequest::new(Render::factory({
                let registry = registry.clone();
                move |_| {
                    registry.open(ModalRequest::new(Text::new("nested")).id("inner"));
                    Text::new("outer")
                }
            }))
            .id("outer"),
        );
        let ids = provider
            .instances()
            .into_iter()
            .map(|i| i.id)
            .collect::<Vec<_>>();
        assert_eq!(vec![Str::from("outer"), Str::from("inner")], ids);
    }

    #[test]
    fn externally_deleted_requests_are_evicted_on_reconcile() {
        let (registry, provider, shell) = mount();
        registry.open(text("hi").id("a"));
        shell.take_log();
        registry.delete("a");
        // Deleting does not notify.
        assert!(provider.is_open("a"));
        provider.reconcile();
        assert_eq!(ModalPhase::Removed, provider.phase("a"));
        assert_eq!(vec!["dismiss a"], shell.take_log());
    }

    #[test]
    fn present_failure_drops_the_request() {
        let (registry, provider, shell) = mount();
        *shell.fail.get_mut() = true;
        registry.open(text("hi").id("a"));
        assert_eq!(ModalPhase::Removed, provider.phase("a"));
        assert!(registry.is_empty());
    }

    #[test]
    fn remount_does_not_leak_subscriptions() {
        let registry = ModalRegistry::default();
        for _ in 0..3 {
            let provider =
                ModalProvider::mount(&registry, Platform::Mobile, RecordingShell::new()).unwrap();
            assert_eq!(1, registry.notifier().len());
            drop(provider);
        }
        assert!(registry.notifier().is_empty());
    }

    #[test]
    fn request_closed_by_a_nested_pass_is_not_materialized_again() {
        let registry = ModalRegistry::default();
        let closed = Rc::new(Cell::new(0));
        registry.open(
            ModalRequest::new(Render::factory({
                let registry = registry.clone();
                move |_| {
                    registry.open(text("c").id("c"));
                    Text::new("a")
                }
            }))
            .id("a"),
        );
        registry.open(
            ModalRequest::new(Render::factory(|modal: ModalHandle| {
                modal.close();
                Text::new("b")
            }))
            .id("b")
            .on_close({
                let closed = closed.clone();
                move || closed.set(closed.get() + 1)
            }),
        );

        let shell = RecordingShell::new();
        let provider = ModalProvider::mount(&registry, Platform::Mobile, shell.clone()).unwrap();
        assert_eq!(1, closed.get());
        assert_eq!(ModalPhase::Removed, provider.phase("b"));
        assert!(provider.is_open("a"));
        assert!(provider.is_open("c"));
        assert!(!shell.take_log().iter().any(|line| line.starts_with("present b")));
    }

    #[test]
    fn request_deleted_by_a_factory_is_not_presented() {
        let registry = ModalRegistry::default();
        registry.open(
            ModalRequest::new(Render::factory({
                let registry = registry.clone();
                move |_| {
                    registry.delete("b");
                    Text::new("a")
                }
            }))
            .id("a"),
        );
        registry.open(text("b").id("b"));

        let provider =
            ModalProvider::mount(&registry, Platform::Mobile, RecordingShell::new()).unwrap();
        assert!(!registry.contains("b"));
        assert!(!provider.is_open("b"));
        assert_eq!(ModalPhase::Removed, provider.phase("b"));
        assert!(provider.is_open("a"));
    }
}
