//! Requests to show a modal.
use std::{future::Future, rc::Rc};

use futures_lite::future::BoxedLocal;
use serde_json::Value;

use crate::{
    Str,
    error::BoxError,
    node::{Element, Node, Text},
    options::{ModalOptions, ModalType, Style},
    provider::ModalHandle,
};

/// The future returned by an `on_done` callback.
pub type DoneFuture = BoxedLocal<Result<(), BoxError>>;

pub(crate) type OnClose = Rc<dyn Fn()>;
pub(crate) type OnDone = Rc<dyn Fn(Value) -> DoneFuture>;
type Factory = Rc<dyn Fn(ModalHandle) -> Node>;

/// What a modal shows.
#[derive(Clone)]
pub enum Render {
    /// Content built up front. It can still reach its lifecycle through
    /// [`ModalProvider::handle`](crate::provider::ModalProvider::handle).
    Static(Node),
    /// Content built when the modal is materialized, given the instance's
    /// lifecycle handle.
    Factory(Factory),
}

impl Render {
    pub fn factory<N: Into<Node>>(f: impl Fn(ModalHandle) -> N + 'static) -> Self {
        Render::Factory(Rc::new(move |handle| f(handle).into()))
    }

    pub(crate) fn build(&self, handle: &ModalHandle) -> Node {
        match self {
            Render::Static(node) => node.clone(),
            Render::Factory(f) => f(handle.clone()),
        }
    }
}

impl From<Node> for Render {
    fn from(node: Node) -> Self {
        Render::Static(node)
    }
}

impl From<Element> for Render {
    fn from(el: Element) -> Self {
        Render::Static(el.into())
    }
}

impl From<Text> for Render {
    fn from(text: Text) -> Self {
        Render::Static(text.into())
    }
}

/// A description of a modal to show.
///
/// ```
/// use summon::prelude::*;
///
/// let request = ModalRequest::new(Render::factory(|modal: ModalHandle| {
///     Element::new("button")
///         .with_child("Cancel")
///         .with_handler("click", move || modal.close())
/// }))
/// .id("confirm")
/// .modal_type(ModalType::BottomSheet)
/// .on_close(|| log::info!("dismissed"));
/// assert_eq!(Some("confirm"), request.get_id());
/// ```
#[derive(Clone)]
pub struct ModalRequest {
    pub(crate) id: Option<Str>,
    pub(crate) render: Render,
    pub(crate) on_close: Option<OnClose>,
    pub(crate) on_done: Option<OnDone>,
    pub(crate) options: ModalOptions,
}

impl std::fmt::Debug for ModalRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalRequest")
            .field("id", &self.id)
            .field("on_close", &self.on_close.is_some())
            .field("on_done", &self.on_done.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl ModalRequest {
    pub fn new(render: impl Into<Render>) -> Self {
        ModalRequest {
            id: None,
            render: render.into(),
            on_close: None,
            on_done: None,
            options: ModalOptions::default(),
        }
    }

    /// Set the modal's id. Without one the registry generates an id.
    pub fn id(mut self, id: impl Into<Str>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn render(&self) -> &Render {
        &self.render
    }

    pub fn options(&self) -> &ModalOptions {
        &self.options
    }

    /// Called when the modal is closed (but not when it is done).
    pub fn on_close(mut self, f: impl Fn() + 'static) -> Self {
        self.on_close = Some(Rc::new(f));
        self
    }

    /// Called with the result payload when the modal is done.
    ///
    /// The modal is removed only after the returned future resolves `Ok`.
    pub fn on_done<Fut, E>(mut self, f: impl Fn(Value) -> Fut + 'static) -> Self
    where
        Fut: Future<Output = Result<(), E>> + 'static,
        E: Into<BoxError>,
    {
        self.on_done = Some(Rc::new(move |data| {
            let fut = f(data);
            Box::pin(async move { fut.await.map_err(Into::into) }) as DoneFuture
        }));
        self
    }

    /// Like [`ModalRequest::on_done`], for callbacks that finish immediately.
    pub fn on_done_sync<E>(mut self, f: impl Fn(Value) -> Result<(), E> + 'static) -> Self
    where
        E: Into<BoxError> + 'static,
    {
        self.on_done = Some(Rc::new(move |data| {
            let result = f(data).map_err(Into::into);
            Box::pin(async move { result }) as DoneFuture
        }));
        self
    }

    pub fn with_options(mut self, options: ModalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn modal_type(mut self, ty: ModalType) -> Self {
        self.options.modal_type = ty;
        self
    }

    pub fn button_close(mut self, is_button_close: bool) -> Self {
        self.options.is_button_close = is_button_close;
        self
    }

    pub fn style_button_close(mut self, style: impl Into<Style>) -> Self {
        self.options.style_button_close = Some(style.into());
        self
    }

    pub fn style_overlay(mut self, style: impl Into<Style>) -> Self {
        self.options.style_overlay = Some(style.into());
        self
    }

    pub fn style_box_content(mut self, style: impl Into<Style>) -> Self {
        self.options.style_box_content = Some(style.into());
        self
    }
}
