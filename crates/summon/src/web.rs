//! Presentation shell for the browser, through web-sys.
use wasm_bindgen::{JsCast, JsValue, prelude::Closure};

use crate::{
    Str,
    animation::{ENTER_MILLIS, EXIT_MILLIS, OVERLAY_IN_MILLIS, OVERLAY_OUT_MILLIS, Pose},
    error::{Error, Result},
    node::Node,
    options::{ModalType, ShellConfig, Style},
    provider::ModalHandle,
    shell::{Platform, PresentationShell, ShellProps},
};

pub mod event;

use event::EventListener;

pub mod prelude {
    pub use super::{WebFrame, WebShell, event::*};
    pub use crate::prelude::*;
}

pub(crate) fn dom_result<T>(result: std::result::Result<T, JsValue>, what: &str) -> Result<T> {
    result.map_err(|err| Error::Dom {
        msg: format!("could not {what}: {err:?}"),
    })
}

/// Return the DOM [`web_sys::Window`].
pub fn window() -> Result<web_sys::Window> {
    web_sys::window().ok_or_else(|| Error::Dom {
        msg: "no global window".into(),
    })
}

/// Return the document JsDom object [`web_sys::Document`].
pub fn document() -> Result<web_sys::Document> {
    window()?.document().ok_or_else(|| Error::Dom {
        msg: "window has no document".into(),
    })
}

/// Return the body Dom object.
pub fn body() -> Result<web_sys::HtmlElement> {
    document()?.body().ok_or_else(|| Error::Dom {
        msg: "document does not have a body".into(),
    })
}

/// Materialized DOM for one modal instance.
pub struct WebFrame {
    id: Str,
    modal_type: ModalType,
    root: web_sys::HtmlElement,
    overlay: web_sys::HtmlElement,
    content: web_sys::HtmlElement,
    /// Kept alive for as long as the frame is in the DOM.
    listeners: Vec<EventListener>,
}

impl WebFrame {
    pub fn root(&self) -> &web_sys::HtmlElement {
        &self.root
    }
}

#[derive(Clone, Default)]
pub struct WebShell {
    config: ShellConfig,
}

impl WebShell {
    pub fn new(config: ShellConfig) -> Self {
        WebShell { config }
    }

    fn container(&self) -> Result<web_sys::Element> {
        if let Some(id) = self.config.container_id.as_deref() {
            if let Some(el) = document()?.get_element_by_id(id) {
                return Ok(el);
            }
            log::warn!("no element with id '{id}', mounting modals on the body");
        }
        Ok(body()?.into())
    }

    fn create(&self, name: &str) -> Result<web_sys::HtmlElement> {
        let el = dom_result(document()?.create_element(name), "create element")?;
        el.dyn_into::<web_sys::HtmlElement>()
            .map_err(|_| Error::Dom {
                msg: format!("'{name}' is not an html element"),
            })
    }

    fn set_styles(el: &web_sys::HtmlElement, styles: &[(Str, Str)]) -> Result<()> {
        let style = el.style();
        for (k, v) in styles.iter() {
            log::trace!("set style {k} = {v}");
            dom_result(style.set_property(k.as_str(), v.as_str()), "set style")?;
        }
        Ok(())
    }

    /// Build DOM for platform-neutral content, collecting its listeners.
    fn build(&self, node: &Node, listeners: &mut Vec<EventListener>) -> Result<web_sys::Node> {
        let element = match node {
            Node::Text(text) => {
                return Ok(document()?.create_text_node(text.text().as_str()).into());
            }
            Node::Element(element) => element,
        };
        log::trace!("building element: {}", element.name());
        let el = dom_result(document()?.create_element(element.name()), "create element")?;
        for (k, may_v) in element.attributes().into_iter() {
            let value = may_v.unwrap_or_default();
            dom_result(el.set_attribute(k.as_str(), value.as_str()), "set attribute")?;
        }
        let styles = element.styles();
        if !styles.is_empty() {
            match el.dyn_ref::<web_sys::HtmlElement>() {
                Some(html) => Self::set_styles(html, &styles)?,
                None => log::warn!("ignoring styles on non-html element {}", element.name()),
            }
        }
        for name in element.events().into_iter() {
            let element = element.clone();
            let event_name = name.clone();
            listeners.push(EventListener::new(&el, name, move |_| {
                element.fire(event_name.as_str());
            })?);
        }
        for child in element.children().iter() {
            let child = self.build(child, listeners)?;
            dom_result(el.append_child(&child), "append child")?;
        }
        Ok(el.into())
    }

    fn apply_pose(frame: &WebFrame, is_open: bool) -> Result<()> {
        let (pose, overlay_opacity, millis, overlay_millis) = if is_open {
            (Pose::resting(), "1", ENTER_MILLIS, OVERLAY_IN_MILLIS)
        } else {
            (
                Pose::exiting(frame.modal_type),
                "0",
                EXIT_MILLIS,
                OVERLAY_OUT_MILLIS,
            )
        };
        Self::set_styles(
            &frame.overlay,
            &[
                (
                    "transition".into(),
                    format!("opacity {overlay_millis}ms ease-out").into(),
                ),
                ("opacity".into(), overlay_opacity.into()),
            ],
        )?;
        Self::set_styles(
            &frame.content,
            &[
                ("transition".into(), Pose::css_transition(millis).into()),
                ("opacity".into(), pose.opacity.to_string().into()),
                ("transform".into(), pose.css_transform().into()),
            ],
        )?;
        dom_result(
            frame
                .root
                .set_attribute("data-state", if is_open { "open" } else { "closed" }),
            "set attribute",
        )
    }
}

impl PresentationShell for WebShell {
    type Frame = WebFrame;

    fn platform(&self) -> Platform {
        Platform::Web
    }

    fn present(
        &self,
        props: &ShellProps,
        content: &Node,
        handle: &ModalHandle,
    ) -> Result<Self::Frame> {
        let sheet = props.modal_type == ModalType::BottomSheet;
        let mut listeners = vec![];

        let root = self.create("div")?;
        dom_result(root.set_attribute("data-modal-id", handle.id()), "set attribute")?;
        Self::set_styles(&root, &[("display".into(), "none".into())])?;

        let overlay = self.create("div")?;
        Style::apply_web(
            props.style_overlay.as_ref(),
            &overlay,
            &[
                ("position", "fixed".into()),
                ("top", "0".into()),
                ("left", "0".into()),
                ("right", "0".into()),
                ("bottom", "0".into()),
                ("background-color", "rgba(0, 0, 0, 0.5)".into()),
                ("display", "flex".into()),
                (
                    "align-items",
                    (if sheet { "flex-end" } else { "center" }).into(),
                ),
                ("justify-content", "center".into()),
                ("z-index", self.config.z_index.to_string().into()),
            ],
        )?;
        listeners.push(EventListener::new(&overlay, "click", {
            let handle = handle.clone();
            let overlay: web_sys::EventTarget = overlay.clone().into();
            move |ev: web_sys::Event| {
                // Clicks inside the content box bubble up here too.
                if ev.target().as_ref() == Some(&overlay) {
                    handle.close();
                }
            }
        })?);

        let content_box = self.create("div")?;
        Style::apply_web(
            props.style_box_content.as_ref(),
            &content_box,
            &[
                ("background-color", "white".into()),
                (
                    "border-radius",
                    (if sheet { "16px 16px 0 0" } else { "8px" }).into(),
                ),
                ("padding", "24px".into()),
                ("position", "relative".into()),
                ("max-width", (if sheet { "100%" } else { "90%" }).into()),
                ("width", (if sheet { "100%" } else { "auto" }).into()),
                ("max-height", "90%".into()),
                ("overflow", "auto".into()),
            ],
        )?;

        if props.is_button_close {
            let close = self.create("button")?;
            dom_result(close.set_attribute("aria-label", "Close modal"), "set attribute")?;
            close.set_inner_text(&self.config.close_label);
            Style::apply_web(
                props.style_button_close.as_ref(),
                &close,
                &[
                    ("position", "absolute".into()),
                    ("top", "12px".into()),
                    ("right", "12px".into()),
                    ("background", "transparent".into()),
                    ("border", "none".into()),
                    ("font-size", "24px".into()),
                    ("cursor", "pointer".into()),
                    ("padding", "4px 8px".into()),
                    ("line-height", "1".into()),
                    ("color", "#666".into()),
                ],
            )?;
            listeners.push(EventListener::new(&close, "click", {
                let handle = handle.clone();
                move |_| handle.close()
            })?);
            dom_result(content_box.append_child(&close), "append child")?;
        }

        let children = self.build(content, &mut listeners)?;
        dom_result(content_box.append_child(&children), "append child")?;
        dom_result(overlay.append_child(&content_box), "append child")?;
        dom_result(root.append_child(&overlay), "append child")?;
        dom_result(self.container()?.append_child(&root), "append child")?;

        let mut frame = WebFrame {
            id: handle.id().clone(),
            modal_type: props.modal_type,
            root,
            overlay,
            content: content_box,
            listeners,
        };
        if props.is_open {
            self.set_open(&mut frame, true);
        } else {
            let pose = Pose::entering(props.modal_type);
            Self::set_styles(
                &frame.content,
                &[
                    ("opacity".into(), pose.opacity.to_string().into()),
                    ("transform".into(), pose.css_transform().into()),
                ],
            )?;
            Self::set_styles(&frame.overlay, &[("opacity".into(), "0".into())])?;
        }
        log::trace!("presented web frame '{}'", frame.id);
        Ok(frame)
    }

    fn set_open(&self, frame: &mut Self::Frame, is_open: bool) {
        if is_open {
            if let Err(err) = Self::set_styles(&frame.root, &[("display".into(), "block".into())]) {
                log::error!("could not show modal '{}': {err}", frame.id);
            }
            // Flush the entering pose so the transition runs.
            let _ = frame.content.offset_height();
        }
        if let Err(err) = Self::apply_pose(frame, is_open) {
            log::error!("could not animate modal '{}': {err}", frame.id);
        }
    }

    fn dismiss(&self, mut frame: Self::Frame) {
        self.set_open(&mut frame, false);
        let release = Closure::once_into_js(move || {
            log::trace!("releasing web frame '{}'", frame.id);
            frame.root.remove();
            drop(frame);
        });
        let scheduled = window().and_then(|w| {
            dom_result(
                w.set_timeout_with_callback_and_timeout_and_arguments_0(
                    release.unchecked_ref(),
                    EXIT_MILLIS as i32,
                ),
                "schedule frame release",
            )
        });
        if let Err(err) = scheduled {
            log::error!("{err}");
        }
    }

    fn teardown(&self, frame: Self::Frame) {
        frame.root.remove();
    }
}

impl Style {
    /// Like [`Style::apply`], directly on a DOM element.
    fn apply_web(
        this: Option<&Style>,
        el: &web_sys::HtmlElement,
        defaults: &[(&'static str, Str)],
    ) -> Result<()> {
        let mut styles = defaults
            .iter()
            .map(|(k, v)| (Str::from(*k), v.clone()))
            .collect::<Vec<_>>();
        match this {
            Some(Style::Class(class)) => el.set_class_name(class.as_str()),
            Some(Style::Inline(properties)) => styles.extend(properties.iter().cloned()),
            None => {}
        }
        WebShell::set_styles(el, &styles)
    }
}
