//! Presentation shell for mobile hosts.
//!
//! Frames are built as a native-style view tree (`View`, `Pressable`,
//! `TouchableOpacity`) under a host surface. A native bridge renders the
//! surface, forwards presses with [`MobileShell::press`] and reports finished
//! exit animations with [`MobileShell::settle`].
use crate::{
    Str,
    animation::{ENTER_MILLIS, EXIT_MILLIS, OVERLAY_IN_MILLIS, OVERLAY_OUT_MILLIS, Pose},
    error::Result,
    node::{Element, Node},
    options::{ModalType, ShellConfig, Style},
    provider::ModalHandle,
    shell::{Platform, PresentationShell, ShellProps},
    sync::Shared,
};

pub mod prelude {
    pub use super::{MobileFrame, MobileShell};
    pub use crate::prelude::*;
}

#[derive(Clone)]
pub struct MobileFrame {
    id: Str,
    modal_type: ModalType,
    root: Element,
    overlay: Element,
    content: Element,
}

impl MobileFrame {
    pub fn id(&self) -> &Str {
        &self.id
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// Presents modals as view trees on a host [`surface`](MobileShell::surface).
///
/// Dismissed frames stay on the surface, and are counted by
/// [`MobileShell::exiting`], until the host calls [`MobileShell::settle`]
/// after their exit animation. A host that never settles keeps every
/// dismissed frame alive.
#[derive(Clone)]
pub struct MobileShell {
    config: ShellConfig,
    surface: Element,
    exiting: Shared<Vec<MobileFrame>>,
}

impl Default for MobileShell {
    fn default() -> Self {
        Self::new(ShellConfig::default())
    }
}

impl MobileShell {
    pub fn new(config: ShellConfig) -> Self {
        let surface = Element::new("Surface");
        if let Some(id) = config.container_id.as_ref() {
            surface.set_attribute("nativeID", id.clone());
        }
        MobileShell {
            config,
            surface,
            exiting: Default::default(),
        }
    }

    /// The root every frame is attached to.
    pub fn surface(&self) -> &Element {
        &self.surface
    }

    /// The frame root of the modal with the given id, while it is on the
    /// surface.
    ///
    /// An id reopened before its previous frame settled has two frames on
    /// the surface. The live one is returned, the exiting one only when it is
    /// all that is left.
    pub fn frame(&self, id: &str) -> Option<Element> {
        let mut exiting = None;
        for node in self.surface.children() {
            let Node::Element(el) = node else {
                continue;
            };
            if el.get_attribute("data-modal-id").as_deref() != Some(id) {
                continue;
            }
            if el.get_attribute("data-state").as_deref() == Some("closing") {
                exiting.get_or_insert(el);
            } else {
                return Some(el);
            }
        }
        exiting
    }

    /// Forward a press on the `role` part (`overlay` or `close`) of a modal.
    ///
    /// Returns whether anything handled the press.
    pub fn press(&self, id: &str, role: &str) -> bool {
        self.frame(id)
            .and_then(|frame| frame.find_by_attribute("data-role", role))
            .is_some_and(|target| target.fire("press") > 0)
    }

    /// Release every frame whose exit animation has finished.
    ///
    /// Returns how many frames were released.
    pub fn settle(&self) -> usize {
        let exiting = std::mem::take(&mut *self.exiting.get_mut());
        for frame in exiting.iter() {
            log::trace!("releasing mobile frame '{}'", frame.id);
            self.surface.remove_child(&frame.root.clone().into());
        }
        exiting.len()
    }

    /// Number of frames still animating out.
    pub fn exiting(&self) -> usize {
        self.exiting.get().len()
    }

    fn apply_pose(frame: &MobileFrame, is_open: bool) {
        let (pose, overlay_opacity, millis, overlay_millis) = if is_open {
            (Pose::resting(), 1.0, ENTER_MILLIS, OVERLAY_IN_MILLIS)
        } else {
            (
                Pose::exiting(frame.modal_type),
                0.0,
                EXIT_MILLIS,
                OVERLAY_OUT_MILLIS,
            )
        };
        frame
            .root
            .set_attribute("data-state", if is_open { "open" } else { "closed" });
        frame
            .overlay
            .set_style("opacity", overlay_opacity.to_string());
        frame
            .overlay
            .set_style("animationDuration", format!("{overlay_millis}ms"));
        frame.content.set_style("opacity", pose.opacity.to_string());
        frame.content.set_style("transform", pose.css_transform());
        frame
            .content
            .set_style("animationDuration", format!("{millis}ms"));
    }
}

impl PresentationShell for MobileShell {
    type Frame = MobileFrame;

    fn platform(&self) -> Platform {
        Platform::Mobile
    }

    fn present(
        &self,
        props: &ShellProps,
        content: &Node,
        handle: &ModalHandle,
    ) -> Result<Self::Frame> {
        let sheet = props.modal_type == ModalType::BottomSheet;
        log::trace!("presenting mobile frame '{}'", handle.id());

        let root = Element::new("View")
            .with_attribute("data-role", "modal")
            .with_attribute("data-modal-id", handle.id().clone())
            .with_style("flex", "1")
            .with_style("justifyContent", "center")
            .with_style("alignItems", "center")
            .with_style("zIndex", self.config.z_index.to_string());

        let overlay = Element::new("Pressable").with_attribute("data-role", "overlay");
        let mut overlay_defaults: Vec<(&'static str, Str)> = vec![
            ("position", "absolute".into()),
            ("top", "0".into()),
            ("left", "0".into()),
            ("right", "0".into()),
            ("bottom", "0".into()),
            ("backgroundColor", "rgba(0, 0, 0, 0.5)".into()),
        ];
        if sheet {
            overlay_defaults.push(("justifyContent", "flex-end".into()));
        } else {
            overlay_defaults.push(("justifyContent", "center".into()));
            overlay_defaults.push(("alignItems", "center".into()));
        }
        Style::apply(props.style_overlay.as_ref(), &overlay, &overlay_defaults);
        overlay.on("press", {
            let handle = handle.clone();
            move || handle.close()
        });

        let content_box = Element::new("View").with_attribute("data-role", "content");
        let mut content_defaults: Vec<(&'static str, Str)> = vec![
            ("backgroundColor", "white".into()),
            ("padding", "24".into()),
            ("position", "relative".into()),
            ("maxHeight", "90%".into()),
        ];
        if sheet {
            content_defaults.extend([
                ("borderTopLeftRadius", Str::from("16")),
                ("borderTopRightRadius", Str::from("16")),
                ("width", Str::from("100%")),
                ("position", Str::from("absolute")),
                ("bottom", Str::from("0")),
            ]);
        } else {
            content_defaults.extend([
                ("borderRadius", Str::from("8")),
                ("maxWidth", Str::from("90%")),
            ]);
        }
        Style::apply(
            props.style_box_content.as_ref(),
            &content_box,
            &content_defaults,
        );

        if props.is_button_close {
            let close = Element::new("TouchableOpacity")
                .with_attribute("data-role", "close")
                .with_attribute("accessibilityLabel", "Close modal")
                .with_child(self.config.close_label.clone());
            Style::apply(
                props.style_button_close.as_ref(),
                &close,
                &[
                    ("position", "absolute".into()),
                    ("top", "12".into()),
                    ("right", "12".into()),
                    ("width", "32".into()),
                    ("height", "32".into()),
                    ("justifyContent", "center".into()),
                    ("alignItems", "center".into()),
                    ("zIndex", "1".into()),
                ],
            );
            close.on("press", {
                let handle = handle.clone();
                move || handle.close()
            });
            content_box.append_child(close);
        }
        content_box.append_child(content.clone());

        root.append_child(&overlay);
        root.append_child(&content_box);
        self.surface.append_child(&root);

        let frame = MobileFrame {
            id: handle.id().clone(),
            modal_type: props.modal_type,
            root,
            overlay,
            content: content_box,
        };
        if !props.is_open {
            // Start from the entering pose so opening animates.
            let pose = Pose::entering(props.modal_type);
            frame.content.set_style("opacity", pose.opacity.to_string());
            frame.content.set_style("transform", pose.css_transform());
            frame.overlay.set_style("opacity", "0");
            frame.root.set_attribute("data-state", "closed");
        } else {
            Self::apply_pose(&frame, true);
        }
        Ok(frame)
    }

    fn set_open(&self, frame: &mut Self::Frame, is_open: bool) {
        log::trace!("mobile frame '{}' open: {is_open}", frame.id);
        Self::apply_pose(frame, is_open);
    }

    fn dismiss(&self, mut frame: Self::Frame) {
        self.set_open(&mut frame, false);
        frame.root.set_attribute("data-state", "closing");
        self.exiting.get_mut().push(frame);
    }

    fn teardown(&self, frame: Self::Frame) {
        self.surface.remove_child(&frame.root.into());
    }
}

#[cfg(test)]
mod test {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::{
        node::Text, options::ModalOptions, provider::ModalProvider, registry::ModalRegistry,
        request::ModalRequest,
    };

    fn mount() -> (ModalRegistry, ModalProvider<MobileShell>) {
        let registry = ModalRegistry::default();
        let provider =
            ModalProvider::mount(&registry, Platform::Mobile, MobileShell::default()).unwrap();
        (registry, provider)
    }

    #[test]
    fn builds_overlay_content_and_close_button() {
        let (registry, provider) = mount();
        registry.open(ModalRequest::new(Text::new("Hi")).id("m1"));
        let frame = provider.shell().frame("m1").unwrap();
        assert_eq!(Some("open".into()), frame.get_attribute("data-state"));
        let content = frame.find_by_attribute("data-role", "content").unwrap();
        assert_eq!(Some("8".into()), content.get_style("borderRadius"));
        assert_eq!(Some("1".into()), content.get_style("opacity"));
        let close = frame.find_by_attribute("data-role", "close").unwrap();
        assert_eq!(Some("Close modal".into()), close.get_attribute("accessibilityLabel"));
        assert!(content.html_string().ends_with("Hi</View>"));
    }

    #[test]
    fn bottom_sheet_without_close_button() {
        let (registry, provider) = mount();
        registry.open(
            ModalRequest::new(Text::new("Sheet"))
                .id("s1")
                .with_options(ModalOptions {
                    modal_type: ModalType::BottomSheet,
                    is_button_close: false,
                    style_box_content: Some(Style::from([("padding", "0")])),
                    ..Default::default()
                }),
        );
        let frame = provider.shell().frame("s1").unwrap();
        assert!(frame.find_by_attribute("data-role", "close").is_none());
        let content = frame.find_by_attribute("data-role", "content").unwrap();
        assert_eq!(Some("16".into()), content.get_style("borderTopLeftRadius"));
        assert_eq!(Some("0".into()), content.get_style("padding"));
        let overlay = frame.find_by_attribute("data-role", "overlay").unwrap();
        assert_eq!(Some("flex-end".into()), overlay.get_style("justifyContent"));
    }

    #[test]
    fn overlay_press_closes_and_exit_keeps_frame_until_settled() {
        let (registry, provider) = mount();
        let closed = Rc::new(Cell::new(0));
        registry.open(
            ModalRequest::new(Text::new("Hi"))
                .id("m1")
                .on_close({
                    let closed = closed.clone();
                    move || closed.set(closed.get() + 1)
                }),
        );
        let shell = provider.shell();
        assert!(shell.press("m1", "overlay"));
        assert_eq!(1, closed.get());
        assert!(!registry.contains("m1"));

        let frame = shell.frame("m1").unwrap();
        assert_eq!(Some("closing".into()), frame.get_attribute("data-state"));
        let content = frame.find_by_attribute("data-role", "content").unwrap();
        assert_eq!(
            Some("translateY(50px) scale(0.8)".into()),
            content.get_style("transform")
        );
        assert_eq!(1, shell.exiting());

        // Pressing again while it animates out is a no-op.
        shell.press("m1", "close");
        assert_eq!(1, closed.get());

        assert_eq!(1, shell.settle());
        assert!(shell.frame("m1").is_none());
        assert!(!shell.press("m1", "overlay"));
    }

    #[test]
    fn press_reaches_a_reopened_modal_before_the_old_frame_settles() {
        let (registry, provider) = mount();
        registry.open(ModalRequest::new(Text::new("first")).id("m1"));
        let shell = provider.shell();
        assert!(shell.press("m1", "overlay"));

        let closed = Rc::new(Cell::new(0));
        registry.open(ModalRequest::new(Text::new("second")).id("m1").on_close({
            let closed = closed.clone();
            move || closed.set(closed.get() + 1)
        }));
        assert_eq!(1, shell.exiting());
        assert_eq!(
            Some("open".into()),
            shell.frame("m1").unwrap().get_attribute("data-state")
        );

        assert!(shell.press("m1", "overlay"));
        assert_eq!(1, closed.get());
        assert!(!provider.is_open("m1"));
        assert_eq!(2, shell.settle());
        assert!(shell.frame("m1").is_none());
    }

    #[test]
    fn unmount_tears_down_frames() {
        let (registry, provider) = mount();
        registry.open(ModalRequest::new(Text::new("Hi")).id("m1"));
        let shell = provider.shell().clone();
        provider.unmount();
        assert!(shell.frame("m1").is_none());
        assert!(shell.surface().children().is_empty());
        assert!(registry.contains("m1"));
    }
}
