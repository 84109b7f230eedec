//! Platform selection and the presentation shell capability.
//!
//! A [`PresentationShell`] turns a modal's content plus its [`ShellProps`] into
//! something on screen and animates it between open and closed. Shells are
//! compiled in with Cargo features (`web`, `mobile`) and chosen when the
//! [`ModalProvider`](crate::provider::ModalProvider) is mounted.
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, PlatformUnavailableSnafu, Result},
    node::Node,
    options::{ModalOptions, ModalType, Style},
    provider::ModalHandle,
};

/// A rendering target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Web,
    Mobile,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Platform::Web => "web",
            Platform::Mobile => "mobile",
        })
    }
}

impl std::str::FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "web" => Ok(Platform::Web),
            "mobile" => Ok(Platform::Mobile),
            name => Err(Error::UnknownPlatform {
                name: name.to_owned(),
            }),
        }
    }
}

impl Platform {
    /// Whether this platform's shell was compiled into the build.
    pub fn is_available(&self) -> bool {
        match self {
            Platform::Web => cfg!(feature = "web"),
            Platform::Mobile => cfg!(feature = "mobile"),
        }
    }

    pub fn ensure_available(self) -> Result<Self> {
        snafu::ensure!(
            self.is_available(),
            PlatformUnavailableSnafu { platform: self }
        );
        Ok(self)
    }
}

/// Everything a shell is told about one modal instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ShellProps {
    pub is_open: bool,
    pub modal_type: ModalType,
    pub is_button_close: bool,
    pub style_button_close: Option<Style>,
    pub style_overlay: Option<Style>,
    pub style_box_content: Option<Style>,
}

impl ShellProps {
    pub fn new(is_open: bool, options: &ModalOptions) -> Self {
        ShellProps {
            is_open,
            modal_type: options.modal_type,
            is_button_close: options.is_button_close,
            style_button_close: options.style_button_close.clone(),
            style_overlay: options.style_overlay.clone(),
            style_box_content: options.style_box_content.clone(),
        }
    }
}

/// Presents and animates modal instances for one platform.
pub trait PresentationShell: 'static {
    /// Whatever the shell keeps per presented instance.
    type Frame: 'static;

    /// The platform this shell renders for.
    fn platform(&self) -> Platform;

    /// Build the overlay, content box and optional close button around
    /// `content`, initially in the pose given by `props.is_open`.
    ///
    /// User-initiated closes (overlay or close button) must call
    /// [`ModalHandle::close`] on `handle`.
    fn present(&self, props: &ShellProps, content: &Node, handle: &ModalHandle)
    -> Result<Self::Frame>;

    /// Animate the frame towards open or closed.
    fn set_open(&self, frame: &mut Self::Frame, is_open: bool);

    /// Animate the frame out and release it once the exit animation is done.
    fn dismiss(&self, frame: Self::Frame);

    /// Release the frame immediately.
    fn teardown(&self, frame: Self::Frame);
}
