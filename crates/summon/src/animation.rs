//! Enter and exit poses shared by the presentation shells.
//!
//! A shell moves the content box from [`Pose::entering`] to [`Pose::resting`]
//! when a modal opens and from [`Pose::resting`] to [`Pose::exiting`] when it
//! closes. Only the end points are described here; easing is up to the shell.
use crate::options::ModalType;

/// Duration of the content box entering.
pub const ENTER_MILLIS: u32 = 400;
/// Duration of the content box leaving. Frames are released after this.
pub const EXIT_MILLIS: u32 = 300;
/// Duration of the overlay fading in.
pub const OVERLAY_IN_MILLIS: u32 = 300;
/// Duration of the overlay fading out.
pub const OVERLAY_OUT_MILLIS: u32 = 200;

/// Vertical offset of a resting or exiting content box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Offset {
    Px(f32),
    /// Percentage of the content box's own height.
    Percent(f32),
}

impl std::fmt::Display for Offset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Offset::Px(px) => write!(f, "{px}px"),
            Offset::Percent(pct) => write!(f, "{pct}%"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub opacity: f32,
    pub scale: f32,
    pub translate_y: Offset,
}

impl Pose {
    /// Where the content box starts when opening.
    pub fn entering(ty: ModalType) -> Self {
        match ty {
            ModalType::Modal => Pose {
                opacity: 0.0,
                scale: 0.8,
                translate_y: Offset::Px(50.0),
            },
            ModalType::BottomSheet => Pose {
                opacity: 1.0,
                scale: 1.0,
                translate_y: Offset::Percent(100.0),
            },
        }
    }

    /// The open pose.
    pub fn resting() -> Self {
        Pose {
            opacity: 1.0,
            scale: 1.0,
            translate_y: Offset::Px(0.0),
        }
    }

    /// Where the content box ends up when closing.
    pub fn exiting(ty: ModalType) -> Self {
        Self::entering(ty)
    }

    pub fn css_transform(&self) -> String {
        format!("translateY({}) scale({})", self.translate_y, self.scale)
    }

    /// The CSS `transition` value for moving into this pose.
    pub fn css_transition(millis: u32) -> String {
        format!("transform {millis}ms ease-out, opacity {millis}ms ease-out")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn modal_scales_and_sheet_slides() {
        assert_eq!(
            "translateY(50px) scale(0.8)",
            Pose::entering(ModalType::Modal).css_transform()
        );
        assert_eq!(
            "translateY(100%) scale(1)",
            Pose::exiting(ModalType::BottomSheet).css_transform()
        );
        assert_eq!("translateY(0px) scale(1)", Pose::resting().css_transform());
    }
}
