//! Presentation options and shell configuration.
//!
//! Both are plain data and can be loaded from JSON, so an application can keep
//! its modal presets alongside the rest of its configuration.
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::{
    Str,
    error::{ConfigSnafu, Result},
    node::Element,
};

/// How a modal is placed on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModalType {
    /// Centered dialog.
    #[default]
    Modal,
    /// Anchored to the bottom edge.
    BottomSheet,
}

impl std::fmt::Display for ModalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ModalType::Modal => "modal",
            ModalType::BottomSheet => "bottomSheet",
        })
    }
}

/// A style override.
///
/// Either a class reference, applied on top of the shell's own styling, or a
/// list of inline properties merged over the shell's defaults.
///
/// Inline properties deserialize from a JSON object (`{"padding": 24}`) or a
/// list of pairs. Non-string values are kept in their JSON form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Style {
    Class(Str),
    Inline(#[serde(deserialize_with = "inline_properties")] Vec<(Str, Str)>),
}

fn inline_properties<'de, D>(deserializer: D) -> std::result::Result<Vec<(Str, Str)>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Properties {
        Object(serde_json::Map<String, serde_json::Value>),
        Pairs(Vec<(String, serde_json::Value)>),
    }

    let pairs = match Properties::deserialize(deserializer)? {
        Properties::Object(map) => map.into_iter().collect::<Vec<_>>(),
        Properties::Pairs(pairs) => pairs,
    };
    Ok(pairs
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            (Str::from(k), Str::from(v))
        })
        .collect())
}

impl From<&'static str> for Style {
    fn from(class: &'static str) -> Self {
        Style::Class(class.into())
    }
}

impl<K: Into<Str>, V: Into<Str>, const N: usize> From<[(K, V); N]> for Style {
    fn from(properties: [(K, V); N]) -> Self {
        Style::Inline(
            properties
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl Style {
    /// Apply the shell's `defaults` to `element`, then this override on top.
    pub fn apply(this: Option<&Style>, element: &Element, defaults: &[(&'static str, Str)]) {
        for (k, v) in defaults.iter() {
            element.set_style(*k, v.clone());
        }
        match this {
            Some(Style::Class(class)) => element.add_class(class),
            Some(Style::Inline(properties)) => {
                for (k, v) in properties.iter() {
                    element.set_style(k.clone(), v.clone());
                }
            }
            None => {}
        }
    }
}

fn default_true() -> bool {
    true
}

/// Presentation options of a single modal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalOptions {
    #[serde(rename = "type", default)]
    pub modal_type: ModalType,
    #[serde(default = "default_true")]
    pub is_button_close: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_button_close: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_overlay: Option<Style>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_box_content: Option<Style>,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            modal_type: ModalType::Modal,
            is_button_close: true,
            style_button_close: None,
            style_overlay: None,
            style_box_content: None,
        }
    }
}

impl ModalOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context(ConfigSnafu)
    }
}

fn default_z_index() -> u32 {
    1000
}

fn default_close_label() -> String {
    "×".to_owned()
}

/// Configuration shared by the presentation shells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    /// Id of the element frames are mounted under. Defaults to the document
    /// body on the web and the surface root on mobile.
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default = "default_z_index")]
    pub z_index: u32,
    #[serde(default = "default_close_label")]
    pub close_label: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            container_id: None,
            z_index: default_z_index(),
            close_label: default_close_label(),
        }
    }
}

impl ShellConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context(ConfigSnafu)
    }
}
