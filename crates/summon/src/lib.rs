//! Imperative modals for web and mobile views.
//!
//! Any part of an application can ask for a modal to be shown without the
//! modal being declared in the surrounding view. A single
//! [`ModalProvider`](provider::ModalProvider), mounted once near the root,
//! renders whatever has been requested.
//!
//! ## Pieces
//!
//! * [`ModalRegistry`](registry::ModalRegistry) - the table of pending
//!   [`ModalRequest`](request::ModalRequest)s. [`open`] registers a request
//!   with the thread's default registry.
//! * [`ChangeNotifier`](notifier::ChangeNotifier) - tells the provider that
//!   the registry changed.
//! * [`ModalProvider`](provider::ModalProvider) - materializes each request
//!   once, tracks whether it is open and hands out
//!   [`ModalHandle`](provider::ModalHandle)s for `close` and `done`.
//! * [`PresentationShell`](shell::PresentationShell) - draws and animates an
//!   instance on one platform. `summon` ships a [`web`] shell and a [`mobile`]
//!   shell, each behind the Cargo feature of the same name.
//!
//! ## Example
//!
//! ```
//! use summon::{mobile::MobileShell, prelude::*};
//!
//! let registry = ModalRegistry::default();
//! let provider = ModalProvider::mount(&registry, Platform::Mobile, MobileShell::default())?;
//!
//! registry.open(
//!     ModalRequest::new(Render::factory(|modal: ModalHandle| {
//!         Element::new("button")
//!             .with_child("Save")
//!             .with_handler("press", move || {
//!                 let modal = modal.clone();
//!                 futures_lite::future::block_on(async move {
//!                     modal.done(serde_json::json!({"saved": true})).await
//!                 })
//!                 .unwrap();
//!             })
//!     }))
//!     .id("save")
//!     .on_done_sync(|data| {
//!         assert_eq!(true, data["saved"]);
//!         Ok::<_, summon::error::BoxError>(())
//!     }),
//! );
//! assert!(provider.is_open("save"));
//!
//! let button = provider.content("save").unwrap();
//! button.as_element().unwrap().fire("press");
//! assert_eq!(ModalPhase::Removed, provider.phase("save"));
//! # Ok::<(), summon::error::Error>(())
//! ```
pub mod animation;
pub mod error;
pub mod id;
#[cfg(feature = "mobile")]
pub mod mobile;
pub mod node;
pub mod notifier;
pub mod options;
pub mod provider;
pub mod registry;
pub mod request;
pub mod shell;
pub mod str;
pub mod sync;
#[cfg(feature = "web")]
pub mod web;

pub use str::Str;

pub mod prelude {
    pub use crate::{
        Str,
        error::{Error, Result},
        node::{Element, Node, Text},
        options::{ModalOptions, ModalType, ShellConfig, Style},
        provider::{ModalHandle, ModalPhase, ModalProvider},
        registry::ModalRegistry,
        request::{ModalRequest, Render},
        shell::{Platform, PresentationShell, ShellProps},
    };
}

/// The thread's default registry.
pub fn registry() -> registry::ModalRegistry {
    registry::ModalRegistry::global()
}

/// Request a modal from the thread's default registry.
///
/// Returns the modal's id.
pub fn open(request: request::ModalRequest) -> Str {
    registry().open(request)
}
