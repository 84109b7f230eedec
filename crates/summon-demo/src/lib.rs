//! A small pet survey, shown as a modal and confirmed in a bottom sheet.
//!
//! The same flows run in the browser (the `web` feature) and against the
//! mobile shell (the `demo-mobile` binary).
use serde_json::{Value, json};
use summon::prelude::*;

#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

pub const SURVEY_ID: &str = "pet-survey";
pub const CONFIRM_ID: &str = "pet-confirm";
pub const PETS: [&str; 3] = ["cats", "dogs", "lizards"];

/// Element names and the tap event of one platform.
struct Tags {
    container: &'static str,
    heading: &'static str,
    button: &'static str,
    tap: &'static str,
}

impl Tags {
    fn of(platform: Platform) -> Self {
        match platform {
            Platform::Web => Tags {
                container: "div",
                heading: "h2",
                button: "button",
                tap: "click",
            },
            Platform::Mobile => Tags {
                container: "View",
                heading: "Text",
                button: "Pressable",
                tap: "press",
            },
        }
    }
}

fn spawn(fut: impl Future<Output = ()> + 'static) {
    #[cfg(all(feature = "web", target_arch = "wasm32"))]
    wasm_bindgen_futures::spawn_local(fut);
    #[cfg(not(all(feature = "web", target_arch = "wasm32")))]
    futures_lite::future::block_on(fut);
}

fn finish(modal: &ModalHandle, data: Value) {
    let modal = modal.clone();
    spawn(async move {
        if let Err(err) = modal.done(data).await {
            log::error!("{err}");
        }
    });
}

/// Ask for a favorite pet.
///
/// `on_answer` is called with the chosen pet once the survey is done.
pub fn ask_pet(
    registry: &ModalRegistry,
    platform: Platform,
    on_answer: impl Fn(String) + 'static,
) -> Str {
    registry.open(
        ModalRequest::new(Render::factory(move |modal: ModalHandle| {
            let tags = Tags::of(platform);
            let choices = Element::new(tags.container);
            for pet in PETS {
                let modal = modal.clone();
                choices.append_child(
                    Element::new(tags.button)
                        .with_attribute("data-pet", pet)
                        .with_child(pet)
                        .with_handler(tags.tap, move || {
                            finish(&modal, json!({ "value": pet }))
                        }),
                );
            }
            Element::new(tags.container)
                .with_child(Element::new(tags.heading).with_child("Which pet do you like best?"))
                .with_child(choices)
        }))
        .id(SURVEY_ID)
        .on_close(|| log::info!("survey dismissed"))
        .on_done_sync(move |data| match data["value"].as_str() {
            Some(pet) => {
                on_answer(pet.to_owned());
                Ok(())
            }
            None => Err("no pet was chosen"),
        }),
    )
}

/// Ask for confirmation in a bottom sheet.
pub fn confirm(
    registry: &ModalRegistry,
    platform: Platform,
    question: impl Into<Str>,
    on_confirm: impl Fn() + 'static,
) -> Str {
    let question = question.into();
    registry.open(
        ModalRequest::new(Render::factory(move |modal: ModalHandle| {
            let tags = Tags::of(platform);
            let yes = Element::new(tags.button)
                .with_attribute("data-answer", "yes")
                .with_child("Save")
                .with_handler(tags.tap, {
                    let modal = modal.clone();
                    move || finish(&modal, Value::Null)
                });
            let no = Element::new(tags.button)
                .with_attribute("data-answer", "no")
                .with_child("Cancel")
                .with_handler(tags.tap, move || modal.close());
            Element::new(tags.container)
                .with_child(Element::new(tags.heading).with_child(Text::new(question.clone())))
                .with_child(yes)
                .with_child(no)
        }))
        .id(CONFIRM_ID)
        .modal_type(ModalType::BottomSheet)
        .button_close(false)
        .style_box_content([("padding", "16px")])
        .on_done_sync(move |_| {
            on_confirm();
            Ok::<_, summon::error::BoxError>(())
        }),
    )
}

/// The survey, followed by a confirmation of the answer.
pub fn survey(registry: &ModalRegistry, platform: Platform) -> Str {
    ask_pet(registry, platform, {
        let registry = registry.clone();
        move |pet| {
            confirm(&registry, platform, format!("Save {pet} as your favorite?"), {
                move || log::info!("saved favorite pet: {pet}")
            });
        }
    })
}

#[cfg(feature = "web")]
#[wasm_bindgen(start)]
fn web_run() -> Result<(), JsValue> {
    use summon::web::{WebShell, event::EventListener};

    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Trace).map_err(|e| e.to_string())?;

    let provider = ModalProvider::mount_global(Platform::Web, WebShell::default())
        .map_err(|e| e.to_string())?;
    let body = summon::web::body().map_err(|e| e.to_string())?;
    let document = summon::web::document().map_err(|e| e.to_string())?;
    let button = document.create_element("button")?;
    button.set_text_content(Some("Take the survey"));
    body.append_child(&button)?;
    let listener = EventListener::new(&button, "click", |_| {
        survey(&summon::registry(), Platform::Web);
    })
    .map_err(|e| e.to_string())?;

    // Both live as long as the page does.
    std::mem::forget(provider);
    std::mem::forget(listener);
    Ok(())
}
