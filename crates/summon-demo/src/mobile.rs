//! Drives the survey against the mobile shell and prints the surface.
use summon::mobile::prelude::*;
use summon_demo::{CONFIRM_ID, SURVEY_ID, survey};

fn tap(shell: &MobileShell, id: &str, key: &str, value: &str) {
    let target = shell
        .frame(id)
        .and_then(|frame| frame.find_by_attribute(key, value));
    match target {
        Some(el) => {
            log::info!("tapping {key}={value} in '{id}'");
            el.fire("press");
        }
        None => log::warn!("nothing to tap for {key}={value} in '{id}'"),
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let registry = summon::registry();
    let provider = match ModalProvider::mount(&registry, Platform::Mobile, MobileShell::default())
    {
        Ok(provider) => provider,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };
    let shell = provider.shell();

    survey(&registry, Platform::Mobile);
    println!("survey: {}", shell.surface().html_string());
    println!();

    tap(shell, SURVEY_ID, "data-pet", "lizards");
    shell.settle();
    println!("confirm: {}", shell.surface().html_string());
    println!();

    tap(shell, CONFIRM_ID, "data-answer", "yes");
    shell.settle();
    println!("final: {}", shell.surface().html_string());
}
