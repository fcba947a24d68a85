//! Application entry orchestration for the chatline CLI.

use crate::app::repl_loop::{run_repl, LoopExit};
use crate::cli::Args;
use chatline::api::{HttpRelay, MessageRelay};
use chatline::build_info;
use chatline::config::{load_config_with_source, Config};
use chatline::error::{AppError, InputError};
use chatline::logging::init_logging;
use chatline::render::{print_error, print_warning, render_reply};
use chatline::tui::{self, EditorSettings, MenuOption, MenuOutcome, EXIT_KEY};
use std::io::{self, Read, Write};
use std::time::Duration;
use tokio::task::block_in_place;
use tracing::{debug, info};

pub(crate) const EXIT_OK: i32 = 0;
pub(crate) const EXIT_FAILURE: i32 = 1;
/// Conventional status for termination by Ctrl+C.
pub(crate) const EXIT_CANCELLED: i32 = 130;

/// Run the CLI and return the process exit status.
pub(crate) async fn run(args: Args) -> i32 {
    let loaded = match load_config_with_source(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            print_error(!args.no_color, &e.to_string());
            return EXIT_FAILURE;
        }
    };
    let mut config = loaded.config;
    if let Err(e) = apply_cli_overrides(&mut config, &args) {
        print_error(config.display.color, &e.to_string());
        return EXIT_FAILURE;
    }
    let color = config.display.color;

    let log_path = init_logging(&config.logging);
    info!(
        banner = %build_info::banner_line(),
        config = ?loaded.source.path(),
        log = ?log_path,
        "starting"
    );

    let settings = EditorSettings::from_config(&config.editor, color);
    match run_with_config(&mut config, &settings, args.prompt.as_deref()).await {
        Ok(code) => code,
        Err(e) => {
            print_error(color, &e.to_string());
            EXIT_FAILURE
        }
    }
}

fn apply_cli_overrides(config: &mut Config, args: &Args) -> Result<(), AppError> {
    if args.no_color {
        config.display.color = false;
    }
    if let Some(service) = &args.service {
        config.select_service(service)?;
    }
    if let Some(endpoint) = &args.endpoint {
        config.override_endpoint(endpoint)?;
    }
    Ok(())
}

async fn run_with_config(
    config: &mut Config,
    settings: &EditorSettings,
    prompt: Option<&str>,
) -> Result<i32, AppError> {
    if config.needs_service_choice() {
        match choose_service(config, settings)? {
            ServiceChoice::Chosen(name) => config.select_service(&name)?,
            ServiceChoice::Exit => return Ok(EXIT_OK),
            ServiceChoice::Cancelled => return Ok(EXIT_CANCELLED),
        }
    }

    let target = config.relay_target()?;
    let relay = HttpRelay::new(
        &target,
        Duration::from_secs(config.network.timeout_secs),
        config.network.retries,
    );
    info!(service = %target.service, endpoint = %relay.endpoint(), "relay target");

    if let Some(prompt) = prompt {
        send_once(&relay, prompt, config).await?;
        return Ok(EXIT_OK);
    }

    let mut stdout = io::stdout();
    let outcome = run_repl(
        &relay,
        || block_in_place(|| tui::read_line(settings)),
        &config.display,
        &mut stdout,
    )
    .await;

    match outcome {
        Ok(LoopExit::Quit) => Ok(EXIT_OK),
        Ok(LoopExit::Cancelled) => Ok(EXIT_CANCELLED),
        Err(AppError::Input(InputError::NoTerminal)) => {
            debug!("no terminal, reading piped input");
            run_piped(&relay, config).await
        }
        Err(e) => Err(e),
    }
}

enum ServiceChoice {
    Chosen(String),
    Exit,
    Cancelled,
}

/// Ask which configured service to use.
fn choose_service(config: &Config, settings: &EditorSettings) -> Result<ServiceChoice, AppError> {
    let options = service_menu_options(config);
    let outcome = match block_in_place(|| {
        tui::select_from_menu(settings, "Choose a service", &options)
    }) {
        Ok(outcome) => outcome,
        Err(InputError::NoTerminal) => {
            print_warning(
                settings.color,
                "several services are configured; pass --service to pick one",
            );
            return Err(AppError::Input(InputError::NoTerminal));
        }
        Err(e) => return Err(e.into()),
    };

    Ok(match outcome {
        MenuOutcome::Cancelled => ServiceChoice::Cancelled,
        MenuOutcome::Selected(key) if key == EXIT_KEY => ServiceChoice::Exit,
        MenuOutcome::Selected(key) => ServiceChoice::Chosen(key),
        MenuOutcome::Continue => ServiceChoice::Cancelled,
    })
}

pub(crate) fn service_menu_options(config: &Config) -> Vec<MenuOption> {
    config
        .services
        .iter()
        .map(|(name, service)| {
            let description = if service.description.is_empty() {
                service.endpoint.clone()
            } else {
                service.description.clone()
            };
            MenuOption::new(name.as_str(), name.as_str(), description)
        })
        .chain(std::iter::once(MenuOption::new(
            EXIT_KEY,
            "exit",
            "leave without chatting",
        )))
        .collect()
}

async fn send_once<R>(relay: &R, message: &str, config: &Config) -> Result<(), AppError>
where
    R: MessageRelay + ?Sized,
{
    let reply = relay.send(message).await?;
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", render_reply(&reply, &config.display)).map_err(InputError::from)?;
    Ok(())
}

/// Relay everything on stdin as a single message.
async fn run_piped<R>(relay: &R, config: &Config) -> Result<i32, AppError>
where
    R: MessageRelay + ?Sized,
{
    let mut input = String::new();
    block_in_place(|| io::stdin().read_to_string(&mut input)).map_err(InputError::from)?;
    let message = input.trim();
    if message.is_empty() {
        return Ok(EXIT_OK);
    }
    send_once(relay, message, config).await?;
    Ok(EXIT_OK)
}
