use clap::Parser;
use tracing::info;

use dash_dock::components::ContentSet;
use dash_dock::config::{AppConfig, Cli};
use dash_dock::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use dash_dock::error::AppError;
use dash_dock::runner::run_dashboard;
use dash_dock::tracing_sub;
use dash_dock::window::WindowManager;
use dash_dock::window::defaults::initial_registry;

fn main() -> Result<(), AppError> {
    let config = AppConfig::from(Cli::parse());
    tracing_sub::init(&config.log)?;
    info!(mouse_capture = config.mouse_capture, "starting dashboard");

    let registry = initial_registry(config.layout);
    let mut contents = ContentSet::placeholders(&registry);
    let mut wm = WindowManager::new(registry);
    wm.set_mouse_capture_enabled(config.mouse_capture);
    // The driver enables capture itself on start.
    let _ = wm.take_mouse_capture_change();

    let mut driver = ConsoleInputDriver::new();
    let mut output = ConsoleOutputDriver::new()?;
    run_dashboard(
        &mut driver,
        &mut output,
        &mut wm,
        &mut contents,
        config.poll_interval,
    )?;
    info!("dashboard closed");
    Ok(())
}
