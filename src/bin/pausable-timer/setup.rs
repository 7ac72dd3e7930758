use std::sync::Arc;

use pausable_timer::adapter::config::{self, Configuration};
use pausable_timer::adapter::DesktopNotifier;
use pausable_timer::domain::entity::TimerDuration;
use pausable_timer::domain::outbound::NotifyPort;
use pausable_timer::domain::ApplicationCore;
use snafu::{prelude::*, Whatever};
use tracing::Level;

use crate::cli::Arguments;

const APP_NAME: &str = "pausable-timer";

pub fn bootstrap(args: &Arguments) -> Result<ApplicationCore, Whatever> {
    let configuration = configuration(args)?;
    let duration = duration(args, &configuration)?;

    let notify = if args.no_notify {
        None
    } else {
        let message = configuration
            .notification()
            .whatever_context("Invalid notification in configuration")?;
        let notify_port: Arc<dyn NotifyPort> = Arc::new(DesktopNotifier::new(APP_NAME.to_owned()));
        Some((notify_port, message))
    };

    tracing::info!(?duration, notify = notify.is_some(), "Setting up countdown");
    Ok(ApplicationCore::setup(duration, notify))
}

pub fn logger(level: Level) -> Result<(), Whatever> {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .whatever_context("Could not setup logger")?;
    Ok(())
}

fn configuration(args: &Arguments) -> Result<Configuration, Whatever> {
    let res = match &args.config {
        Some(path) => config::load_with_path(path),
        None => config::load_with_xdg(APP_NAME),
    };
    res.whatever_context("Could not load configuration")
}

fn duration(args: &Arguments, configuration: &Configuration) -> Result<TimerDuration, Whatever> {
    match args.duration {
        Some(seconds) => TimerDuration::try_from_secs_f64(seconds)
            .whatever_context("Invalid countdown duration on the command line"),
        None => configuration
            .duration()
            .whatever_context("Invalid countdown duration in configuration"),
    }
}
