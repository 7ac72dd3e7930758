use std::num::ParseFloatError;
use std::str::FromStr;

use pausable_timer::domain::entity::TimerDuration;
use pausable_timer::domain::worker::{TimerEvent, TimerHandle};
use pausable_timer::domain::{ApplicationCore, Clock};
use snafu::{prelude::*, Report, Whatever};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;

const HELP: &str = "Commands: start, pause, resume, stop, status, set <seconds>, help, quit";

/// A line typed on the console.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Start,
    Pause,
    Resume,
    Stop,
    Status,
    Set(f64),
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let command = match words.next() {
            Some(word) => word.to_ascii_lowercase(),
            None => return EmptySnafu.fail(),
        };

        let parsed = match command.as_str() {
            "start" => Self::Start,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "stop" => Self::Stop,
            "status" => Self::Status,
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "set" => {
                let input = words.next().context(MissingSecondsSnafu)?;
                let seconds = input.parse().context(InvalidSecondsSnafu { input })?;
                Self::Set(seconds)
            }
            _ => return UnknownSnafu { input: command }.fail(),
        };

        ensure!(words.next().is_none(), TrailingInputSnafu { input: s.trim() });
        Ok(parsed)
    }
}

/// An error type of parsing a console line.
#[derive(Debug, Snafu, PartialEq)]
pub enum ParseCommandError {
    #[snafu(display("Nothing to do"))]
    Empty,
    #[snafu(display("Unknown command `{input}`. {HELP}"))]
    Unknown { input: String },
    #[snafu(display("`set` needs a number of seconds"))]
    MissingSeconds,
    #[snafu(display("`{input}` is not a number of seconds"))]
    InvalidSeconds {
        input: String,
        source: ParseFloatError,
    },
    #[snafu(display("Unexpected arguments in `{input}`"))]
    TrailingInput { input: String },
}

/// Read commands from stdin and print countdown events until `quit` or the
/// end of input.
pub async fn run(core: &ApplicationCore, start: bool) -> Result<(), Whatever> {
    let timer = core.timer();
    let mut events = timer.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if start {
        execute(timer, ConsoleCommand::Start).await?;
    }
    println!("{HELP}");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = line.whatever_context("Could not read from stdin")?;
                let Some(line) = line else { break };

                match line.parse::<ConsoleCommand>() {
                    Ok(ConsoleCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(err) = execute(timer, command).await {
                            eprintln!("{}", Report::from_error(err));
                        }
                    }
                    Err(ParseCommandError::Empty) => {}
                    Err(err) => eprintln!("{err}"),
                }
            }
            event = events.recv() => match event {
                Ok(event) => println!("{}", describe(event)),
                Err(RecvError::Lagged(_)) => {}
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}

async fn execute(timer: &TimerHandle, command: ConsoleCommand) -> Result<(), Whatever> {
    match command {
        ConsoleCommand::Start => timer
            .start()
            .await
            .whatever_context("Could not start the countdown"),
        ConsoleCommand::Pause => timer
            .pause()
            .await
            .whatever_context("Could not pause the countdown"),
        ConsoleCommand::Resume => timer
            .resume()
            .await
            .whatever_context("Could not resume the countdown"),
        ConsoleCommand::Stop => timer
            .stop()
            .await
            .whatever_context("Could not stop the countdown"),
        ConsoleCommand::Set(seconds) => {
            let duration = TimerDuration::try_from_secs_f64(seconds)
                .whatever_context("Invalid countdown duration")?;
            timer
                .set(duration)
                .await
                .whatever_context("Could not change the countdown duration")?;
            println!("Duration set to {}", Clock(duration.inner()));
            Ok(())
        }
        ConsoleCommand::Status => {
            let response = timer
                .query()
                .await
                .whatever_context("Could not query the countdown")?;
            println!(
                "{} {} / {}",
                response.status,
                Clock(response.remaining),
                Clock(response.total)
            );
            Ok(())
        }
        ConsoleCommand::Help => {
            println!("{HELP}");
            Ok(())
        }
        ConsoleCommand::Quit => Ok(()),
    }
}

fn describe(event: TimerEvent) -> &'static str {
    match event {
        TimerEvent::Started => "Started",
        TimerEvent::Paused => "Paused",
        TimerEvent::Resumed => "Resumed",
        TimerEvent::Stopped { finished: true } => "Finished",
        TimerEvent::Stopped { finished: false } => "Stopped",
    }
}
