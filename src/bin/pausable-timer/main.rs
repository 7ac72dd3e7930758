mod cli;
mod console;
mod setup;

use clap::Parser;
use snafu::{prelude::*, Whatever};

use crate::cli::Arguments;

#[snafu::report]
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Whatever> {
    let args = Arguments::parse();
    setup::logger(args.verbosity)?;

    let core = setup::bootstrap(&args)?;
    let res = console::run(&core, args.start).await;

    core.shutdown()
        .await
        .whatever_context("Could not shut the countdown down")?;

    res
}
