mod client;
mod colors;
mod config;
mod constants;
mod engine;
mod error;
mod flags;
mod palettes;
mod report;
mod types;
mod utils;

use crate::client::run;
use crate::report::Reporter;

use std::process::ExitCode;

use anyhow::Context;

fn main() -> ExitCode {
    let mut reporter = Reporter::stdout(false);

    let result = run(std::env::args(), &mut reporter).context("conversion aborted");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {:#}", e);
            reporter.info("No image created, solve all ERROR and retry.");
            ExitCode::from(1)
        }
    }
}
