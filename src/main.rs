//! Binary entrypoint for the pantry agent server.

use std::process::ExitCode;

use pantry_agent::start_pantry_agent;

fn main() -> ExitCode {
    start_pantry_agent::run()
}
