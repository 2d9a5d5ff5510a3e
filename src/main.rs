use std::process::ExitCode;

use sdn_blocklist::app::App;
use sdn_blocklist::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::from_args();
    match App::run(&cli) {
        0 => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
