// shaderdude
// copyright zipxing@hotmail.com 2022～2025

use shaderdude::Args;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    match shaderdude::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("shaderdude: {}", e);
            ExitCode::FAILURE
        }
    }
}
