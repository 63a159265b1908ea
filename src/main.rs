//! bmpfx - command-line BMP transform tool

use std::process::ExitCode;

fn main() -> ExitCode {
    bmpfx::cli::run()
}
