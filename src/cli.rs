//! Command-line driver: probe, list and apply transform pipelines.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::transform::CATALOG;
use crate::{BmpPermissiveness, DecodeRequest, Limits, Transform, Unstoppable};

pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// bmpfx - decode, transform and re-encode 24-bit BMP images
#[derive(Parser)]
#[command(name = "bmpfx")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the header fields of a BMP file
    Info {
        input: PathBuf,
    },

    /// List the available transforms
    List,

    /// Decode INPUT, apply each transform in order, write OUTPUT
    Apply {
        input: PathBuf,

        output: PathBuf,

        /// Transforms such as `grayscale`, `darken=0.5`, `enlarge=2x2`
        transforms: Vec<String>,

        /// Also require the BM signature, one plane and no compression
        #[arg(long)]
        strict: bool,

        /// Refuse to decode images with more pixels than this
        #[arg(long)]
        max_pixels: Option<u64>,
    },
}

/// Parse arguments, run the command and map the outcome to an exit code.
pub fn run() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Info { input } => run_info(&input),
        Commands::List => run_list(),
        Commands::Apply {
            input,
            output,
            transforms,
            strict,
            max_pixels,
        } => run_apply(&input, &output, &transforms, strict, max_pixels),
    }
}

fn run_info(input: &Path) -> ExitCode {
    let data = match std::fs::read(input) {
        Ok(d) => d,
        Err(e) => {
            log::error!("cannot read {}: {e}", input.display());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    match crate::probe_bmp(&data) {
        Ok(info) => {
            println!("file size:      {}", info.file_size);
            println!("data offset:    {}", info.data_offset);
            println!("dimensions:     {}x{}", info.width, info.height);
            println!("bits per pixel: {}", info.bits_per_pixel);
            println!("row padding:    {}", info.padding());
            match info.expected_file_size() {
                Some(expected) => println!(
                    "consistent:     {} (expected size {expected})",
                    info.is_consistent()
                ),
                None => println!("consistent:     false (expected size overflows)"),
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            log::error!("{}: {e}", input.display());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_list() -> ExitCode {
    for (name, args, summary) in CATALOG {
        let usage = format!("{name}{args}");
        println!("  {usage:<26} {summary}");
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn run_apply(
    input: &Path,
    output: &Path,
    specs: &[String],
    strict: bool,
    max_pixels: Option<u64>,
) -> ExitCode {
    let mut transforms = Vec::with_capacity(specs.len());
    for spec in specs {
        match spec.parse::<Transform>() {
            Ok(t) => transforms.push(t),
            Err(e) => {
                log::error!("{e}");
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    }

    let data = match std::fs::read(input) {
        Ok(d) => d,
        Err(e) => {
            log::error!("cannot read {}: {e}", input.display());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let limits = Limits {
        max_pixels,
        ..Default::default()
    };
    let permissiveness = if strict {
        BmpPermissiveness::Strict
    } else {
        BmpPermissiveness::Standard
    };
    let grid = match DecodeRequest::new(&data)
        .with_limits(&limits)
        .with_permissiveness(permissiveness)
        .decode(Unstoppable)
    {
        Ok(g) => g,
        Err(e) => {
            log::error!("{}: {e}", input.display());
            return ExitCode::from(EXIT_ERROR);
        }
    };
    log::info!(
        "decoded {} ({}x{})",
        input.display(),
        grid.width(),
        grid.height()
    );

    // Each step reads the previous grid and produces a new one.
    let mut result = grid;
    for t in &transforms {
        result = t.apply(&result);
        log::info!("applied {t}");
    }

    if let Err(e) = crate::save_bmp(output, &result) {
        log::error!("{}: {e}", output.display());
        return ExitCode::from(EXIT_ERROR);
    }
    log::info!(
        "wrote {} ({}x{})",
        output.display(),
        result.width(),
        result.height()
    );
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn apply_collects_transforms_in_order() {
        let cli = Cli::parse_from([
            "bmpfx", "apply", "in.bmp", "out.bmp", "grayscale", "rotate=-1", "--strict",
        ]);
        match cli.command {
            Commands::Apply {
                transforms, strict, ..
            } => {
                assert_eq!(transforms, ["grayscale", "rotate=-1"]);
                assert!(strict);
            }
            _ => panic!("expected apply"),
        }
    }
}
