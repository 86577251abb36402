use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::Level;
use pk_cli::{Execution, Extension, FilterKernel, Operation, RunReport, expand, run, write_json};

#[derive(Parser, Debug)]
#[command(name = "planekit")]
#[command(about = "Filter, resample and colorize BMP frames through bordered planes")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Write a JSON run report to this path.
    #[arg(long, global = true)]
    report: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a constant to every sample (integer planes).
    Brighten(BrightenArgs),
    /// 9x9 FIR filter.
    Filter(FilterArgs),
    /// Separable box blur.
    Blur(BlurArgs),
    /// Separable Gaussian blur.
    Gaussian(GaussianArgs),
    /// Bilinear upscale by an integer factor.
    Bilinear(BilinearArgs),
    /// Hann-windowed sinc upscale by an integer factor.
    Sinc(SincArgs),
    /// Central-difference gradient rendered as hue/chroma.
    Gradient(GradientArgs),
    /// Derivative-of-Gaussian gradient rendered as hue/chroma.
    Dog(DogArgs),
}

#[derive(Args, Debug, Clone)]
struct FrameArgs {
    /// Input BMP path, or template when a frame count is given.
    input: String,
    /// Output BMP path, or template when a frame count is given.
    output: String,
    /// Number of frames; inserts 1..=N before the last '.' of each template.
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    frames: Option<u32>,
}

#[derive(Args, Debug, Clone)]
struct BrightenArgs {
    #[command(flatten)]
    io: FrameArgs,
    #[arg(long, default_value_t = 60, allow_hyphen_values = true)]
    delta: i32,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    #[command(flatten)]
    io: FrameArgs,
    #[arg(long, value_enum, default_value_t = FilterKernel::Box)]
    kernel: FilterKernel,
    /// Sharpening strength of the unsharp kernel.
    #[arg(long, default_value_t = 0.5)]
    alpha: f32,
    #[arg(long, value_enum, default_value_t = Extension::Symmetric)]
    extension: Extension,
    #[arg(long, value_enum, default_value_t = Execution::Scalar)]
    path: Execution,
}

#[derive(Args, Debug, Clone)]
struct BlurArgs {
    #[command(flatten)]
    io: FrameArgs,
    #[arg(long, default_value_t = 4)]
    extent: usize,
    #[arg(long, value_enum, default_value_t = Extension::Symmetric)]
    extension: Extension,
    #[arg(long, value_enum, default_value_t = Execution::Scalar)]
    path: Execution,
}

#[derive(Args, Debug, Clone)]
struct GaussianArgs {
    #[command(flatten)]
    io: FrameArgs,
    #[arg(long, default_value_t = 1.0)]
    sigma: f32,
    #[arg(long, value_enum, default_value_t = Extension::Symmetric)]
    extension: Extension,
    #[arg(long, value_enum, default_value_t = Execution::Scalar)]
    path: Execution,
}

#[derive(Args, Debug, Clone)]
struct BilinearArgs {
    #[command(flatten)]
    io: FrameArgs,
    #[arg(long, default_value_t = 3)]
    scale: usize,
    #[arg(long, value_enum, default_value_t = Extension::Hold)]
    extension: Extension,
}

#[derive(Args, Debug, Clone)]
struct SincArgs {
    #[command(flatten)]
    io: FrameArgs,
    #[arg(long, default_value_t = 3)]
    scale: usize,
    #[arg(long, default_value_t = 5)]
    half_width: usize,
    #[arg(long, value_enum, default_value_t = Extension::Hold)]
    extension: Extension,
}

#[derive(Args, Debug, Clone)]
struct GradientArgs {
    #[command(flatten)]
    io: FrameArgs,
    #[arg(long, default_value_t = 1.0)]
    gain: f32,
    /// Black out pixels that are not a strict local magnitude maximum.
    #[arg(long)]
    thin: bool,
    #[arg(long, value_enum, default_value_t = Extension::Hold)]
    extension: Extension,
}

#[derive(Args, Debug, Clone)]
struct DogArgs {
    #[command(flatten)]
    io: FrameArgs,
    /// Gaussian scale, 1 to 5.
    #[arg(long)]
    sigma: f32,
    #[arg(long, default_value_t = 1.0)]
    gain: f32,
    #[arg(long)]
    thin: bool,
    #[arg(long, value_enum, default_value_t = Extension::Hold)]
    extension: Extension,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logger(cli.verbose)?;

    let (operation, io) = into_operation(cli.cmd);
    operation
        .validate()
        .with_context(|| format!("invalid {} parameters", operation.name()))?;

    let frames = expand(&io.input, &io.output, io.frames.map(|n| n as usize));
    let report = run(&operation, &frames);

    if let Some(path) = &cli.report {
        write_json(path, &report)?;
    }
    finish(&report)
}

fn setup_logger(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::Info,
        1 => Level::Debug,
        _ => Level::Trace,
    };
    simple_logger::init_with_level(level).context("initializing logger")?;
    log::debug!("log level: {level}");
    Ok(())
}

fn finish(report: &RunReport) -> Result<()> {
    if report.failed > 0 {
        bail!(
            "{} of {} frame(s) failed",
            report.failed,
            report.frames.len()
        );
    }
    log::info!("all {} frame(s) processed", report.succeeded());
    Ok(())
}

fn into_operation(cmd: Command) -> (Operation, FrameArgs) {
    match cmd {
        Command::Brighten(a) => (Operation::Brighten { delta: a.delta }, a.io),
        Command::Filter(a) => (
            Operation::Filter {
                kernel: a.kernel,
                alpha: a.alpha,
                extension: a.extension,
                path: a.path,
            },
            a.io,
        ),
        Command::Blur(a) => (
            Operation::Blur {
                extent: a.extent,
                extension: a.extension,
                path: a.path,
            },
            a.io,
        ),
        Command::Gaussian(a) => (
            Operation::Gaussian {
                sigma: a.sigma,
                extension: a.extension,
                path: a.path,
            },
            a.io,
        ),
        Command::Bilinear(a) => (
            Operation::Bilinear {
                scale: a.scale,
                extension: a.extension,
            },
            a.io,
        ),
        Command::Sinc(a) => (
            Operation::Sinc {
                scale: a.scale,
                half_width: a.half_width,
                extension: a.extension,
            },
            a.io,
        ),
        Command::Gradient(a) => (
            Operation::Gradient {
                gain: a.gain,
                thin: a.thin,
                extension: a.extension,
            },
            a.io,
        ),
        Command::Dog(a) => (
            Operation::Dog {
                sigma: a.sigma,
                gain: a.gain,
                thin: a.thin,
                extension: a.extension,
            },
            a.io,
        ),
    }
}
