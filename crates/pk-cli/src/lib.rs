//! Frame-oriented driver behind the `planekit` command.
//!
//! A run applies one [`Operation`] to every [`Frame`]: the input BMP is read
//! into planes with the operation's border, the boundary is extended, the
//! planes are filtered or resampled, and the result is written back as BMP.
//! A failing frame is logged and recorded; the remaining frames still run.

pub mod frames;
pub mod ops;
pub mod report;

pub use frames::{Frame, expand, frame_name};
pub use ops::{Execution, Extension, FilterKernel, FrameStats, Operation};
pub use report::{FrameOutcome, FrameReport, RunReport, write_json};

/// Applies `operation` to every frame in order.
pub fn run(operation: &Operation, frames: &[Frame]) -> RunReport {
    log::info!(
        "{}: processing {} frame(s), border {}",
        operation.name(),
        frames.len(),
        operation.border()
    );

    let mut reports = Vec::with_capacity(frames.len());
    let mut failed = 0usize;
    for frame in frames {
        let outcome = match operation.apply(&frame.input, &frame.output) {
            Ok(stats) => {
                log::info!(
                    "processed {} -> {}",
                    frame.input.display(),
                    frame.output.display()
                );
                FrameOutcome::Ok(stats)
            }
            Err(err) => {
                log::error!("{}: {err:#}", frame.input.display());
                failed += 1;
                FrameOutcome::Error {
                    message: format!("{err:#}"),
                }
            }
        };
        reports.push(FrameReport {
            frame: frame.index,
            input: frame.input.clone(),
            output: frame.output.clone(),
            outcome,
        });
    }

    RunReport {
        operation: operation.clone(),
        border: operation.border(),
        frames: reports,
        failed,
    }
}
