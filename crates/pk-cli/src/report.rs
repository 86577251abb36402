use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ops::{FrameStats, Operation};

/// Summary of one `planekit` invocation, written with `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    #[serde(flatten)]
    pub operation: Operation,
    pub border: usize,
    pub frames: Vec<FrameReport>,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub frame: Option<usize>,
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(flatten)]
    pub outcome: FrameOutcome,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum FrameOutcome {
    Ok(FrameStats),
    Error { message: String },
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.frames.len() - self.failed
    }
}

pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}
