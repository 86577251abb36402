use std::path::PathBuf;

/// One input/output pair of a run. `index` is the substituted frame number,
/// if templates were used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub index: Option<usize>,
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Inserts `frame` before the last `.` of the file name in `template`, or
/// appends it when the file name has no `.`.
pub fn frame_name(template: &str, frame: usize) -> String {
    let name_start = template.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match template[name_start..].rfind('.') {
        Some(dot) => {
            let (stem, ext) = template.split_at(name_start + dot);
            format!("{stem}{frame}{ext}")
        }
        None => format!("{template}{frame}"),
    }
}

/// Frames `1..=frames` substituted into both templates, or the literal paths
/// when `frames` is `None`.
pub fn expand(input: &str, output: &str, frames: Option<usize>) -> Vec<Frame> {
    match frames {
        None => vec![Frame {
            index: None,
            input: PathBuf::from(input),
            output: PathBuf::from(output),
        }],
        Some(n) => (1..=n)
            .map(|f| Frame {
                index: Some(f),
                input: PathBuf::from(frame_name(input, f)),
                output: PathBuf::from(frame_name(output, f)),
            })
            .collect(),
    }
}
