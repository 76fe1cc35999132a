use crate::types::*;
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::str::Lines;

lazy_static! {
    /// A row holds data if any of its fields starts like a number. Header rows are joint names only.
    static ref RE_NUMERIC_FIELD: Regex = Regex::new(r"(^|,)\s*[-+]?(\d|\.\d)").unwrap();
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parse one coordinate. `None` for anything that isn't a finite number.
fn __parse_field(field: &str) -> Option<f64> {
    match field.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}

/// Parse a group of 75 fields into joints. A joint with any bad component is left out, so the
/// result can hold fewer than 25 joints.
fn __parse_joints(fields: &[&str], scale: f64) -> Vec<Joint> {
    fields
        .chunks_exact(3)
        .filter_map(|xyz| {
            let x = __parse_field(xyz[0])?;
            let y = __parse_field(xyz[1])?;
            let z = __parse_field(xyz[2])?;
            Some(Joint::new(x * scale, y * scale, z * scale))
        })
        .collect()
}

fn __parse_pose(group: &[&str], group_index: usize, scale: f64) -> Option<Pose> {
    match Pose::from_joints(__parse_joints(group, scale)) {
        Ok(pose) => Some(pose),
        Err(err) => {
            debug!("Dropping pose {} of row: {}", group_index, err);
            None
        }
    }
}

/// Parse a row into complete poses. Groups that lost a joint are dropped, a trailing group with
/// fewer than 75 values is ignored.
fn __parse_row(row: &str, scale: f64) -> Vec<Pose> {
    let fields: Vec<&str> = row.split(',').collect();
    let groups = fields.chunks_exact(VALUES_PER_POSE);
    if !groups.remainder().is_empty() {
        debug!(
            "Ignoring {} trailing values that don't make up a whole pose",
            groups.remainder().len()
        );
    }

    groups
        .enumerate()
        .filter_map(|(group_index, group)| __parse_pose(group, group_index, scale))
        .collect()
}

/// Parse only the first 75 values of a row. Later groups never stand in for a broken first one.
fn __parse_leading_pose(row: &str, scale: f64) -> Option<Pose> {
    let fields: Vec<&str> = row.split(',').take(VALUES_PER_POSE).collect();
    if fields.len() < VALUES_PER_POSE {
        debug!("Row holds {} values, a pose needs {}", fields.len(), VALUES_PER_POSE);
        return None;
    }
    __parse_pose(&fields, 0, scale)
}

/// Every line after the header that has at least one numeric field.
fn __data_rows<'a>(lines: Lines<'a>) -> impl Iterator<Item = &'a str> + 'a {
    //// the first line is always the header
    lines.skip(1).filter(|line| RE_NUMERIC_FIELD.is_match(line))
}

//////////////////////////////////////////////////////////////// PUBLIC ///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parse recorded captures. Every 75 values of the first data row make one pose.
/// Returns an empty sequence when there is no usable row.
pub fn load_batch_from_string(csv: &str, scale: f64) -> Vec<Pose> {
    for row in __data_rows(csv.lines()) {
        let poses = __parse_row(row, scale);
        if !poses.is_empty() {
            return poses;
        }
    }
    return Vec::new();
}

/// Load recorded captures from a file. A missing or unreadable file yields an empty sequence.
pub fn load_batch_from_file(file_path: &Path, scale: f64) -> Vec<Pose> {
    let contents = match std::fs::read_to_string(file_path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!("Could not read captures from {:?}: {}", file_path, err);
            return Vec::new();
        }
    };
    let poses = load_batch_from_string(&contents, scale);
    info!("Loaded {} captured poses from {:?}", poses.len(), file_path);
    return poses;
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Outcome of reading a live frame. Every variant carries a complete pose.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveFrame {
    /// Parsed from the current frame.
    Fresh(Pose),
    /// Current frame was unusable, this is the last one that wasn't.
    Stale(Pose),
    /// Nothing usable has been read yet; every joint sits at the default position.
    Fallback(Pose),
}

impl LiveFrame {
    pub fn pose(&self) -> &Pose {
        match self {
            LiveFrame::Fresh(pose) | LiveFrame::Stale(pose) | LiveFrame::Fallback(pose) => pose,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, LiveFrame::Fresh(_))
    }
}

/// Reads the frame file kept up to date by the capture process.
///
/// The sensor side rewrites the file in place, so reads regularly catch it empty or half written.
/// The last complete pose is kept and handed out again until a new one arrives.
#[derive(Debug, Clone)]
pub struct LivePoseSource {
    path: PathBuf,
    scale: f64,
    default_position: Position,
    last_known_good: Option<Pose>,
}

impl LivePoseSource {
    pub fn new(path: impl Into<PathBuf>, scale: f64, default_position: Position) -> Self {
        LivePoseSource {
            path: path.into(),
            scale,
            default_position,
            last_known_good: None,
        }
    }

    pub fn last_known_good(&self) -> Option<&Pose> {
        self.last_known_good.as_ref()
    }

    /// Parse the text of one live frame. Only the first pose of a data row counts.
    pub fn accept(&mut self, csv: &str) -> LiveFrame {
        let fresh = __data_rows(csv.lines()).find_map(|row| __parse_leading_pose(row, self.scale));
        if let Some(pose) = fresh {
            self.last_known_good = Some(pose.clone());
            return LiveFrame::Fresh(pose);
        }
        match &self.last_known_good {
            Some(pose) => LiveFrame::Stale(pose.clone()),
            None => LiveFrame::Fallback(Pose::uniform(self.default_position)),
        }
    }

    /// Read and parse the frame file. Read errors count as an empty frame.
    pub fn poll(&mut self) -> LiveFrame {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!("Live frame {:?} unavailable: {}", self.path, err);
                String::new()
            }
        };
        self.accept(&contents)
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
