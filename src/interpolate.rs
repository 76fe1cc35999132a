use crate::types::*;
use log::debug;

/// In-between poses of `start` and `end`, split into `times` equal steps.
///
/// Returns `times - 1` poses ordered from `start` towards `end`, neither endpoint included.
/// `times <= 1` has no interior steps and yields nothing.
pub fn interpolate(start: &Pose, end: &Pose, times: usize) -> Vec<Pose> {
    if times <= 1 {
        return Vec::new();
    }
    let divisor = times as f64;

    (1..times)
        .map(|step| {
            let step = step as f64;
            let mut joints = *start.joints();
            for (joint, (from, to)) in joints
                .iter_mut()
                .zip(start.joints().iter().zip(end.joints().iter()))
            {
                // multiply before dividing so steps that land on whole numbers stay exact
                joint.position = from.position + (to.position - from.position) * step / divisor;
            }
            Pose::new(joints)
        })
        .collect()
}

fn __interpolate_segments(poses: &[Pose], times: usize, keep_end: bool) -> Vec<Pose> {
    let per_segment = if keep_end { times.max(1) } else { times.saturating_sub(1) };
    let mut result = Vec::with_capacity(poses.len().saturating_sub(1) * per_segment);
    for (i, pair) in poses.windows(2).enumerate() {
        debug!("interpolating between poses {} and {}", i, i + 1);
        result.extend(interpolate(&pair[0], &pair[1], times));
        if keep_end {
            result.push(pair[1].clone());
        }
    }
    result
}

/// Interior poses of every consecutive pair of `poses`, concatenated in order.
///
/// Yields `(poses.len() - 1) * (times - 1)` poses. Captured poses are not included.
pub fn interpolate_sequence(poses: &[Pose], times: usize) -> Vec<Pose> {
    __interpolate_segments(poses, times, false)
}

/// Like [`interpolate_sequence`], but every segment is closed by its end pose, giving
/// `(poses.len() - 1) * times` poses. The first pose is only reached from its neighbour.
pub fn interpolate_sequence_through(poses: &[Pose], times: usize) -> Vec<Pose> {
    __interpolate_segments(poses, times, true)
}

/////////////////////////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////////////
