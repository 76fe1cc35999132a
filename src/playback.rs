use crate::interpolate::{interpolate_sequence, interpolate_sequence_through};
use crate::types::*;
use log::{info, warn};

/// Whether the captured poses themselves stay in the dense sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointPolicy {
    /// Each segment contributes its interior poses followed by its end capture.
    KeepCaptured,
    /// Only interpolated poses are played.
    InteriorOnly,
}

/// What the playback is showing, so an empty capture can't pass for a real animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Animated,
    /// A single captured pose, nothing to interpolate.
    Static,
    /// No captures at all; one default pose.
    Fallback,
}

/// Expand captured poses into the sequence that gets played.
///
/// With [`EndpointPolicy::KeepCaptured`] the result holds `(M - 1) * subdivisions` poses, with
/// [`EndpointPolicy::InteriorOnly`] `(M - 1) * (subdivisions - 1)`. Fewer than two captures, or a
/// policy that leaves nothing, gives back the captures unchanged.
pub fn build_dense_sequence(sparse: &[Pose], subdivisions: usize, policy: EndpointPolicy) -> Vec<Pose> {
    if sparse.len() < 2 {
        return sparse.to_vec();
    }

    let dense = match policy {
        EndpointPolicy::KeepCaptured => interpolate_sequence_through(sparse, subdivisions),
        EndpointPolicy::InteriorOnly => interpolate_sequence(sparse, subdivisions),
    };

    if dense.is_empty() {
        warn!("Interpolation produced no frames, playing the captured poses as they are");
        return sparse.to_vec();
    }
    dense
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Owns the dense sequence and the frame pointer into it. Playback always loops.
#[derive(Debug, Clone)]
pub struct Playback {
    frames: Vec<Pose>,
    frame: usize,
    playing: bool,
    status: PlaybackStatus,
}

impl Playback {
    /// Build from captured poses. An empty capture plays a single pose at `fallback_position`.
    pub fn new(sparse: &[Pose], subdivisions: usize, policy: EndpointPolicy, fallback_position: Position) -> Self {
        let (frames, status) = match sparse.len() {
            0 => {
                warn!("No captured poses, showing the default pose");
                (vec![Pose::uniform(fallback_position)], PlaybackStatus::Fallback)
            }
            1 => (sparse.to_vec(), PlaybackStatus::Static),
            _ => (
                build_dense_sequence(sparse, subdivisions, policy),
                PlaybackStatus::Animated,
            ),
        };
        info!(
            "Playback ready: {} captured poses, {} frames ({:?})",
            sparse.len(),
            frames.len(),
            status
        );
        Playback {
            frames,
            frame: 0,
            playing: true,
            status,
        }
    }

    pub fn current_pose(&self) -> &Pose {
        &self.frames[self.frame % self.frames.len()]
    }

    /// Move to the next frame. Called once per rendered frame.
    pub fn advance(&mut self) {
        self.frame = self.frame.wrapping_add(1);
    }

    /// Advance only while playing.
    pub fn tick(&mut self) {
        if self.playing {
            self.advance();
        }
    }

    pub fn step_forward(&mut self) {
        self.playing = false;
        self.frame = self.frame % self.frames.len() + 1;
    }

    pub fn step_backward(&mut self) {
        self.playing = false;
        let len = self.frames.len();
        self.frame = (self.frame % len + len - 1) % len;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn resume(&mut self) {
        self.playing = true;
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Raw frame counter; [`Playback::current_pose`] wraps it.
    pub fn frame_index(&self) -> usize {
        self.frame
    }

    /// Position inside the sequence, `0..len`.
    pub fn looped_index(&self) -> usize {
        self.frame % self.frames.len()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////////////
