use crate::config::AvatarConfig;
use crate::parse::{load_batch_from_file, LiveFrame, LivePoseSource};
use crate::playback::Playback;
use crate::types::*;
use log::info;

/// Where the avatar's pose comes from: a looping recording or the live capture file.
#[derive(Debug, Clone)]
pub enum Avatar {
    Recorded(Playback),
    Live {
        source: LivePoseSource,
        frame: LiveFrame,
    },
}

impl Avatar {
    /// Load everything the configured mode needs. The recording is fully built before this returns.
    pub fn from_config(config: &AvatarConfig) -> Self {
        if config.live {
            info!("Reading live frames from {:?}", config.live_input);
            let mut source = LivePoseSource::new(&config.live_input, config.scale, config.default_position());
            let frame = source.poll();
            return Avatar::Live { source, frame };
        }
        let sparse = load_batch_from_file(&config.input, config.scale);
        Avatar::from_captures(&sparse, config)
    }

    pub fn from_captures(sparse: &[Pose], config: &AvatarConfig) -> Self {
        Avatar::Recorded(Playback::new(
            sparse,
            config.subdivisions,
            config.endpoint_policy(),
            config.default_position(),
        ))
    }

    pub fn current_pose(&self) -> &Pose {
        match self {
            Avatar::Recorded(playback) => playback.current_pose(),
            Avatar::Live { frame, .. } => frame.pose(),
        }
    }

    /// Move on by `frames` animation frames. A live avatar just reads the newest frame.
    pub fn advance_by(&mut self, frames: u32) {
        if frames == 0 {
            return;
        }
        match self {
            Avatar::Recorded(playback) => {
                for _ in 0..frames {
                    playback.tick();
                }
            }
            Avatar::Live { source, frame } => *frame = source.poll(),
        }
    }

    pub fn playback_mut(&mut self) -> Option<&mut Playback> {
        match self {
            Avatar::Recorded(playback) => Some(playback),
            Avatar::Live { .. } => None,
        }
    }

    /// One line status, e.g. for the viewer's debug overlay.
    pub fn describe(&self) -> String {
        match self {
            Avatar::Recorded(playback) => format!(
                "Recorded {:?}: frame {}/{}{}",
                playback.status(),
                playback.looped_index(),
                playback.len(),
                if playback.is_playing() { "" } else { " (paused)" }
            ),
            Avatar::Live { frame, .. } => match frame {
                LiveFrame::Fresh(_) => "Live: fresh frame".to_string(),
                LiveFrame::Stale(_) => "Live: stale frame".to_string(),
                LiveFrame::Fallback(_) => "Live: no data yet".to_string(),
            },
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////////////
