use anyhow::{Context, Result};
use kinect_avatar::avatar::Avatar;
use kinect_avatar::config::AvatarConfig;
use log::info;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "kinect_avatar", about = "Plays back Kinect skeleton captures as a 3D avatar")]
struct Opt {
    /// Capture file; overrides `input` (or `live_input` with --live) from the config
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Follow the live capture file instead of playing a recording
    #[structopt(short, long)]
    live: bool,

    /// Config file, defaults to $KINECT_AVATAR_CONFIG or ./avatar.toml
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// Segments each captured interval is split into
    #[structopt(short, long)]
    subdivisions: Option<usize>,

    /// Frames to play before exiting (headless builds only)
    #[structopt(short, long, default_value = "600")]
    frames: usize,
}

fn load_config(opt: &Opt) -> Result<AvatarConfig> {
    let mut config = match &opt.config {
        Some(path) => AvatarConfig::load(path)?,
        None => AvatarConfig::load_default()?,
    };
    if opt.live {
        config.live = true;
    }
    if let Some(input) = &opt.input {
        if config.live {
            config.live_input = input.clone();
        } else {
            config.input = input.clone();
        }
    }
    if let Some(subdivisions) = opt.subdivisions {
        config.subdivisions = subdivisions;
    }
    config.validate().context("invalid command line options")?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let opt = Opt::from_args();
    let config = load_config(&opt).context("failed to load config")?;
    info!("starting up with {:?}", config);

    let avatar = Avatar::from_config(&config);
    run(avatar, &config, opt.frames);
    Ok(())
}

#[cfg(feature = "visualize")]
fn run(avatar: Avatar, config: &AvatarConfig, _frames: usize) {
    kinect_avatar::visualize::visualize_avatar(avatar, config);
}

/// Same loop as the viewer without a window: read pose, draw, pace, advance.
#[cfg(not(feature = "visualize"))]
fn run(mut avatar: Avatar, config: &AvatarConfig, frames: usize) {
    use kinect_avatar::pacing::FramePacer;
    use kinect_avatar::render::{draw_frame, RecordingRenderer};
    use std::time::Instant;

    let pacer = FramePacer::new(config.frame_budget());
    let mut renderer = RecordingRenderer::new();
    let started = Instant::now();

    for frame in 0..frames {
        let frame_start = Instant::now();
        renderer.clear();
        draw_frame(&mut renderer, avatar.current_pose(), config.offset());
        log::trace!("frame {}: {} draw calls, {}", frame, renderer.calls.len(), avatar.describe());
        pacer.pace(frame_start);
        avatar.advance_by(1);
    }
    info!(
        "played {} frames in {:.2?} ({})",
        frames,
        started.elapsed(),
        avatar.describe()
    );
}
