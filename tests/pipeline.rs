use kinect_avatar::avatar::Avatar;
use kinect_avatar::config::AvatarConfig;
use kinect_avatar::parse::{load_batch_from_file, load_batch_from_string, LiveFrame, LivePoseSource};
use kinect_avatar::playback::{build_dense_sequence, EndpointPolicy, Playback, PlaybackStatus};
use kinect_avatar::render::{draw_frame, DrawCall, RecordingRenderer};
use kinect_avatar::types::{JointType, Position, JOINT_COUNT};

/// Header plus one row holding `count` poses; pose `p` has every joint at `(p, p/2, 0)`.
fn recording(count: usize) -> String {
    let mut row: Vec<String> = Vec::new();
    for p in 0..count {
        for _ in 0..JOINT_COUNT {
            row.push(format!("{}", p as f64));
            row.push(format!("{}", p as f64 / 2.0));
            row.push("0".to_string());
        }
    }
    format!("SpineBase_X,SpineBase_Y,SpineBase_Z\n{}\n", row.join(","))
}

#[test]
fn recording_plays_as_a_smooth_loop() {
    let sparse = load_batch_from_string(&recording(4), 2.0);
    assert_eq!(sparse.len(), 4);
    // scaled by two
    assert_eq!(sparse[3][JointType::Head].position, Position::new(6.0, 3.0, 0.0));

    let mut playback = Playback::new(&sparse, 10, EndpointPolicy::KeepCaptured, Position::new(3.0, 3.0, 3.0));
    assert_eq!(playback.status(), PlaybackStatus::Animated);
    assert_eq!(playback.len(), 3 * 10);

    let mut xs = Vec::new();
    for _ in 0..playback.len() {
        xs.push(playback.current_pose()[JointType::SpineBase].position.x);
        playback.advance();
    }
    // one step is a tenth of a capture interval (2.0 after scaling)
    assert!((xs[0] - 0.2).abs() < 1e-12);
    assert_eq!(xs[9], 2.0);
    assert_eq!(*xs.last().unwrap(), 6.0);
    assert!(xs.windows(2).all(|w| w[0] < w[1]));

    // back at the start
    assert!((playback.current_pose()[JointType::SpineBase].position.x - 0.2).abs() < 1e-12);
}

#[test]
fn interior_only_sequence_length() {
    let sparse = load_batch_from_string(&recording(5), 1.0);
    let dense = build_dense_sequence(&sparse, 6, EndpointPolicy::InteriorOnly);
    assert_eq!(dense.len(), (5 - 1) * (6 - 1));
}

#[test]
fn every_frame_draws_a_whole_skeleton() {
    let config = AvatarConfig::default();
    let sparse = load_batch_from_string(&recording(3), config.scale);
    let mut avatar = Avatar::from_captures(&sparse, &config);
    let mut renderer = RecordingRenderer::new();

    for _ in 0..25 {
        renderer.clear();
        draw_frame(&mut renderer, avatar.current_pose(), config.offset());
        assert_eq!(renderer.joint_markers().count(), JOINT_COUNT);
        assert_eq!(renderer.limb_segments().count(), 26);
        assert_eq!(renderer.calls.first(), Some(&DrawCall::GroundGrid));
        avatar.advance_by(1);
    }
}

#[test]
fn missing_recording_is_distinguishable() {
    let sparse = load_batch_from_file(std::path::Path::new("/definitely/not/here.csv"), 2.0);
    assert!(sparse.is_empty());
    let playback = Playback::new(&sparse, 10, EndpointPolicy::KeepCaptured, Position::new(3.0, 3.0, 3.0));
    assert_eq!(playback.status(), PlaybackStatus::Fallback);
}

#[test]
fn live_source_survives_torn_writes() {
    let mut source = LivePoseSource::new("unused.csv", 2.0, Position::new(3.0, 3.0, 3.0));
    assert!(matches!(source.accept(""), LiveFrame::Fallback(_)));

    let good = source.accept(&recording(1));
    assert!(good.is_fresh());

    // a write caught halfway through
    let torn: String = recording(1).chars().take(120).collect();
    let frame = source.accept(&torn);
    assert_eq!(frame, LiveFrame::Stale(good.pose().clone()));
}
