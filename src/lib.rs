//! Animated 3D skeletal avatar from Kinect v2 joint captures.
//!
//! Captured poses are loaded by [`parse`], expanded into a smooth sequence by [`interpolate`] and
//! [`playback`], and drawn through the [`render::Renderer`] trait using the fixed skeleton in
//! [`topology`]. With the `visualize` feature the avatar is shown in a bevy window.

pub mod avatar;
pub mod config;
pub mod error;
pub mod interpolate;
pub mod pacing;
pub mod parse;
pub mod playback;
pub mod render;
pub mod topology;
pub mod types;
#[cfg(feature = "visualize")]
pub mod visualize;
