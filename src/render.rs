use crate::topology::{self, RED};
use crate::types::*;
use log::trace;

/// Primitive drawing the avatar is made of. Implemented by the bevy viewer and by [`RecordingRenderer`].
pub trait Renderer {
    fn draw_joint_marker(&mut self, position: Position, radius: f32, color: Rgb);

    /// Tapered cylinder from `a` (base) to `b` (tip).
    fn draw_limb_segment(&mut self, a: Position, b: Position, base_radius: f32, tip_radius: f32, color: Rgb);

    fn draw_ground_grid(&mut self);

    fn draw_axis_gizmo(&mut self);

    /// Thin polyline through one kinematic chain of the wireframe overlay. Renderers without an
    /// overlay can ignore it.
    fn draw_bone_strip(&mut self, _points: &[Position], _color: Rgb) {}
}

/// Draw one frame of the avatar: grid, joints, limbs, axes, then the line overlay.
pub fn draw_frame<R: Renderer + ?Sized>(renderer: &mut R, pose: &Pose, offset: Position) {
    renderer.draw_ground_grid();

    //// joints
    for (joint_type, joint) in pose.iter() {
        let style = topology::joint_style(joint_type);
        renderer.draw_joint_marker(joint.scene_position(offset), style.radius, style.color);
    }

    //// limbs
    for limb in topology::limbs() {
        renderer.draw_limb_segment(
            pose[limb.from].scene_position(offset),
            pose[limb.to].scene_position(offset),
            limb.style.base_radius,
            limb.style.tip_radius,
            limb.style.color,
        );
    }

    renderer.draw_axis_gizmo();

    //// overlay, one strip per chain
    for chain in topology::kinematic_chains() {
        let points: Vec<Position> = chain.iter().map(|&joint| pose[joint].scene_position(offset)).collect();
        renderer.draw_bone_strip(&points, RED);
    }
    trace!("drew pose rooted at {:?}", pose[JointType::SpineBase].position);
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    JointMarker {
        position: Position,
        radius: f32,
        color: Rgb,
    },
    LimbSegment {
        a: Position,
        b: Position,
        base_radius: f32,
        tip_radius: f32,
        color: Rgb,
    },
    GroundGrid,
    AxisGizmo,
    BoneStrip {
        points: Vec<Position>,
        color: Rgb,
    },
}

/// Renderer that only remembers what it was asked to draw. Used headless and in tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn joint_markers(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::JointMarker { .. }))
    }

    pub fn limb_segments(&self) -> impl Iterator<Item = &DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::LimbSegment { .. }))
    }
}

impl Renderer for RecordingRenderer {
    fn draw_joint_marker(&mut self, position: Position, radius: f32, color: Rgb) {
        self.calls.push(DrawCall::JointMarker {
            position,
            radius,
            color,
        });
    }

    fn draw_limb_segment(&mut self, a: Position, b: Position, base_radius: f32, tip_radius: f32, color: Rgb) {
        self.calls.push(DrawCall::LimbSegment {
            a,
            b,
            base_radius,
            tip_radius,
            color,
        });
    }

    fn draw_ground_grid(&mut self) {
        self.calls.push(DrawCall::GroundGrid);
    }

    fn draw_axis_gizmo(&mut self) {
        self.calls.push(DrawCall::AxisGizmo);
    }

    fn draw_bone_strip(&mut self, points: &[Position], color: Rgb) {
        self.calls.push(DrawCall::BoneStrip {
            points: points.to_vec(),
            color,
        });
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{GREEN, YELLOW};

    fn numbered_pose() -> Pose {
        let joints = (0..JOINT_COUNT).map(|i| Joint::new(i as f64, 0.0, 0.0)).collect();
        Pose::from_joints(joints).unwrap()
    }

    #[test]
    fn frame_draws_everything_in_order() {
        let mut renderer = RecordingRenderer::new();
        draw_frame(&mut renderer, &numbered_pose(), Position::new(0.0, 0.0, 0.0));

        assert_eq!(renderer.calls[0], DrawCall::GroundGrid);
        assert_eq!(renderer.joint_markers().count(), JOINT_COUNT);
        assert_eq!(renderer.limb_segments().count(), 26);
        assert_eq!(renderer.calls[1 + JOINT_COUNT + 26], DrawCall::AxisGizmo);
        assert_eq!(
            renderer.calls.len(),
            1 + JOINT_COUNT + 26 + 1 + topology::kinematic_chains().len()
        );
    }

    #[test]
    fn overlay_follows_the_kinematic_chains() {
        let mut renderer = RecordingRenderer::new();
        draw_frame(&mut renderer, &numbered_pose(), Position::new(0.0, 0.0, 0.0));
        let strips: Vec<&Vec<Position>> = renderer
            .calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::BoneStrip { points, color } => {
                    assert_eq!(*color, RED);
                    Some(points)
                }
                _ => None,
            })
            .collect();

        assert_eq!(strips.len(), topology::kinematic_chains().len());
        // spine base -> spine mid -> spine shoulder, x holds the joint index
        let xs: Vec<f64> = strips[0].iter().map(|point| point.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 20.0]);
        let segments: usize = strips.iter().map(|points| points.len() - 1).sum();
        assert_eq!(segments, topology::edges().len());
    }

    #[test]
    fn markers_use_scene_positions_and_joint_styles() {
        let mut renderer = RecordingRenderer::new();
        draw_frame(&mut renderer, &numbered_pose(), Position::new(6.0, 2.5, 2.0));

        let head = renderer.joint_markers().nth(JointType::Head.index()).unwrap();
        assert_eq!(
            *head,
            DrawCall::JointMarker {
                position: Position::new(9.0, 2.5, 2.0),
                radius: 0.3,
                color: topology::BLUE,
            }
        );
    }

    #[test]
    fn limbs_connect_the_right_joints() {
        let mut renderer = RecordingRenderer::new();
        draw_frame(&mut renderer, &numbered_pose(), Position::new(0.0, 0.0, 0.0));
        let limbs: Vec<&DrawCall> = renderer.limb_segments().collect();

        // head -> neck
        assert_eq!(
            *limbs[0],
            DrawCall::LimbSegment {
                a: Position::new(3.0, 0.0, 0.0),
                b: Position::new(2.0, 0.0, 0.0),
                base_radius: 0.1,
                tip_radius: 0.1,
                color: YELLOW,
            }
        );
        // hip to hip cross link
        assert_eq!(
            *limbs[25],
            DrawCall::LimbSegment {
                a: Position::new(12.0, 0.0, 0.0),
                b: Position::new(16.0, 0.0, 0.0),
                base_radius: 0.1,
                tip_radius: 0.1,
                color: GREEN,
            }
        );
    }
}
