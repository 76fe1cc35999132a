use cgmath::Vector3;
use std::ops::Index as IndexOp;

use crate::error::PoseError;

/////////////////////////////////////////////////////////////////////////////////////////////////

pub type Index = usize;
pub type Position = Vector3<f64>;
/// Linear RGB, each channel in `0.0..=1.0`.
pub type Rgb = [f32; 3];

/// Number of joints tracked by the sensor. Every pose has exactly this many.
pub const JOINT_COUNT: usize = 25;
/// Number of coordinates that make up one pose in a csv row.
pub const VALUES_PER_POSE: usize = JOINT_COUNT * 3;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Anatomical landmark of a joint. The discriminant is the joint's index inside a [`Pose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JointType {
    SpineBase = 0,
    SpineMid = 1,
    Neck = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
    SpineShoulder = 20,
    HandTipLeft = 21,
    ThumbLeft = 22,
    HandTipRight = 23,
    ThumbRight = 24,
}

impl JointType {
    pub const ALL: [JointType; JOINT_COUNT] = [
        JointType::SpineBase,
        JointType::SpineMid,
        JointType::Neck,
        JointType::Head,
        JointType::ShoulderLeft,
        JointType::ElbowLeft,
        JointType::WristLeft,
        JointType::HandLeft,
        JointType::ShoulderRight,
        JointType::ElbowRight,
        JointType::WristRight,
        JointType::HandRight,
        JointType::HipLeft,
        JointType::KneeLeft,
        JointType::AnkleLeft,
        JointType::FootLeft,
        JointType::HipRight,
        JointType::KneeRight,
        JointType::AnkleRight,
        JointType::FootRight,
        JointType::SpineShoulder,
        JointType::HandTipLeft,
        JointType::ThumbLeft,
        JointType::HandTipRight,
        JointType::ThumbRight,
    ];

    /// Panics if `index >= JOINT_COUNT`. Joint indices are load-bearing for every topology lookup,
    /// so an out of range index is a bug in the caller.
    pub fn from_index(index: Index) -> JointType {
        match Self::ALL.get(index) {
            Some(joint_type) => *joint_type,
            None => panic!("Joint index {} is out of range (0..{})", index, JOINT_COUNT),
        }
    }

    pub fn index(self) -> Index {
        self as Index
    }

    pub fn name(self) -> &'static str {
        match self {
            JointType::SpineBase => "SpineBase",
            JointType::SpineMid => "SpineMid",
            JointType::Neck => "Neck",
            JointType::Head => "Head",
            JointType::ShoulderLeft => "ShoulderLeft",
            JointType::ElbowLeft => "ElbowLeft",
            JointType::WristLeft => "WristLeft",
            JointType::HandLeft => "HandLeft",
            JointType::ShoulderRight => "ShoulderRight",
            JointType::ElbowRight => "ElbowRight",
            JointType::WristRight => "WristRight",
            JointType::HandRight => "HandRight",
            JointType::HipLeft => "HipLeft",
            JointType::KneeLeft => "KneeLeft",
            JointType::AnkleLeft => "AnkleLeft",
            JointType::FootLeft => "FootLeft",
            JointType::HipRight => "HipRight",
            JointType::KneeRight => "KneeRight",
            JointType::AnkleRight => "AnkleRight",
            JointType::FootRight => "FootRight",
            JointType::SpineShoulder => "SpineShoulder",
            JointType::HandTipLeft => "HandTipLeft",
            JointType::ThumbLeft => "ThumbLeft",
            JointType::HandTipRight => "HandTipRight",
            JointType::ThumbRight => "ThumbRight",
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joint {
    pub position: Position,
}

impl Joint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Joint {
            position: Position::new(x, y, z),
        }
    }

    /// Position moved into scene space (the skeleton is drawn away from the origin so it stands on the grid).
    pub fn scene_position(&self, offset: Position) -> Position {
        self.position + offset
    }
}

impl From<Position> for Joint {
    fn from(position: Position) -> Self {
        Joint { position }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// One skeleton snapshot, captured or interpolated.
///
/// The joint array is indexed by [`JointType`], so index `i` names the same landmark in every pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Pose {
    joints: [Joint; JOINT_COUNT],
}

impl Pose {
    pub fn new(joints: [Joint; JOINT_COUNT]) -> Self {
        Pose { joints }
    }

    /// Pose with every joint at the same position. Used when no capture is available.
    pub fn uniform(position: Position) -> Self {
        Pose {
            joints: [Joint::from(position); JOINT_COUNT],
        }
    }

    /// Build a pose from joints in index order. Anything but exactly [`JOINT_COUNT`] joints is rejected.
    pub fn from_joints(joints: Vec<Joint>) -> Result<Self, PoseError> {
        let found = joints.len();
        let joints: [Joint; JOINT_COUNT] = joints
            .try_into()
            .map_err(|_| PoseError::JointCount { found })?;
        Ok(Pose { joints })
    }

    pub fn joints(&self) -> &[Joint; JOINT_COUNT] {
        &self.joints
    }

    pub fn joint(&self, joint_type: JointType) -> &Joint {
        &self.joints[joint_type.index()]
    }

    pub fn position(&self, joint_type: JointType) -> Position {
        self.joints[joint_type.index()].position
    }

    pub fn iter(&self) -> impl Iterator<Item = (JointType, &Joint)> {
        JointType::ALL.into_iter().zip(self.joints.iter())
    }
}

impl IndexOp<JointType> for Pose {
    type Output = Joint;

    fn index(&self, joint_type: JointType) -> &Joint {
        self.joint(joint_type)
    }
}

impl IndexOp<Index> for Pose {
    type Output = Joint;

    fn index(&self, index: Index) -> &Joint {
        &self.joints[index]
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joint_type_indices_match_their_position_in_all() {
        for (i, joint_type) in JointType::ALL.iter().enumerate() {
            assert_eq!(joint_type.index(), i);
            assert_eq!(JointType::from_index(i), *joint_type);
        }
        assert_eq!(JointType::Head.index(), 3);
        assert_eq!(JointType::Neck.index(), 2);
        assert_eq!(JointType::SpineBase.index(), 0);
    }

    #[test]
    #[should_panic]
    fn joint_type_from_out_of_range_index_panics() {
        JointType::from_index(JOINT_COUNT);
    }

    #[test]
    fn from_joints_requires_exactly_25() {
        let short = vec![Joint::new(0.0, 0.0, 0.0); 24];
        assert_eq!(
            Pose::from_joints(short).unwrap_err(),
            PoseError::JointCount { found: 24 }
        );

        let long = vec![Joint::new(0.0, 0.0, 0.0); 26];
        assert!(Pose::from_joints(long).is_err());

        let joints: Vec<Joint> = (0..JOINT_COUNT).map(|i| Joint::new(i as f64, 0.0, 0.0)).collect();
        let pose = Pose::from_joints(joints).unwrap();
        assert_eq!(pose[JointType::Head].position.x, 3.0);
        assert_eq!(pose[24].position.x, 24.0);
    }

    #[test]
    fn scene_position_adds_offset() {
        let joint = Joint::new(1.0, -1.0, 0.5);
        let moved = joint.scene_position(Position::new(6.0, 2.5, 2.0));
        assert_eq!(moved, Position::new(7.0, 1.5, 2.5));
        // the joint itself is untouched
        assert_eq!(joint.position, Position::new(1.0, -1.0, 0.5));
    }
}
