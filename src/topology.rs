//! Fixed skeleton graph of the Kinect v2 body and the style of every joint and limb drawn from it.

use crate::types::JointType::{self, *};
use crate::types::{Rgb, JOINT_COUNT};
use lazy_static::lazy_static;

pub const BLUE: Rgb = [0.1, 0.1, 0.7];
pub const GREEN: Rgb = [0.0, 1.0, 0.0];
pub const YELLOW: Rgb = [1.0, 1.0, 0.0];
pub const RED: Rgb = [1.0, 0.0, 0.0];

/// Limbs as `(parent, child)` pairs. Together they form a tree rooted at [`JointType::SpineBase`].
pub const SKELETON_EDGES: [(JointType, JointType); 24] = [
    (Head, Neck),
    (Neck, SpineShoulder),
    // left arm
    (SpineShoulder, ShoulderLeft),
    (ShoulderLeft, ElbowLeft),
    (ElbowLeft, WristLeft),
    (WristLeft, ThumbLeft),
    (WristLeft, HandLeft),
    (HandLeft, HandTipLeft),
    // right arm
    (SpineShoulder, ShoulderRight),
    (ShoulderRight, ElbowRight),
    (ElbowRight, WristRight),
    (WristRight, ThumbRight),
    (WristRight, HandRight),
    (HandRight, HandTipRight),
    // torso
    (SpineShoulder, SpineMid),
    (SpineMid, SpineBase),
    // left leg
    (SpineBase, HipLeft),
    (HipLeft, KneeLeft),
    (KneeLeft, AnkleLeft),
    (AnkleLeft, FootLeft),
    // right leg
    (SpineBase, HipRight),
    (HipRight, KneeRight),
    (KneeRight, AnkleRight),
    (AnkleRight, FootRight),
];

/// Segments across the body, drawn on top of the tree to keep the torso from looking hollow.
pub const CROSS_LINKS: [(JointType, JointType); 2] = [(ShoulderLeft, ShoulderRight), (HipLeft, HipRight)];

/////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointCategory {
    Head,
    /// Wrists, hands, hand tips and thumbs.
    Extremity,
    /// Spine base and spine mid.
    Core,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointStyle {
    pub category: JointCategory,
    pub radius: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LimbStyle {
    pub base_radius: f32,
    pub tip_radius: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limb {
    pub from: JointType,
    pub to: JointType,
    pub style: LimbStyle,
}

/////////////////////////////////////////////////////////////////////////////////////////////////

pub fn edges() -> &'static [(JointType, JointType)] {
    &SKELETON_EDGES
}

pub fn cross_links() -> &'static [(JointType, JointType)] {
    &CROSS_LINKS
}

pub fn joint_category(joint: JointType) -> JointCategory {
    match joint {
        Head => JointCategory::Head,
        WristLeft | WristRight | HandLeft | HandRight | HandTipLeft | HandTipRight | ThumbLeft
        | ThumbRight => JointCategory::Extremity,
        SpineBase | SpineMid => JointCategory::Core,
        _ => JointCategory::Default,
    }
}

pub fn joint_style(joint: JointType) -> JointStyle {
    let category = joint_category(joint);
    let (radius, color) = match category {
        JointCategory::Head => (0.3, BLUE),
        JointCategory::Extremity => (0.075, BLUE),
        JointCategory::Core => (0.1, GREEN),
        JointCategory::Default => (0.15, BLUE),
    };
    JointStyle {
        category,
        radius,
        color,
    }
}

/// Radii taper from `parent` to `child` and depend on the child joint only.
pub fn limb_style(parent: JointType, child: JointType) -> LimbStyle {
    if is_cross_link(parent, child) {
        return LimbStyle {
            base_radius: 0.1,
            tip_radius: 0.1,
            color: GREEN,
        };
    }

    let (base_radius, tip_radius) = match child {
        WristLeft | WristRight => (0.05, 0.1),
        HandLeft | HandRight | HandTipLeft | HandTipRight | ThumbLeft | ThumbRight => (0.05, 0.05),
        KneeLeft | KneeRight => (0.115, 0.15),
        AnkleLeft | AnkleRight => (0.09, 0.115),
        _ => (0.1, 0.1),
    };
    let color = match child {
        ShoulderLeft | ShoulderRight | HipLeft | HipRight | SpineMid | SpineBase => GREEN,
        _ => YELLOW,
    };
    LimbStyle {
        base_radius,
        tip_radius,
        color,
    }
}

fn is_cross_link(a: JointType, b: JointType) -> bool {
    CROSS_LINKS
        .iter()
        .any(|&(from, to)| (from, to) == (a, b) || (from, to) == (b, a))
}

/// Every drawn segment: the tree edges followed by the cross links.
pub fn limbs() -> impl Iterator<Item = Limb> {
    edges()
        .iter()
        .chain(cross_links())
        .map(|&(from, to)| Limb {
            from,
            to,
            style: limb_style(from, to),
        })
}

/// Parent of every joint when the edge tree is hung from the spine base. `None` for the root.
pub fn parents() -> [Option<JointType>; JOINT_COUNT] {
    let mut parents = [None; JOINT_COUNT];
    let mut visited = [false; JOINT_COUNT];
    let mut stack = vec![SpineBase];
    visited[SpineBase.index()] = true;

    while let Some(joint) = stack.pop() {
        for &(a, b) in SKELETON_EDGES.iter() {
            let other = if a == joint {
                b
            } else if b == joint {
                a
            } else {
                continue;
            };
            if !visited[other.index()] {
                visited[other.index()] = true;
                parents[other.index()] = Some(joint);
                stack.push(other);
            }
        }
    }
    parents
}

lazy_static! {
    static ref KINEMATIC_CHAINS: Vec<Vec<JointType>> = __build_kinematic_chains();
}

/// The skeleton split into chains of joints that can each be drawn as one line strip.
/// A chain starts at the root or at a branching joint and runs until the next branch or leaf.
pub fn kinematic_chains() -> &'static [Vec<JointType>] {
    &KINEMATIC_CHAINS
}

fn __build_kinematic_chains() -> Vec<Vec<JointType>> {
    let parents = parents();
    let mut children: Vec<Vec<JointType>> = vec![Vec::new(); JOINT_COUNT];
    for joint in JointType::ALL {
        if let Some(parent) = parents[joint.index()] {
            children[parent.index()].push(joint);
        }
    }

    let mut chains = Vec::new();
    let mut starts: Vec<(JointType, JointType)> = children[SpineBase.index()]
        .iter()
        .rev()
        .map(|&child| (SpineBase, child))
        .collect();

    while let Some((from, mut joint)) = starts.pop() {
        let mut chain = vec![from, joint];
        loop {
            let next: &Vec<JointType> = &children[joint.index()];
            match next.len() {
                0 => break,
                1 => {
                    joint = next[0];
                    chain.push(joint);
                }
                _ => {
                    for &child in next.iter().rev() {
                        starts.push((joint, child));
                    }
                    break;
                }
            }
        }
        chains.push(chain);
    }
    chains
}

/////////////////////////////////////////////////////////////////////////////////////////////////
/////////////////////////////////////////////////////////////////////////////////////////////////
