//! MoveNet body parts and skeleton connectivity.

use crate::detect::Keypoint;
use crate::geometry::PixelPoint;

/// The 17 MoveNet keypoint slots, in model output order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum BodyPart {
    Nose = 0,
    LeftEye = 1,
    RightEye = 2,
    LeftEar = 3,
    RightEar = 4,
    LeftShoulder = 5,
    RightShoulder = 6,
    LeftElbow = 7,
    RightElbow = 8,
    LeftWrist = 9,
    RightWrist = 10,
    LeftHip = 11,
    RightHip = 12,
    LeftKnee = 13,
    RightKnee = 14,
    LeftAnkle = 15,
    RightAnkle = 16,
}

impl BodyPart {
    pub const COUNT: usize = 17;

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftEye),
            2 => Some(Self::RightEye),
            3 => Some(Self::LeftEar),
            4 => Some(Self::RightEar),
            5 => Some(Self::LeftShoulder),
            6 => Some(Self::RightShoulder),
            7 => Some(Self::LeftElbow),
            8 => Some(Self::RightElbow),
            9 => Some(Self::LeftWrist),
            10 => Some(Self::RightWrist),
            11 => Some(Self::LeftHip),
            12 => Some(Self::RightHip),
            13 => Some(Self::LeftKnee),
            14 => Some(Self::RightKnee),
            15 => Some(Self::LeftAnkle),
            16 => Some(Self::RightAnkle),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nose => "nose",
            Self::LeftEye => "leftEye",
            Self::RightEye => "rightEye",
            Self::LeftEar => "leftEar",
            Self::RightEar => "rightEar",
            Self::LeftShoulder => "leftShoulder",
            Self::RightShoulder => "rightShoulder",
            Self::LeftElbow => "leftElbow",
            Self::RightElbow => "rightElbow",
            Self::LeftWrist => "leftWrist",
            Self::RightWrist => "rightWrist",
            Self::LeftHip => "leftHip",
            Self::RightHip => "rightHip",
            Self::LeftKnee => "leftKnee",
            Self::RightKnee => "rightKnee",
            Self::LeftAnkle => "leftAnkle",
            Self::RightAnkle => "rightAnkle",
        }
    }
}

/// Named limb chains. Consecutive parts in a chain connect with a segment.
pub const CHAINS: [(&str, &[BodyPart]); 6] = [
    (
        "head",
        &[
            BodyPart::LeftEar,
            BodyPart::LeftEye,
            BodyPart::Nose,
            BodyPart::RightEye,
            BodyPart::RightEar,
        ],
    ),
    (
        "torso",
        &[
            BodyPart::LeftShoulder,
            BodyPart::RightShoulder,
            BodyPart::RightHip,
            BodyPart::LeftHip,
            BodyPart::LeftShoulder,
        ],
    ),
    (
        "leftArm",
        &[
            BodyPart::LeftShoulder,
            BodyPart::LeftElbow,
            BodyPart::LeftWrist,
        ],
    ),
    (
        "rightArm",
        &[
            BodyPart::RightShoulder,
            BodyPart::RightElbow,
            BodyPart::RightWrist,
        ],
    ),
    (
        "leftLeg",
        &[BodyPart::LeftHip, BodyPart::LeftKnee, BodyPart::LeftAnkle],
    ),
    (
        "rightLeg",
        &[
            BodyPart::RightHip,
            BodyPart::RightKnee,
            BodyPart::RightAnkle,
        ],
    ),
];

/// One drawable limb segment in pixel space.
pub type Segment = [PixelPoint; 2];

/// A named chain and its resolvable segments.
#[derive(Clone, Debug)]
pub struct ChainAnnotation {
    pub name: &'static str,
    pub segments: Vec<Segment>,
}

/// Build the annotation set for a pose's keypoints.
///
/// Every chain appears in the output, in `CHAINS` order. A segment is emitted
/// only when both endpoint parts are present in `keypoints` with scores above
/// `min_confidence`; a missing part drops only the segments that need it.
pub fn build_annotations(keypoints: &[Keypoint], min_confidence: f32) -> Vec<ChainAnnotation> {
    let find = |part: BodyPart| {
        keypoints
            .iter()
            .find(|k| k.part == part && k.score > min_confidence)
    };
    CHAINS
        .iter()
        .map(|&(name, parts)| {
            let segments = parts
                .windows(2)
                .filter_map(|pair| match (find(pair[0]), find(pair[1])) {
                    (Some(a), Some(b)) => Some([a.position, b.position]),
                    _ => None,
                })
                .collect();
            ChainAnnotation { name, segments }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::NormPoint;

    fn kpt(part: BodyPart, score: f32, x: i32, y: i32) -> Keypoint {
        Keypoint {
            part,
            score,
            position_raw: NormPoint {
                x: x as f32 / 100.0,
                y: y as f32 / 100.0,
            },
            position: PixelPoint { x, y },
        }
    }

    #[test]
    fn part_slots_cover_movenet_order() {
        assert_eq!(BodyPart::COUNT, 17);
        assert_eq!(BodyPart::from_index(0), Some(BodyPart::Nose));
        assert_eq!(BodyPart::from_index(16), Some(BodyPart::RightAnkle));
        assert_eq!(BodyPart::from_index(17), None);
        assert_eq!(BodyPart::LeftShoulder.name(), "leftShoulder");
    }

    #[test]
    fn every_chain_appears_even_when_empty() {
        let annotations = build_annotations(&[], 0.3);
        assert_eq!(annotations.len(), CHAINS.len());
        assert!(annotations.iter().all(|c| c.segments.is_empty()));
        assert_eq!(annotations[0].name, "head");
    }

    #[test]
    fn full_arm_yields_two_segments() {
        let keypoints = vec![
            kpt(BodyPart::LeftShoulder, 0.9, 10, 10),
            kpt(BodyPart::LeftElbow, 0.8, 20, 30),
            kpt(BodyPart::LeftWrist, 0.7, 25, 50),
        ];
        let annotations = build_annotations(&keypoints, 0.3);
        let arm = annotations.iter().find(|c| c.name == "leftArm").unwrap();
        assert_eq!(arm.segments.len(), 2);
        assert_eq!(arm.segments[0][0], PixelPoint { x: 10, y: 10 });
        assert_eq!(arm.segments[1][1], PixelPoint { x: 25, y: 50 });
    }

    #[test]
    fn missing_middle_part_drops_both_its_segments() {
        // elbow missing: shoulder-elbow and elbow-wrist both unresolvable
        let keypoints = vec![
            kpt(BodyPart::LeftShoulder, 0.9, 10, 10),
            kpt(BodyPart::LeftWrist, 0.7, 25, 50),
        ];
        let annotations = build_annotations(&keypoints, 0.3);
        let arm = annotations.iter().find(|c| c.name == "leftArm").unwrap();
        assert!(arm.segments.is_empty());
    }

    #[test]
    fn low_confidence_endpoint_drops_only_its_segments() {
        let keypoints = vec![
            kpt(BodyPart::LeftHip, 0.9, 10, 10),
            kpt(BodyPart::LeftKnee, 0.8, 12, 30),
            kpt(BodyPart::LeftAnkle, 0.1, 14, 50),
        ];
        let annotations = build_annotations(&keypoints, 0.3);
        let leg = annotations.iter().find(|c| c.name == "leftLeg").unwrap();
        // hip-knee survives, knee-ankle does not
        assert_eq!(leg.segments.len(), 1);
    }
}
