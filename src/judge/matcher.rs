//! Geometric pose matcher.
//!
//! One predicate per `PoseKind`. Thresholds are in normalized image units and compare
//! `x`/`y` only; visibility was already consumed by `LandmarkSample::from_points`.
//!
//! "Above" means a smaller y, since y grows downward. "At least N above" includes the
//! boundary itself.

use crate::catalog::{PoseDefinition, PoseKind};
use crate::landmark::{LandmarkIndex as L, LandmarkSample};

use super::result::MatchResult;

const T_POSE_WRIST_SHOULDER_DY: f32 = 0.15;
const T_POSE_WRIST_SPREAD: f32 = 0.4;
const VICTORY_WRIST_RAISE: f32 = 0.2;
const VICTORY_WRIST_SPREAD: f32 = 0.3;
const HIPS_WRIST_RADIUS: f32 = 0.2;
const HEAD_WRIST_RADIUS: f32 = 0.25;
const RIGHT_ARM_RAISE: f32 = 0.3;
const CROSSED_WRIST_SHOULDER_DY: f32 = 0.3;

/// Score and feedback attached to a known pose.
struct Scoring {
    score: u32,
    hit: &'static str,
    miss: &'static str,
}

fn scoring(kind: PoseKind) -> Option<Scoring> {
    let scoring = match kind {
        PoseKind::TPose => Scoring {
            score: 95,
            hit: "Perfect T-Shape!",
            miss: "Extend your arms fully to the sides.",
        },
        PoseKind::VictoryV => Scoring {
            score: 90,
            hit: "Victory attained!",
            miss: "Raise your hands high in a V!",
        },
        PoseKind::HandsOnHips => Scoring {
            score: 85,
            hit: "Looking heroic!",
            miss: "Put your hands on your hips.",
        },
        PoseKind::HandsOnHead => Scoring {
            score: 88,
            hit: "Mind status: Blown!",
            miss: "Hands on your head!",
        },
        PoseKind::RightArmUp => Scoring {
            score: 92,
            hit: "Reaching the stars!",
            miss: "Raise only your right hand.",
        },
        PoseKind::ArmsCrossed => Scoring {
            score: 80,
            hit: "Power pose active!",
            miss: "Cross your arms over your chest.",
        },
        PoseKind::Unknown => return None,
    };
    Some(scoring)
}

/// Judge `sample` against `target`.
///
/// Pure: no state, no I/O, constant time. An absent sample is a miss with
/// "no body detected"; an id with no rule is a miss with "Try harder!".
pub fn evaluate(sample: Option<&LandmarkSample>, target: &PoseDefinition) -> MatchResult {
    let Some(sample) = sample else {
        return MatchResult::no_body();
    };

    let kind = target.kind();
    let matched = match kind {
        PoseKind::TPose => t_pose(sample),
        PoseKind::VictoryV => victory_v(sample),
        PoseKind::HandsOnHips => hands_on_hips(sample),
        PoseKind::HandsOnHead => hands_on_head(sample),
        PoseKind::RightArmUp => right_arm_up(sample),
        PoseKind::ArmsCrossed => arms_crossed(sample),
        PoseKind::Unknown => return MatchResult::unknown_pose(),
    };

    match scoring(kind) {
        Some(s) if matched => MatchResult::hit(s.score, s.hit),
        Some(s) => MatchResult::miss(s.miss),
        None => MatchResult::unknown_pose(),
    }
}

fn wrist_spread(s: &LandmarkSample) -> f32 {
    (s.get(L::LeftWrist).x - s.get(L::RightWrist).x).abs()
}

fn t_pose(s: &LandmarkSample) -> bool {
    let left_level =
        (s.get(L::LeftWrist).y - s.get(L::LeftShoulder).y).abs() < T_POSE_WRIST_SHOULDER_DY;
    let right_level =
        (s.get(L::RightWrist).y - s.get(L::RightShoulder).y).abs() < T_POSE_WRIST_SHOULDER_DY;
    left_level && right_level && wrist_spread(s) > T_POSE_WRIST_SPREAD
}

fn victory_v(s: &LandmarkSample) -> bool {
    let left_up = s.get(L::LeftWrist).y <= s.get(L::LeftShoulder).y - VICTORY_WRIST_RAISE;
    let right_up = s.get(L::RightWrist).y <= s.get(L::RightShoulder).y - VICTORY_WRIST_RAISE;
    left_up && right_up && wrist_spread(s) > VICTORY_WRIST_SPREAD
}

fn hands_on_hips(s: &LandmarkSample) -> bool {
    s.get(L::LeftWrist).distance(&s.get(L::LeftHip)) < HIPS_WRIST_RADIUS
        && s.get(L::RightWrist).distance(&s.get(L::RightHip)) < HIPS_WRIST_RADIUS
}

fn hands_on_head(s: &LandmarkSample) -> bool {
    let nose = s.get(L::Nose);
    s.get(L::LeftWrist).distance(&nose) < HEAD_WRIST_RADIUS
        && s.get(L::RightWrist).distance(&nose) < HEAD_WRIST_RADIUS
        && s.get(L::LeftWrist).y < s.get(L::LeftShoulder).y
}

fn right_arm_up(s: &LandmarkSample) -> bool {
    s.get(L::RightWrist).y <= s.get(L::RightShoulder).y - RIGHT_ARM_RAISE
        && s.get(L::LeftWrist).y >= s.get(L::LeftShoulder).y
}

// Literal comparison: the left wrist sits to the right of the right wrist. No mirroring
// correction is applied here.
fn arms_crossed(s: &LandmarkSample) -> bool {
    s.get(L::LeftWrist).x > s.get(L::RightWrist).x
        && (s.get(L::LeftWrist).y - s.get(L::LeftShoulder).y).abs() < CROSSED_WRIST_SHOULDER_DY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PoseCatalog;
    use crate::ingest::synthetic::{canonical_sample, idle_sample};
    use crate::landmark::{Landmark, LANDMARK_COUNT};

    fn pose(id: &str) -> PoseDefinition {
        PoseDefinition::new(id, id, "", "")
    }

    fn sample_with(points: &[(L, f32, f32)]) -> LandmarkSample {
        let mut raw = vec![Landmark::new(0.5, 0.5, 1.0); LANDMARK_COUNT];
        for &(idx, x, y) in points {
            raw[idx.index()] = Landmark::new(x, y, 1.0);
        }
        LandmarkSample::from_points(raw).expect("complete sample")
    }

    fn t_pose_sample(left_wrist_y: f32) -> LandmarkSample {
        sample_with(&[
            (L::LeftShoulder, 0.35, 0.52),
            (L::RightShoulder, 0.65, 0.51),
            (L::LeftWrist, 0.10, left_wrist_y),
            (L::RightWrist, 0.90, 0.49),
        ])
    }

    #[test]
    fn t_pose_reference_sample_matches() {
        let result = evaluate(Some(&t_pose_sample(0.50)), &pose("t-pose"));
        assert!(result.matched);
        assert_eq!(result.score, 95);
        assert_eq!(result.feedback, "Perfect T-Shape!");
    }

    #[test]
    fn t_pose_with_dropped_left_wrist_misses() {
        let result = evaluate(Some(&t_pose_sample(0.82)), &pose("t-pose"));
        assert!(!result.matched);
        assert_eq!(result.score, 0);
        assert_eq!(result.feedback, "Extend your arms fully to the sides.");
    }

    #[test]
    fn t_pose_needs_wide_spread() {
        let narrow = sample_with(&[
            (L::LeftShoulder, 0.40, 0.50),
            (L::RightShoulder, 0.60, 0.50),
            (L::LeftWrist, 0.35, 0.50),
            (L::RightWrist, 0.65, 0.50),
        ]);
        assert!(!evaluate(Some(&narrow), &pose("t-pose")).matched);
    }

    #[test]
    fn absent_sample_is_no_body_for_every_pose() {
        for target in PoseCatalog::builtin().iter() {
            let result = evaluate(None, target);
            assert_eq!(result, MatchResult::no_body());
        }
        assert_eq!(evaluate(None, &pose("unknown-pose")), MatchResult::no_body());
    }

    #[test]
    fn unknown_pose_degrades_to_miss() {
        let result = evaluate(Some(&t_pose_sample(0.50)), &pose("unknown-pose"));
        assert_eq!(
            result,
            MatchResult {
                matched: false,
                score: 0,
                feedback: "Try harder!".to_string(),
            }
        );
    }

    #[test]
    fn canonical_samples_match_only_their_own_pose() {
        let catalog = PoseCatalog::builtin();
        for kind in PoseKind::KNOWN {
            let sample = canonical_sample(kind);
            for target in catalog.iter() {
                let result = evaluate(Some(&sample), target);
                assert_eq!(
                    result.matched,
                    target.kind() == kind,
                    "sample {:?} judged against {}",
                    kind,
                    target.id
                );
            }
        }
    }

    #[test]
    fn idle_sample_matches_nothing() {
        let sample = idle_sample();
        for target in PoseCatalog::builtin().iter() {
            let result = evaluate(Some(&sample), target);
            assert!(!result.matched, "idle matched {}", target.id);
            assert_eq!(result.score, 0);
        }
    }

    #[test]
    fn victory_requires_both_wrists_raised() {
        let one_hand = sample_with(&[
            (L::LeftShoulder, 0.40, 0.40),
            (L::RightShoulder, 0.60, 0.40),
            (L::LeftWrist, 0.20, 0.10),
            (L::RightWrist, 0.80, 0.30),
        ]);
        let result = evaluate(Some(&one_hand), &pose("victory-v"));
        assert!(!result.matched);
        assert_eq!(result.feedback, "Raise your hands high in a V!");
    }

    #[test]
    fn right_arm_up_rejects_raised_left_wrist() {
        let both_up = sample_with(&[
            (L::LeftShoulder, 0.40, 0.40),
            (L::RightShoulder, 0.60, 0.40),
            (L::LeftWrist, 0.40, 0.30),
            (L::RightWrist, 0.60, 0.05),
        ]);
        assert!(!evaluate(Some(&both_up), &pose("right-arm-up")).matched);

        let left_level = sample_with(&[
            (L::LeftShoulder, 0.40, 0.40),
            (L::RightShoulder, 0.60, 0.40),
            (L::LeftWrist, 0.40, 0.40),
            (L::RightWrist, 0.60, 0.05),
        ]);
        let result = evaluate(Some(&left_level), &pose("right-arm-up"));
        assert!(result.matched);
        assert_eq!(result.score, 92);
    }

    #[test]
    fn arms_crossed_uses_literal_left_right_comparison() {
        let crossed = sample_with(&[
            (L::LeftShoulder, 0.40, 0.40),
            (L::RightShoulder, 0.60, 0.40),
            (L::LeftWrist, 0.60, 0.50),
            (L::RightWrist, 0.40, 0.50),
        ]);
        assert!(evaluate(Some(&crossed), &pose("arms-crossed")).matched);

        let open = sample_with(&[
            (L::LeftShoulder, 0.40, 0.40),
            (L::RightShoulder, 0.60, 0.40),
            (L::LeftWrist, 0.40, 0.50),
            (L::RightWrist, 0.60, 0.50),
        ]);
        let result = evaluate(Some(&open), &pose("arms-crossed"));
        assert!(!result.matched);
        assert_eq!(result.feedback, "Cross your arms over your chest.");
    }

    #[test]
    fn hands_on_head_requires_left_wrist_above_shoulder() {
        // Nose sits low (head bowed), both wrists near it but below the shoulder line.
        let bowed = sample_with(&[
            (L::Nose, 0.50, 0.45),
            (L::LeftShoulder, 0.40, 0.40),
            (L::RightShoulder, 0.60, 0.40),
            (L::LeftWrist, 0.45, 0.50),
            (L::RightWrist, 0.55, 0.50),
        ]);
        assert!(!evaluate(Some(&bowed), &pose("hands-on-head")).matched);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let sample = canonical_sample(PoseKind::HandsOnHips);
        let target = pose("hands-on-hips");
        let first = evaluate(Some(&sample), &target);
        for _ in 0..10 {
            assert_eq!(evaluate(Some(&sample), &target), first);
        }
        assert_eq!(first.score, 85);
    }

    #[test]
    fn victory_wrists_exactly_at_the_raise_threshold_match() {
        let boundary = sample_with(&[
            (L::LeftShoulder, 0.40, 0.50),
            (L::RightShoulder, 0.60, 0.50),
            (L::LeftWrist, 0.10, 0.50 - VICTORY_WRIST_RAISE),
            (L::RightWrist, 0.90, 0.50 - VICTORY_WRIST_RAISE),
        ]);
        let result = evaluate(Some(&boundary), &pose("victory-v"));
        assert!(result.matched);
        assert_eq!(result.score, 90);
        assert_eq!(result.feedback, "Victory attained!");
    }

    #[test]
    fn right_wrist_exactly_at_the_raise_threshold_matches() {
        let boundary = sample_with(&[
            (L::LeftShoulder, 0.40, 0.50),
            (L::RightShoulder, 0.60, 0.50),
            (L::LeftWrist, 0.40, 0.70),
            (L::RightWrist, 0.60, 0.50 - RIGHT_ARM_RAISE),
        ]);
        let result = evaluate(Some(&boundary), &pose("right-arm-up"));
        assert!(result.matched);
        assert_eq!(result.score, 92);
    }

    #[test]
    fn hands_on_hips_misses_when_one_wrist_drifts_off_the_hip() {
        let hips = [(L::LeftHip, 0.44, 0.65), (L::RightHip, 0.56, 0.65)];
        let near = sample_with(&[
            hips[0],
            hips[1],
            (L::LeftWrist, 0.44, 0.65),
            (L::RightWrist, 0.71, 0.65),
        ]);
        assert!(evaluate(Some(&near), &pose("hands-on-hips")).matched);

        let drifted = sample_with(&[
            hips[0],
            hips[1],
            (L::LeftWrist, 0.44, 0.65),
            (L::RightWrist, 0.80, 0.65),
        ]);
        let result = evaluate(Some(&drifted), &pose("hands-on-hips"));
        assert!(!result.matched);
        assert_eq!(result.score, 0);
        assert_eq!(result.feedback, "Put your hands on your hips.");
    }

    #[test]
    fn hands_on_head_misses_when_one_wrist_is_far_from_the_nose() {
        let one_hand = sample_with(&[
            (L::Nose, 0.50, 0.20),
            (L::LeftShoulder, 0.40, 0.40),
            (L::RightShoulder, 0.60, 0.40),
            (L::LeftWrist, 0.45, 0.15),
            (L::RightWrist, 0.90, 0.15),
        ]);
        let result = evaluate(Some(&one_hand), &pose("hands-on-head"));
        assert!(!result.matched);
        assert_eq!(result.score, 0);
        assert_eq!(result.feedback, "Hands on your head!");
    }
}
