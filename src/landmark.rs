//! Body landmark samples.
//!
//! - `Landmark`: one tracked keypoint in normalized image space (origin top-left, y down).
//! - `LandmarkSample`: a complete per-frame set of landmarks. Construction rejects partial
//!   samples, so holding a `LandmarkSample` means every required index is present.
//! - `SampleSlot`: last-value-wins holder shared between a landmark source and the session.
//!
//! Samples are replaced wholesale, never mutated in place. The slot hands out `Arc`
//! snapshots so a reader never observes a half-written sample.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};

/// Number of points in a full pose-tracker frame (BlazePose topology).
pub const LANDMARK_COUNT: usize = 33;

/// Minimum visibility for a required landmark to count as "seen".
pub const MIN_VISIBILITY: f32 = 0.5;

/// Landmark indices the matcher depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LandmarkIndex {
    Nose,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
}

impl LandmarkIndex {
    /// Every index a sample must carry to be considered complete.
    pub const REQUIRED: [LandmarkIndex; 9] = [
        LandmarkIndex::Nose,
        LandmarkIndex::LeftShoulder,
        LandmarkIndex::RightShoulder,
        LandmarkIndex::LeftElbow,
        LandmarkIndex::RightElbow,
        LandmarkIndex::LeftWrist,
        LandmarkIndex::RightWrist,
        LandmarkIndex::LeftHip,
        LandmarkIndex::RightHip,
    ];

    /// Position of this landmark in the tracker's point array.
    pub const fn index(self) -> usize {
        match self {
            LandmarkIndex::Nose => 0,
            LandmarkIndex::LeftShoulder => 11,
            LandmarkIndex::RightShoulder => 12,
            LandmarkIndex::LeftElbow => 13,
            LandmarkIndex::RightElbow => 14,
            LandmarkIndex::LeftWrist => 15,
            LandmarkIndex::RightWrist => 16,
            LandmarkIndex::LeftHip => 23,
            LandmarkIndex::RightHip => 24,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            LandmarkIndex::Nose => "nose",
            LandmarkIndex::LeftShoulder => "left_shoulder",
            LandmarkIndex::RightShoulder => "right_shoulder",
            LandmarkIndex::LeftElbow => "left_elbow",
            LandmarkIndex::RightElbow => "right_elbow",
            LandmarkIndex::LeftWrist => "left_wrist",
            LandmarkIndex::RightWrist => "right_wrist",
            LandmarkIndex::LeftHip => "left_hip",
            LandmarkIndex::RightHip => "right_hip",
        }
    }
}

/// Smallest point count that covers every required index.
const MIN_POINTS: usize = LandmarkIndex::RightHip.index() + 1;

/// A single tracked keypoint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0..1 from the left edge.
    pub x: f32,
    /// Vertical position, 0..1 from the top edge.
    pub y: f32,
    /// Tracker confidence that the point is visible.
    pub visibility: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, visibility: f32) -> Self {
        Self { x, y, visibility }
    }

    /// Euclidean distance in normalized coordinate space.
    pub fn distance(&self, other: &Landmark) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f32; 3]> for Landmark {
    fn from(value: [f32; 3]) -> Self {
        Landmark::new(value[0], value[1], value[2])
    }
}

/// A complete landmark frame.
///
/// There is no public constructor that skips validation and no mutable accessor.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkSample {
    points: Vec<Landmark>,
}

impl LandmarkSample {
    /// Build a sample from raw tracker output.
    ///
    /// Returns `None` ("no body detected") when a required index is missing, when a
    /// required coordinate is not finite, or when none of the required landmarks reach
    /// `MIN_VISIBILITY`.
    pub fn from_points(points: Vec<Landmark>) -> Option<Self> {
        if points.len() < MIN_POINTS {
            return None;
        }
        let required = LandmarkIndex::REQUIRED.map(|idx| points[idx.index()]);
        if required.iter().any(|lm| !lm.is_finite()) {
            return None;
        }
        if required.iter().all(|lm| lm.visibility < MIN_VISIBILITY) {
            return None;
        }
        Some(Self { points })
    }

    /// Wrap points already known to be complete (generated in-crate).
    pub(crate) fn from_trusted(points: Vec<Landmark>) -> Self {
        debug_assert!(points.len() >= MIN_POINTS);
        Self { points }
    }

    /// Landmark at a required index. Always present by construction.
    pub fn get(&self, idx: LandmarkIndex) -> Landmark {
        self.points[idx.index()]
    }

    pub fn points(&self) -> &[Landmark] {
        &self.points
    }
}

/// Last-value-wins holder for the most recent sample.
///
/// Cloning the slot shares it; a landmark source can publish from one handle while the
/// session reads from another. `None` means the latest frame had no body in it.
#[derive(Clone, Debug, Default)]
pub struct SampleSlot {
    inner: Arc<Mutex<Option<Arc<LandmarkSample>>>>,
}

impl SampleSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held sample, dropping any unconsumed previous value.
    pub fn publish(&self, sample: Option<LandmarkSample>) {
        let next = sample.map(Arc::new);
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
    }

    /// Snapshot of the latest sample.
    pub fn latest(&self) -> Option<Arc<LandmarkSample>> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.publish(None);
    }
}
