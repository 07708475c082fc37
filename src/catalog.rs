//! Pose catalog.
//!
//! The catalog is the only producer of pose ids. It is built once at startup, either from
//! the built-in set or from a TOML file, and is never mutated afterwards.

use anyhow::{anyhow, Context, Result};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

/// Closed set of poses the geometric matcher knows how to judge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PoseKind {
    TPose,
    VictoryV,
    HandsOnHips,
    HandsOnHead,
    RightArmUp,
    ArmsCrossed,
    /// Any id outside the known set. Judged as an automatic miss.
    Unknown,
}

impl PoseKind {
    pub const KNOWN: [PoseKind; 6] = [
        PoseKind::TPose,
        PoseKind::VictoryV,
        PoseKind::HandsOnHips,
        PoseKind::HandsOnHead,
        PoseKind::RightArmUp,
        PoseKind::ArmsCrossed,
    ];

    pub fn from_id(id: &str) -> Self {
        match id {
            "t-pose" => PoseKind::TPose,
            "victory-v" => PoseKind::VictoryV,
            "hands-on-hips" => PoseKind::HandsOnHips,
            "hands-on-head" => PoseKind::HandsOnHead,
            "right-arm-up" => PoseKind::RightArmUp,
            "arms-crossed" => PoseKind::ArmsCrossed,
            _ => PoseKind::Unknown,
        }
    }

    /// Canonical id, or `None` for `Unknown`.
    pub fn id(self) -> Option<&'static str> {
        match self {
            PoseKind::TPose => Some("t-pose"),
            PoseKind::VictoryV => Some("victory-v"),
            PoseKind::HandsOnHips => Some("hands-on-hips"),
            PoseKind::HandsOnHead => Some("hands-on-head"),
            PoseKind::RightArmUp => Some("right-arm-up"),
            PoseKind::ArmsCrossed => Some("arms-crossed"),
            PoseKind::Unknown => None,
        }
    }
}

/// Immutable catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoseDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl PoseDefinition {
    pub fn new(id: &str, name: &str, description: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        }
    }

    pub fn kind(&self) -> PoseKind {
        PoseKind::from_id(&self.id)
    }
}

/// Pose ids are short lowercase slugs: "t-pose", "hands-on-hips".
pub fn validate_pose_id(id: &str) -> Result<()> {
    static POSE_ID_RE: OnceLock<regex::Regex> = OnceLock::new();
    let re = POSE_ID_RE.get_or_init(|| {
        regex::Regex::new(r"^[a-z0-9][a-z0-9-]{0,63}$").expect("static pose id pattern")
    });

    if !re.is_match(id) {
        return Err(anyhow!(
            "pose id {:?} must match ^[a-z0-9][a-z0-9-]{{0,63}}$",
            id
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "pose")]
    poses: Vec<PoseDefinition>,
}

/// Static set of target poses.
#[derive(Clone, Debug)]
pub struct PoseCatalog {
    poses: Vec<PoseDefinition>,
}

impl PoseCatalog {
    /// Validate and wrap a list of definitions.
    pub fn new(poses: Vec<PoseDefinition>) -> Result<Self> {
        if poses.is_empty() {
            return Err(anyhow!("pose catalog must contain at least one pose"));
        }
        let mut seen = HashSet::new();
        for pose in &poses {
            validate_pose_id(&pose.id)?;
            if !seen.insert(pose.id.as_str()) {
                return Err(anyhow!("duplicate pose id {:?} in catalog", pose.id));
            }
            if pose.kind() == PoseKind::Unknown {
                log::warn!(
                    "pose {:?} has no geometric rule; it will always be judged a miss",
                    pose.id
                );
            }
        }
        Ok(Self { poses })
    }

    /// The six poses the matcher understands.
    pub fn builtin() -> Self {
        Self {
            poses: vec![
                PoseDefinition::new(
                    "t-pose",
                    "T-Pose",
                    "Stretch both arms straight out to the sides.",
                    "✈️",
                ),
                PoseDefinition::new(
                    "victory-v",
                    "Victory",
                    "Throw both hands up high in a V.",
                    "🙌",
                ),
                PoseDefinition::new(
                    "hands-on-hips",
                    "Superhero",
                    "Plant both hands on your hips.",
                    "🦸",
                ),
                PoseDefinition::new(
                    "hands-on-head",
                    "Mind Blown",
                    "Put both hands on top of your head.",
                    "🤯",
                ),
                PoseDefinition::new(
                    "right-arm-up",
                    "Reach",
                    "Raise only your right hand to the sky.",
                    "🙋",
                ),
                PoseDefinition::new(
                    "arms-crossed",
                    "Power Pose",
                    "Cross your arms over your chest.",
                    "💪",
                ),
            ],
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(raw).context("invalid pose catalog")?;
        Self::new(file.poses)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pose catalog {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("loading {}", path.display()))
    }

    pub fn get(&self, id: &str) -> Option<&PoseDefinition> {
        self.poses.iter().find(|pose| pose.id == id)
    }

    pub fn by_index(&self, index: usize) -> Option<&PoseDefinition> {
        self.poses.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoseDefinition> {
        self.poses.iter()
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Uniform draw over the catalog. Repeats across calls are allowed.
    pub fn choose_index(&self, rng: &mut dyn RngCore) -> usize {
        rng.gen_range(0..self.poses.len())
    }
}

impl Default for PoseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
