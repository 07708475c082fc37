//! pose_check - judge recorded landmark frames against a pose
//!
//! Prints one JSON line per judged frame:
//! `{"frame": 3, "pose": "t-pose", "result": {"matched": true, "score": 95, ...}}`

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use pose_wall::ingest::file::parse_recording;
use pose_wall::{evaluate, LandmarkSample, MatchResult, PoseCatalog, PoseDefinition};

#[derive(Parser, Debug)]
#[command(name = "pose_check", about = "Judge recorded landmark frames against a pose")]
struct Args {
    /// JSON-lines recording (one `null` or `[[x, y, visibility], ...]` per line).
    #[arg(long, value_name = "PATH")]
    sample: PathBuf,
    /// Pose id to judge against. Every catalog pose is tried when omitted.
    #[arg(long)]
    pose: Option<String>,
    /// 1-based frame to judge. Every frame is judged when omitted.
    #[arg(long)]
    frame: Option<usize>,
    /// TOML pose catalog (defaults to POSEWALL_CATALOG, then the built-in catalog).
    #[arg(long, env = "POSEWALL_CATALOG", value_name = "PATH")]
    catalog: Option<PathBuf>,
}

#[derive(Serialize)]
struct Verdict<'a> {
    frame: usize,
    pose: &'a str,
    result: MatchResult,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let catalog = match &args.catalog {
        Some(path) => PoseCatalog::load(path)?,
        None => PoseCatalog::builtin(),
    };

    let raw = std::fs::read_to_string(&args.sample)
        .with_context(|| format!("failed to read recording {}", args.sample.display()))?;
    let frames = parse_recording(&raw)
        .with_context(|| format!("invalid recording {}", args.sample.display()))?;
    if frames.is_empty() {
        return Err(anyhow!("recording {} has no frames", args.sample.display()));
    }

    let targets = resolve_targets(&catalog, args.pose.as_deref());
    let selected: Vec<(usize, &Option<LandmarkSample>)> = match args.frame {
        Some(0) => return Err(anyhow!("frames are numbered from 1")),
        Some(n) => {
            let frame = frames.get(n - 1).ok_or_else(|| {
                anyhow!("frame {} out of range (recording has {})", n, frames.len())
            })?;
            vec![(n, frame)]
        }
        None => frames.iter().enumerate().map(|(i, f)| (i + 1, f)).collect(),
    };

    for (number, frame) in selected {
        for target in &targets {
            let verdict = Verdict {
                frame: number,
                pose: &target.id,
                result: evaluate(frame.as_ref(), target),
            };
            println!("{}", serde_json::to_string(&verdict)?);
        }
    }
    Ok(())
}

fn resolve_targets(catalog: &PoseCatalog, pose: Option<&str>) -> Vec<PoseDefinition> {
    match pose {
        None => catalog.iter().cloned().collect(),
        Some(id) => match catalog.get(id) {
            Some(def) => vec![def.clone()],
            None => {
                log::warn!("pose {:?} is not in the catalog; it can never match", id);
                vec![PoseDefinition::new(id, id, "", "")]
            }
        },
    }
}
