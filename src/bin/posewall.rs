//! posewall - play Pose Wall against a landmark source
//!
//! This binary:
//! 1. Loads the game configuration (POSEWALL_CONFIG + env overrides)
//! 2. Opens a landmark source (stub:// script or a JSON-lines recording)
//! 3. Feeds one capture per clock tick into the session
//! 4. Auto-continues after every verdict until game over
//! 5. Prints a JSON summary of every game on stdout

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::Serialize;
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pose_wall::{
    open_source, Action, Capture, GameConfig, GameSession, LandmarkSource, Phase, RoundRecord,
};

#[path = "../ui.rs"]
mod ui;

#[derive(Parser, Debug)]
#[command(name = "posewall", about = "Match the pose before the wall arrives")]
struct Args {
    /// Landmark source: stub://<pose,...>, file://<path> or a local .jsonl recording.
    #[arg(
        long,
        default_value = "stub://t-pose,idle,victory-v,hands-on-hips,none",
        value_name = "URI"
    )]
    source: String,
    /// Frames per script step for stub:// sources.
    #[arg(long, default_value_t = 40)]
    frames_per_step: u32,
    /// Seed for pose selection (overrides POSEWALL_SEED).
    #[arg(long)]
    seed: Option<u64>,
    /// Number of games to play before exiting.
    #[arg(long, default_value_t = 1)]
    games: u32,
    /// Sleep one tick per frame instead of running as fast as possible.
    #[arg(long)]
    realtime: bool,
    /// Judge early once this much of the round has elapsed.
    #[arg(long, value_name = "MS")]
    force_judge_after_ms: Option<u64>,
    /// Stop a game after this many rounds (a perfect source never loses).
    #[arg(long, default_value_t = 50)]
    max_rounds: usize,
    /// UI mode for stderr progress (auto|plain|pretty)
    #[arg(long, default_value = "auto", value_name = "MODE")]
    ui: String,
}

#[derive(Serialize)]
struct GameSummary<'a> {
    game: u32,
    completed: bool,
    final_score: u64,
    lives_left: u32,
    rounds: &'a [RoundRecord],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum GameEnd {
    GameOver,
    RoundCap,
    SourceEnded,
    Interrupted,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if args.games == 0 {
        return Err(anyhow!("games must be >= 1"));
    }
    if args.max_rounds == 0 {
        return Err(anyhow!("max-rounds must be >= 1"));
    }

    let mut cfg = GameConfig::load()?;
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    let is_tty = std::io::stderr().is_terminal();
    let stdout_is_tty = std::io::stdout().is_terminal();
    let ui = ui::Ui::from_args(Some(&args.ui), is_tty, !stdout_is_tty);

    let mut session = GameSession::from_config(&cfg)?;
    let mut source = open_source(&args.source, args.frames_per_step)?;
    source.connect()?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))
            .map_err(|e| anyhow!("error setting Ctrl-C handler: {}", e))?;
    }

    let mut summaries = Vec::new();
    for game in 1..=args.games {
        if game > 1 {
            session.dispatch(Action::Restart);
        }
        let end = play_game(&mut session, source.as_mut(), &ui, &args, &stop)?;
        log::info!(
            "game {} ended ({:?}): score={} rounds={}",
            game,
            end,
            session.score(),
            session.history().len()
        );
        let summary = serde_json::to_value(GameSummary {
            game,
            completed: end == GameEnd::GameOver,
            final_score: session.score(),
            lives_left: session.lives(),
            rounds: session.history(),
        })?;
        summaries.push(summary);
        // Restart is only accepted from game over.
        if end != GameEnd::GameOver {
            break;
        }
    }

    let stats = source.stats();
    log::info!(
        "source {}: {} captures, {} with a body",
        stats.source,
        stats.captures,
        stats.bodies
    );
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

fn play_game(
    session: &mut GameSession,
    source: &mut dyn LandmarkSource,
    ui: &ui::Ui,
    args: &Args,
    stop: &AtomicBool,
) -> Result<GameEnd> {
    let tick = Duration::from_millis(session.settings().clock.tick_ms);
    let round_ms = session.settings().clock.round_ms;

    session.dispatch(Action::Start);
    let mut hud = start_hud(session, ui);

    loop {
        if stop.load(Ordering::SeqCst) {
            log::warn!("interrupted; abandoning current game");
            return Ok(GameEnd::Interrupted);
        }

        match source.next_capture()? {
            Capture::Ended => {
                log::warn!("landmark source ended mid-game");
                return Ok(GameEnd::SourceEnded);
            }
            capture => session.push_sample(capture.into_sample()),
        }

        session.tick();
        if session.phase() == Phase::Playing {
            if let Some(hud) = hud.as_mut() {
                hud.update(session.remaining_ms(), session.is_warning());
            }
            if let Some(limit) = args.force_judge_after_ms {
                if round_ms - session.remaining_ms() >= limit {
                    session.dispatch(Action::ForceJudge);
                }
            }
        }

        if matches!(session.phase(), Phase::Result | Phase::GameOver) {
            if let (Some(hud), Some(result)) = (hud.take(), session.last_result()) {
                hud.finish(result);
            }
            if session.phase() == Phase::GameOver {
                return Ok(GameEnd::GameOver);
            }
            if session.history().len() >= args.max_rounds {
                log::warn!("round cap of {} reached", args.max_rounds);
                return Ok(GameEnd::RoundCap);
            }
            session.dispatch(Action::Continue);
            if session.phase() == Phase::GameOver {
                return Ok(GameEnd::GameOver);
            }
            hud = start_hud(session, ui);
        }

        if args.realtime {
            std::thread::sleep(tick);
        }
    }
}

fn start_hud(session: &GameSession, ui: &ui::Ui) -> Option<ui::RoundHud> {
    let round_ms = session.settings().clock.round_ms;
    session
        .round()
        .map(|round| ui.round(round.number, &round.pose, round_ms))
}
