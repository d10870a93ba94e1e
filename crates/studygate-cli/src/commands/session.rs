//! Headless study session.
//!
//! Runs the timer on a one-second interval and treats every stdin line as
//! a navigation attempt (or a shell command: `stop`, `status`, `reload`).
//! Events and verdicts are written to stdout as JSON lines.

use std::time::Duration;

use clap::{Args, Subcommand};
use studygate_core::{
    label, Config, Event, MemoryRecorder, SessionController, SessionRecorder, TimerPhase, Verdict,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use super::{open_database, open_store, CmdResult};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Run one study + break cycle in the foreground
    Run(RunArgs),
}

#[derive(Args)]
pub struct RunArgs {
    /// Study minutes (defaults to session.study_minutes)
    #[arg(long)]
    study: Option<u32>,
    /// Break minutes (defaults to session.break_minutes)
    #[arg(long = "break")]
    break_minutes: Option<u32>,
    /// Tick period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    tick_ms: u64,
    /// Keep completed sessions in memory only
    #[arg(long)]
    no_record: bool,
    /// Print countdown labels instead of JSON events
    #[arg(long)]
    plain: bool,
}

pub fn run(action: SessionAction) -> CmdResult {
    match action {
        SessionAction::Run(args) => run_session(args),
    }
}

fn run_session(args: RunArgs) -> CmdResult {
    let config = Config::load_or_default();
    let study = args.study.unwrap_or(config.session.study_minutes);
    let brk = args.break_minutes.unwrap_or(config.session.break_minutes);

    let recorder: Box<dyn SessionRecorder> = if args.no_record {
        Box::new(MemoryRecorder::new())
    } else {
        Box::new(open_database(&config)?)
    };
    let mut ctl = SessionController::new(recorder, open_store(&config)?);
    ctl.start_session(study, brk)?;
    tracing::debug!(
        study,
        brk,
        tick_ms = args.tick_ms,
        record = !args.no_record,
        "session loop starting"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(drive(&mut ctl, &args));
    // Stdin is read on a blocking thread that may never return.
    runtime.shutdown_background();
    result
}

async fn drive<R: SessionRecorder>(ctl: &mut SessionController<R>, args: &RunArgs) -> CmdResult {
    emit(ctl, args.plain)?;

    let mut interval = tokio::time::interval(Duration::from_millis(args.tick_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately.
    interval.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    while ctl.phase() != TimerPhase::Idle {
        tokio::select! {
            _ = interval.tick() => ctl.tick(),
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => handle_line(ctl, line.trim(), args.plain)?,
                None => stdin_open = false,
            },
            _ = &mut ctrl_c => ctl.stop_session(),
        }
        emit(ctl, args.plain)?;
    }
    Ok(())
}

fn handle_line<R: SessionRecorder>(
    ctl: &mut SessionController<R>,
    line: &str,
    plain: bool,
) -> CmdResult {
    match line {
        "" => {}
        "stop" => ctl.stop_session(),
        "status" => {
            ctl.snapshot();
        }
        "reload" => ctl.reload_blocklist(),
        url => {
            let verdict = ctl.attempt_navigation(url);
            if plain {
                match &verdict {
                    Verdict::Allow => println!("allow {url}"),
                    Verdict::Deny { host } => {
                        println!("deny  {url} ({host} is blocked during study)")
                    }
                }
            } else {
                let out = serde_json::json!({ "url": url, "verdict": verdict });
                println!("{out}");
            }
        }
    }
    Ok(())
}

fn emit<R: SessionRecorder>(ctl: &mut SessionController<R>, plain: bool) -> CmdResult {
    for event in ctl.poll_events() {
        if plain {
            print_plain(&event);
        } else {
            println!("{}", serde_json::to_string(&event)?);
        }
    }
    Ok(())
}

fn print_plain(event: &Event) {
    match event {
        Event::SessionStarted { .. } => {
            println!("Study session started! Distracting sites are now blocked.")
        }
        Event::StudyCompleted { .. } => {
            println!("Study session complete! Break started. Blocking is OFF during break.")
        }
        Event::BreakEnded { .. } => {
            println!("Break over. You can start a new study session!")
        }
        Event::SessionStopped { .. } => println!("Session stopped. Blocking disabled."),
        Event::NavigationBlocked { .. } => {}
        Event::Tick { .. } | Event::StateSnapshot { .. } => {}
    }
    if let Some((phase, secs)) = event.phase_state() {
        println!("{}", label(phase, secs));
    }
}
