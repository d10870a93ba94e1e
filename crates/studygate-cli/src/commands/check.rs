use clap::Args;
use studygate_core::{evaluate_url, Config, TimerPhase, Verdict};

use super::{open_store, CmdResult};

#[derive(Args)]
pub struct CheckArgs {
    /// URL or bare host to check
    url: String,
    /// Timer phase to evaluate in (idle, studying, on-break)
    #[arg(long, default_value = "studying")]
    phase: TimerPhase,
}

pub fn run(args: CheckArgs) -> CmdResult {
    let config = Config::load_or_default();
    let blocklist = open_store(&config)?.load();
    let verdict = evaluate_url(&args.url, args.phase, &blocklist);

    let host = match &verdict {
        Verdict::Deny { host } => Some(host.as_str()),
        Verdict::Allow => None,
    };
    let out = serde_json::json!({
        "url": args.url,
        "phase": args.phase,
        "allowed": verdict.is_allowed(),
        "host": host,
    });
    println!("{out}");
    Ok(())
}
