use clap::Args;
use studygate_core::Config;

use super::{open_database, CmdResult};

#[derive(Args)]
pub struct HistoryArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: HistoryArgs) -> CmdResult {
    let config = Config::load_or_default();
    let db = open_database(&config)?;
    let sessions = db.sessions()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("no completed sessions");
    }
    for s in &sessions {
        println!(
            "{}  study {:>3} min  break {:>2} min",
            s.date, s.study_minutes, s.break_minutes
        );
    }
    Ok(())
}
