use clap::Subcommand;
use studygate_core::Config;

use super::{open_store, CmdResult};

#[derive(Subcommand)]
pub enum BlocklistAction {
    /// List blocked domains
    List {
        /// Print as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Block one or more domains
    Add {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Unblock one or more domains
    Remove {
        #[arg(required = true)]
        domains: Vec<String>,
    },
    /// Restore the default blocklist
    Reset,
    /// Print the blocklist file location
    Path,
}

pub fn run(action: BlocklistAction) -> CmdResult {
    let config = Config::load_or_default();
    let store = open_store(&config)?;

    match action {
        BlocklistAction::List { json } => {
            let list = store.load();
            if json {
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for domain in list.iter() {
                    println!("{domain}");
                }
            }
        }
        BlocklistAction::Add { domains } => {
            let mut list = store.load();
            for raw in &domains {
                if store.add(&mut list, raw) {
                    println!("blocked: {}", raw.trim());
                } else {
                    eprintln!("skipped: '{raw}' (empty or already blocked)");
                }
            }
        }
        BlocklistAction::Remove { domains } => {
            let mut list = store.load();
            for raw in &domains {
                if store.remove(&mut list, raw) {
                    println!("unblocked: {}", raw.trim());
                } else {
                    eprintln!("not blocked: {raw}");
                }
            }
        }
        BlocklistAction::Reset => {
            let mut list = store.load();
            store.reset(&mut list);
            println!("blocklist reset to defaults");
        }
        BlocklistAction::Path => {
            println!("{}", store.path().display());
        }
    }
    Ok(())
}
