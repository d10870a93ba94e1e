mod matcher;
mod navigation;

pub use matcher::{matches, normalize_host};
pub use navigation::{
    decide, evaluate_url, normalize_address, target_host, GateSnapshot, Verdict,
};
