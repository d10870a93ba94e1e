//! Integration tests for the full study-session workflow.
//!
//! Drives a controller backed by a real blocklist file and SQLite database
//! through a complete study/break cycle, checking gating decisions and
//! session recording along the way.

use studygate_core::storage::BLOCKLIST_FILE;
use studygate_core::{
    BlocklistStore, Database, Event, SessionController, TimerPhase, Verdict,
    DEFAULT_BLOCKED_DOMAINS,
};
use tempfile::TempDir;

fn controller(dir: &TempDir) -> SessionController<Database> {
    let db = Database::open_at(dir.path().join("productivity.db")).unwrap();
    let store = BlocklistStore::with_path(dir.path().join(BLOCKLIST_FILE));
    SessionController::new(db, store)
}

#[test]
fn test_first_run_seeds_blocklist_file() {
    let dir = TempDir::new().unwrap();
    let ctl = controller(&dir);

    assert_eq!(ctl.blocklist().to_vec(), DEFAULT_BLOCKED_DOMAINS.to_vec());
    let on_disk: Vec<String> = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(BLOCKLIST_FILE)).unwrap(),
    )
    .unwrap();
    assert_eq!(on_disk.len(), 5);
}

#[test]
fn test_full_cycle_records_exactly_one_session() {
    let dir = TempDir::new().unwrap();
    let mut ctl = controller(&dir);

    ctl.start_session(25, 5).unwrap();
    for _ in 0..1500 {
        ctl.tick();
    }
    assert_eq!(ctl.phase(), TimerPhase::OnBreak);
    assert_eq!(ctl.timer().seconds_remaining(), 300);

    let completed: Vec<_> = ctl
        .poll_events()
        .into_iter()
        .filter(|e| matches!(e, Event::StudyCompleted { .. }))
        .collect();
    assert_eq!(completed.len(), 1);
    match &completed[0] {
        Event::StudyCompleted {
            record, recorded, ..
        } => {
            assert!(*recorded);
            assert_eq!(record.study_minutes, 25);
            assert_eq!(record.break_minutes, 5);
        }
        _ => unreachable!(),
    }

    for _ in 0..300 {
        ctl.tick();
    }
    assert_eq!(ctl.phase(), TimerPhase::Idle);
    assert!(ctl
        .poll_events()
        .iter()
        .any(|e| matches!(e, Event::BreakEnded { .. })));

    let sessions = ctl.timer().recorder().sessions().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].study_minutes, 25);
    assert_eq!(sessions[0].break_minutes, 5);
}

#[test]
fn test_stopped_session_is_not_recorded() {
    let dir = TempDir::new().unwrap();
    let mut ctl = controller(&dir);

    for stop_after in [1_u32, 750, 1499] {
        ctl.start_session(25, 5).unwrap();
        for _ in 0..stop_after {
            ctl.tick();
        }
        assert_eq!(ctl.phase(), TimerPhase::Studying);
        ctl.stop_session();
        assert_eq!(ctl.phase(), TimerPhase::Idle);
    }

    assert!(ctl.timer().recorder().sessions().unwrap().is_empty());
}

#[test]
fn test_gate_decisions_follow_phase() {
    let dir = TempDir::new().unwrap();
    let mut ctl = controller(&dir);

    let cases = [
        ("https://youtube.com", false),
        ("https://m.youtube.com/watch", false),
        ("https://myyoutube.com", false),
        ("https://youtube.org", true),
        ("https://www.instagram.com/explore", false),
        ("not a url at all ::", true),
    ];

    for (url, _) in cases {
        assert_eq!(ctl.attempt_navigation(url), Verdict::Allow, "idle: {url}");
    }

    ctl.start_session(1, 1).unwrap();
    for (url, allowed) in cases {
        assert_eq!(ctl.attempt_navigation(url).is_allowed(), allowed, "studying: {url}");
    }

    for _ in 0..60 {
        ctl.tick();
    }
    assert_eq!(ctl.phase(), TimerPhase::OnBreak);
    for (url, _) in cases {
        assert_eq!(ctl.attempt_navigation(url), Verdict::Allow, "break: {url}");
    }
}

#[test]
fn test_corrupt_blocklist_recovers_with_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(BLOCKLIST_FILE), "[\"youtube.com\",").unwrap();

    let mut ctl = controller(&dir);
    assert_eq!(ctl.blocklist().len(), 5);

    ctl.start_session(25, 5).unwrap();
    assert!(!ctl.attempt_navigation("tiktok.com").is_allowed());
}
