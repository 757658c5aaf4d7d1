use chrono::{DateTime, TimeZone, Utc};
use delaygate::config::{CooldownConfig, CorruptStatePolicy};
use delaygate::cooldown::{Admission, ToggleCooldownGuard};
use std::sync::{Arc, Barrier};
use tempfile::TempDir;

fn at(secs: i64, millis: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, millis * 1_000_000)
        .single()
        .expect("timestamp should be valid")
}

fn config_in(workspace: &TempDir, on_corrupt: CorruptStatePolicy) -> CooldownConfig {
    CooldownConfig {
        duration_secs: 15,
        state_file: workspace
            .path()
            .join("state")
            .join("censor_toggle_ts")
            .display()
            .to_string(),
        on_corrupt,
    }
}

#[test]
fn lock_survives_a_fresh_guard_on_the_same_file() {
    let workspace = TempDir::new().expect("temp workspace should be created");
    let config = config_in(&workspace, CorruptStatePolicy::Open);

    let first = ToggleCooldownGuard::from_config(&config);
    assert!(
        first
            .try_admit_toggle(at(0, 0))
            .expect("toggle should persist")
            .is_admitted()
    );
    drop(first);

    let restarted = ToggleCooldownGuard::from_config(&config);
    let window = restarted.current_lock_window(at(4, 100));
    assert!(window.locked);
    assert_eq!(window.seconds_remaining, 11);
    assert_eq!(window.progress_percent, 27);

    match restarted
        .try_admit_toggle(at(14, 999))
        .expect("lookup should succeed")
    {
        Admission::Rejected(window) => assert_eq!(window.seconds_remaining, 1),
        Admission::Admitted(_) => panic!("toggle inside the cooldown must be rejected"),
    }
    assert!(
        restarted
            .try_admit_toggle(at(15, 0))
            .expect("toggle should persist")
            .is_admitted()
    );
}

#[test]
fn corrupt_file_is_ignored_when_failing_open() {
    let workspace = TempDir::new().expect("temp workspace should be created");
    let config = config_in(&workspace, CorruptStatePolicy::Open);
    let path = config.state_path();
    std::fs::create_dir_all(path.parent().expect("state file should have a parent"))
        .expect("state dir should be created");
    std::fs::write(&path, "not-a-timestamp").expect("corrupt state should be written");

    let guard = ToggleCooldownGuard::from_config(&config);
    assert!(!guard.current_lock_window(at(0, 0)).locked);
    assert!(
        guard
            .try_admit_toggle(at(0, 0))
            .expect("toggle should persist")
            .is_admitted()
    );

    let repaired = std::fs::read_to_string(&path).expect("state should be readable");
    assert_ne!(repaired, "not-a-timestamp");
}

#[test]
fn corrupt_file_restarts_the_window_when_failing_closed() {
    let workspace = TempDir::new().expect("temp workspace should be created");
    let config = config_in(&workspace, CorruptStatePolicy::Closed);
    let path = config.state_path();
    std::fs::create_dir_all(path.parent().expect("state file should have a parent"))
        .expect("state dir should be created");
    std::fs::write(&path, "garbage").expect("corrupt state should be written");

    let guard = ToggleCooldownGuard::from_config(&config);
    assert!(matches!(
        guard.try_admit_toggle(at(0, 0)).expect("lookup should succeed"),
        Admission::Rejected(window) if window.seconds_remaining == 15
    ));
    assert!(guard.current_lock_window(at(10, 0)).locked);
    assert!(
        guard
            .try_admit_toggle(at(15, 0))
            .expect("toggle should persist")
            .is_admitted()
    );
}

#[test]
fn concurrent_toggles_admit_exactly_one() {
    let workspace = TempDir::new().expect("temp workspace should be created");
    let guard = Arc::new(ToggleCooldownGuard::from_config(&config_in(
        &workspace,
        CorruptStatePolicy::Open,
    )));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let guard = Arc::clone(&guard);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                guard
                    .try_admit_toggle(at(0, 0))
                    .expect("toggle lookup should succeed")
                    .is_admitted()
            })
        })
        .collect();

    let admitted = handles
        .into_iter()
        .map(|handle| handle.join().expect("toggle thread should finish"))
        .filter(|admitted| *admitted)
        .count();
    assert_eq!(admitted, 1);
}

#[test]
fn independent_guards_on_one_file_admit_once_per_window() {
    const GUARDS: usize = 8;
    const ROUNDS: i64 = 50;

    let workspace = TempDir::new().expect("temp workspace should be created");
    let config = config_in(&workspace, CorruptStatePolicy::Open);
    let barrier = Arc::new(Barrier::new(GUARDS));

    let handles: Vec<_> = (0..GUARDS)
        .map(|_| {
            let guard = ToggleCooldownGuard::from_config(&config);
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                (0..ROUNDS)
                    .map(|round| {
                        barrier.wait();
                        guard
                            .try_admit_toggle(at(round * 100, 0))
                            .expect("toggle lookup should succeed")
                            .is_admitted()
                    })
                    .collect::<Vec<bool>>()
            })
        })
        .collect();

    let per_guard: Vec<Vec<bool>> = handles
        .into_iter()
        .map(|handle| handle.join().expect("toggle thread should finish"))
        .collect();

    for round in 0..usize::try_from(ROUNDS).expect("round count fits") {
        let admitted = per_guard.iter().filter(|rounds| rounds[round]).count();
        assert_eq!(admitted, 1, "round {round} admitted {admitted} toggles");
    }
}
