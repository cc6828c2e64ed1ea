//! Whole-life scenarios driven through the store, the way the engine and
//! the HTTP surface drive it.

#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]

use std::collections::BTreeMap;

use reborn_core::{Command, GameStore};
use reborn_progression::{ResetReason, job_start_delay_seconds};
use reborn_types::{
    GameState, JobId, LIFESPAN_DAYS, STARTING_AGE_DAYS, Skill, SkillState, UpgradeId, upgrades,
};

/// Half-second steps, the largest a single tick simulates by default.
const STEP: f64 = 0.5;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn end_of_lifespan_starts_the_next_life_with_upgrades_kept() {
    let mut upgrade_levels = GameState::default_upgrades();
    upgrade_levels.insert(UpgradeId::from(upgrades::START_BONUS), 2);
    let store = GameStore::standard(GameState {
        credits: 1_100.0,
        echoes: 100,
        age_days: LIFESPAN_DAYS - 1.0,
        upgrades: upgrade_levels.clone(),
        ..GameState::default()
    });

    let first = store.tick(STEP);
    assert!(first.reset.is_none());

    let second = store.tick(STEP);
    assert_eq!(second.reset, Some(ResetReason::BodyFailure));

    let next = store.snapshot();
    assert_eq!(next.total_lives, 1);
    assert_eq!(next.echoes, 104);
    assert_eq!(next.upgrades, upgrade_levels);
    assert!(close(next.credits, 100.0));
    assert!(close(next.age_days, STARTING_AGE_DAYS));
    assert!(close(next.life_seconds, 0.0));
    assert!(next.story_flags.is_empty());
    assert!(next.activity_mastery.is_empty());
    assert_eq!(next.skills, GameState::default_skills());
}

#[test]
fn new_job_pays_only_after_its_start_delay() {
    let mut skills = GameState::default_skills();
    skills.insert(Skill::Adaptation, SkillState::new(2, 0.0));
    let store = GameStore::standard(GameState {
        skills,
        ..GameState::default()
    });

    let hired = store.apply(&Command::SetJob {
        id: Some(JobId::from("scrap_runner")),
    });
    assert!(close(hired.job_wait_seconds_remaining, 20.0));

    // 20 s of waiting in 0.5 s steps.
    for _ in 0..40 {
        let summary = store.tick(STEP);
        assert!(summary.job_permitted);
        assert!(summary.job_credits <= 0.0);
        assert!(close(summary.job_wait_consumed, STEP));
    }
    assert!(close(store.snapshot().job_wait_seconds_remaining, 0.0));

    let paid = store.tick(STEP);
    assert!(close(paid.job_wait_consumed, 0.0));
    assert!(paid.job_credits > 0.0);
}

#[test]
fn reselecting_the_held_job_does_not_skip_its_wait() {
    let mut skills = GameState::default_skills();
    skills.insert(Skill::Adaptation, SkillState::new(2, 0.0));
    let store = GameStore::standard(GameState {
        skills,
        ..GameState::default()
    });
    let scrap_runner = Command::SetJob {
        id: Some(JobId::from("scrap_runner")),
    };

    store.apply(&scrap_runner);
    store.tick(STEP);
    let again = store.apply(&scrap_runner);
    assert!(close(again.job_wait_seconds_remaining, 20.0 - STEP));

    let summary = store.tick(STEP);
    assert!(summary.job_credits <= 0.0);
}

#[test]
fn switching_jobs_restarts_the_wait() {
    let mut skills = GameState::default_skills();
    skills.insert(Skill::Adaptation, SkillState::new(2, 0.0));
    skills.insert(Skill::Linguistics, SkillState::new(6, 0.0));
    let mut job_mastery = BTreeMap::new();
    job_mastery.insert(JobId::from("scrap_runner"), SkillState::new(5, 0.0));
    let store = GameStore::standard(GameState {
        skills,
        job_mastery,
        active_job: Some(JobId::from("scrap_runner")),
        ..GameState::default()
    });

    // Job A pays straight away.
    assert!(store.tick(STEP).job_credits > 0.0);

    let expected_wait = job_start_delay_seconds(&store.snapshot());
    let switched = store.apply(&Command::SetJob {
        id: Some(JobId::from("translator_helper")),
    });
    assert_eq!(switched.active_job, Some(JobId::from("translator_helper")));
    assert!(expected_wait > 0.0);
    assert!(close(switched.job_wait_seconds_remaining, expected_wait));

    let mut waited = 0.0;
    while store.snapshot().job_wait_seconds_remaining > 0.0 {
        let summary = store.tick(STEP);
        waited += summary.job_wait_consumed;
        assert!(summary.job_permitted);
        assert!(summary.job_credits <= 0.0);
        assert!(!store.snapshot().job_mastery.contains_key("translator_helper"));
    }
    assert!(close(waited, expected_wait));

    let paid = store.tick(STEP);
    assert!(paid.job_credits > 0.0);
    assert!(store.snapshot().job_mastery.contains_key("translator_helper"));
}

#[test]
fn manual_reincarnation_through_a_command() {
    let store = GameStore::standard(GameState {
        credits: 600.0,
        ..GameState::default()
    });
    store.tick(STEP);
    let before = store.snapshot();

    let after = store.apply(&Command::Reincarnate);
    assert_eq!(after.total_lives, before.total_lives + 1);
    assert_eq!(after.echoes, before.echoes + 2);
    assert_eq!(after.log.first().map(String::as_str), Some(ResetReason::Manual.opening_line()));
}

#[test]
fn subscribers_see_ticks_and_commands_in_order() {
    let store = GameStore::standard(GameState::default());
    let mut rx = store.subscribe();

    store.tick(STEP);
    assert!(rx.has_changed().unwrap());
    assert!(close(rx.borrow_and_update().life_seconds, STEP));

    store.apply(&Command::SetActivity {
        id: "learn_language".into(),
    });
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().active_activity, "learn_language");
    assert!(!rx.has_changed().unwrap());
}
