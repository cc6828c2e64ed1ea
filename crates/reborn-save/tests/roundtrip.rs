//! Property tests: every reachable state survives a save and load.

#![allow(clippy::unwrap_used)]

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use reborn_save::{decode, encode};
use reborn_types::{
    ActivityId, GameState, ItemId, JobId, LIFESPAN_DAYS, LOG_CAPACITY, STARTING_AGE_DAYS, Skill,
    SkillState, UpgradeId,
};

const ACTIVITIES: [&str; 5] = [
    "explore",
    "learn_language",
    "train_body",
    "study_tech",
    "socialize",
];
const JOBS: [&str; 4] = [
    "scrap_runner",
    "translator_helper",
    "tech_apprentice",
    "district_mediator",
];
const FLAGS: [&str; 5] = ["ad3", "li3", "ad6", "li6", "ad10"];
const OTHER: [&str; 2] = ["music_player", "potted_plant"];

fn track() -> impl Strategy<Value = SkillState> {
    (1u32..80, 0.0f64..5_000.0).prop_map(|(level, xp)| SkillState::new(level, xp))
}

fn skills() -> impl Strategy<Value = BTreeMap<Skill, SkillState>> {
    proptest::collection::vec(track(), Skill::ALL.len())
        .prop_map(|tracks| Skill::ALL.into_iter().zip(tracks).collect())
}

fn upgrades() -> impl Strategy<Value = BTreeMap<UpgradeId, u32>> {
    (0u32..40, 0u32..40, 0u32..40).prop_map(|(xp, credit, start)| {
        let mut upgrades = GameState::default_upgrades();
        for (id, level) in reborn_types::upgrades::ALL.into_iter().zip([xp, credit, start]) {
            upgrades.insert(UpgradeId::from(id), level);
        }
        upgrades
    })
}

fn mastery<T: Ord + From<&'static str> + core::fmt::Debug>(
    ids: &'static [&'static str],
) -> impl Strategy<Value = BTreeMap<T, SkillState>> {
    proptest::collection::btree_map(proptest::sample::select(ids), track(), 0..ids.len())
        .prop_map(|map| map.into_iter().map(|(id, t)| (T::from(id), t)).collect())
}

fn log_lines() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[A-Za-z0-9 .,!?'-]{0,40}", 1..LOG_CAPACITY)
        // An all-blank log is stored as "no log" and restored as the opening lines.
        .prop_filter("log must not encode to a blank field", |lines| {
            !lines.join(";;").trim().is_empty()
        })
}

fn flags() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(FLAGS.to_vec(), 0..=FLAGS.len())
        .prop_map(|flags| flags.into_iter().map(str::to_owned).collect())
}

fn other_items() -> impl Strategy<Value = (BTreeSet<ItemId>, BTreeSet<ItemId>)> {
    (
        proptest::sample::subsequence(OTHER.to_vec(), 0..=OTHER.len()),
        any::<u8>(),
    )
        .prop_map(|(owned, mask)| {
            let owned: BTreeSet<ItemId> = owned.into_iter().map(ItemId::from).collect();
            let active = owned
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, id)| id.clone())
                .collect();
            (owned, active)
        })
}

prop_compose! {
    fn life()(
        credits in 0.0f64..1.0e7,
        age_days in STARTING_AGE_DAYS..LIFESPAN_DAYS,
        life_seconds in 0.0f64..25_000.0,
        activity in proptest::sample::select(ACTIVITIES.to_vec()),
        job in proptest::option::of(proptest::sample::select(JOBS.to_vec())),
        job_wait in prop_oneof![Just(0.0f64), 0.0f64..20.0],
    ) -> (f64, f64, f64, ActivityId, Option<JobId>, f64) {
        (credits, age_days, life_seconds, ActivityId::from(activity), job.map(JobId::from), job_wait)
    }
}

prop_compose! {
    fn game_state()(
        life in life(),
        housing in proptest::sample::select(vec!["shelter", "small_house"]),
        food in proptest::option::of(proptest::sample::select(vec!["cooked_potato", "soup"])),
        other in other_items(),
        skills in skills(),
        activity_mastery in mastery::<ActivityId>(&ACTIVITIES),
        job_mastery in mastery::<JobId>(&JOBS),
        prestige in (any::<u64>(), any::<u32>()),
        upgrades in upgrades(),
        story_flags in flags(),
        log in log_lines(),
    ) -> GameState {
        let (credits, age_days, life_seconds, active_activity, active_job, job_wait) = life;
        let (owned_other, active_other) = other;
        let (echoes, total_lives) = prestige;
        GameState {
            credits,
            age_days,
            life_seconds,
            active_activity,
            active_job,
            job_wait_seconds_remaining: job_wait,
            selected_housing: ItemId::from(housing),
            selected_food: food.map(ItemId::from),
            owned_other,
            active_other,
            skills,
            activity_mastery,
            job_mastery,
            echoes,
            upgrades,
            total_lives,
            story_flags,
            log,
        }
    }
}

proptest! {
    #[test]
    fn decode_inverts_encode(state in game_state()) {
        let record = encode(&state);
        let decoded = decode(&record).unwrap();
        prop_assert_eq!(decoded, state);
    }

    #[test]
    fn reencoding_a_decoded_save_is_stable(state in game_state()) {
        let record = encode(&state);
        let again = encode(&decode(&record).unwrap());
        prop_assert_eq!(again, record);
    }
}
