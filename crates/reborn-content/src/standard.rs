//! The built-in catalog shipped with the game.
//!
//! Five activities and four jobs, each table ordered the way it unlocks;
//! three permanent upgrades; two housing options, two foods, and two
//! "other" comforts.

use std::sync::LazyLock;

use reborn_types::upgrades::{CREDIT_BOOST, START_BONUS, XP_BOOST};
use reborn_types::{ActivityId, ItemId, JobId, Skill, UpgradeId};

use crate::catalog::Catalog;
use crate::condition::SkillCondition;
use crate::defs::{ActivityDef, JobDef, ShopCategory, ShopItemDef, UpgradeDef};

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_validated(
        explore(),
        later_activities(),
        jobs(),
        upgrades(),
        housing(),
        food(),
        other(),
    )
});

/// The shared built-in catalog.
pub fn catalog() -> &'static Catalog {
    &STANDARD
}

/// Helper to build an [`ActivityDef`].
fn activity(
    id: &str,
    name: &str,
    description: &str,
    xp: &[(Skill, f64)],
    credits_per_sec: f64,
    requires: &[SkillCondition],
) -> ActivityDef {
    ActivityDef {
        id: ActivityId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        xp: xp.to_vec(),
        credits_per_sec,
        requires: requires.to_vec(),
    }
}

/// Helper to build a [`JobDef`].
fn job(
    id: &str,
    name: &str,
    description: &str,
    credits_per_sec: f64,
    xp: &[(Skill, f64)],
    requires: &[SkillCondition],
) -> JobDef {
    JobDef {
        id: JobId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        credits_per_sec,
        xp: xp.to_vec(),
        requires: requires.to_vec(),
    }
}

/// Helper to build an [`UpgradeDef`].
fn upgrade(id: &str, name: &str, description: &str, base_cost: u32, cost_growth: f64) -> UpgradeDef {
    UpgradeDef {
        id: UpgradeId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        base_cost,
        cost_growth,
    }
}

/// Helper to build a [`ShopItemDef`].
fn item(
    id: &str,
    name: &str,
    description: &str,
    category: ShopCategory,
    cost_per_day: f64,
    joy: i32,
) -> ShopItemDef {
    ShopItemDef {
        id: ItemId::from(id),
        name: name.to_owned(),
        description: description.to_owned(),
        category,
        cost_per_day,
        joy,
    }
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

fn explore() -> ActivityDef {
    activity(
        "explore",
        "Explore",
        "Watch the city and survive without being noticed.",
        &[(Skill::Adaptation, 0.9), (Skill::Linguistics, 0.4)],
        0.05,
        &[],
    )
}

fn later_activities() -> Vec<ActivityDef> {
    vec![
        activity(
            "learn_language",
            "Learn the language",
            "Imitate, memorise, understand. The words come back little by little.",
            &[
                (Skill::Linguistics, 1.4),
                (Skill::Mind, 0.3),
                (Skill::Adaptation, 0.4),
            ],
            0.0,
            &[],
        ),
        activity(
            "train_body",
            "Train",
            "The city is hard. Your body has to keep up.",
            &[(Skill::Strength, 1.2), (Skill::Adaptation, 0.2)],
            0.0,
            &[],
        ),
        activity(
            "study_tech",
            "Study technology",
            "Panels, drones, interfaces. Nothing makes sense yet, but nothing is impossible.",
            &[
                (Skill::Tech, 1.2),
                (Skill::Mind, 0.6),
                (Skill::Adaptation, 0.3),
            ],
            0.0,
            &[SkillCondition::new(Skill::Linguistics, 3)],
        ),
        activity(
            "socialize",
            "Socialize",
            "Earn trust, stay out of trouble, learn the codes.",
            &[
                (Skill::Charisma, 1.0),
                (Skill::Linguistics, 0.4),
                (Skill::Adaptation, 0.4),
            ],
            0.0,
            &[SkillCondition::new(Skill::Linguistics, 2)],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

fn jobs() -> Vec<JobDef> {
    vec![
        job(
            "scrap_runner",
            "Scrap runner",
            "Collect and deliver parts. Simple, tiring, paid in credits.",
            0.9,
            &[(Skill::Strength, 0.25), (Skill::Adaptation, 0.15)],
            &[SkillCondition::new(Skill::Adaptation, 2)],
        ),
        job(
            "translator_helper",
            "Translator's helper",
            "Bridge the old dialects and the futuristic slang.",
            1.6,
            &[
                (Skill::Linguistics, 0.35),
                (Skill::Charisma, 0.2),
                (Skill::Adaptation, 0.2),
            ],
            &[SkillCondition::new(Skill::Linguistics, 6)],
        ),
        job(
            "tech_apprentice",
            "Tech apprentice",
            "Repair modules. You learn by doing, and it pays.",
            2.4,
            &[
                (Skill::Tech, 0.45),
                (Skill::Mind, 0.25),
                (Skill::Adaptation, 0.2),
            ],
            &[
                SkillCondition::new(Skill::Tech, 6),
                SkillCondition::new(Skill::Adaptation, 5),
            ],
        ),
        job(
            "district_mediator",
            "District mediator",
            "Negotiate, calm things down, organise. Here chaos is a currency.",
            3.2,
            &[(Skill::Charisma, 0.5), (Skill::Adaptation, 0.25)],
            &[
                SkillCondition::new(Skill::Charisma, 8),
                SkillCondition::new(Skill::Linguistics, 7),
                SkillCondition::new(Skill::Adaptation, 7),
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Upgrades
// ---------------------------------------------------------------------------

fn upgrades() -> Vec<UpgradeDef> {
    vec![
        upgrade(
            XP_BOOST,
            "Residual memory",
            "+5% experience per level (permanent).",
            10,
            1.35,
        ),
        upgrade(
            CREDIT_BOOST,
            "Market instinct",
            "+5% credits per level (permanent).",
            10,
            1.35,
        ),
        upgrade(
            START_BONUS,
            "Starter bag",
            "Start each life with +50 credits per level (permanent).",
            15,
            1.45,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Shop
// ---------------------------------------------------------------------------

fn housing() -> Vec<ShopItemDef> {
    vec![
        item(
            "shelter",
            "Shelter",
            "A corner of your own. Not much, but you are under cover.",
            ShopCategory::Housing,
            0.5,
            1,
        ),
        item(
            "small_house",
            "Small house",
            "A real roof, a real door. You breathe easier.",
            ShopCategory::Housing,
            5.0,
            3,
        ),
    ]
}

fn food() -> Vec<ShopItemDef> {
    vec![
        item(
            "cooked_potato",
            "Cooked potato",
            "Simple and effective. It fills you up.",
            ShopCategory::Food,
            2.0,
            1,
        ),
        item(
            "soup",
            "Soup",
            "Hot and filling. You almost feel at home.",
            ShopCategory::Food,
            12.0,
            4,
        ),
    ]
}

fn other() -> Vec<ShopItemDef> {
    vec![
        item(
            "music_player",
            "Music player",
            "Scratchy tunes from another century. They help.",
            ShopCategory::Other,
            1.0,
            2,
        ),
        item(
            "potted_plant",
            "Potted plant",
            "Something green that depends on you.",
            ShopCategory::Other,
            0.3,
            1,
        ),
    ]
}
