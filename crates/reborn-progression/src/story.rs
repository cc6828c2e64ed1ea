//! One-shot narrative beats.
//!
//! Each beat fires at most once per life: the first tick that finds its
//! skill at or above the threshold adds the flag and appends the line to
//! the log. Beats are checked in table order.

use reborn_types::{GameState, Skill};
use tracing::debug;

/// A narrative milestone keyed on a skill level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryBeat {
    /// Flag recorded in `story_flags` once the beat fires.
    pub flag: &'static str,
    /// Skill watched by the beat.
    pub skill: Skill,
    /// Level at which the beat fires.
    pub threshold: u32,
    /// Log line appended when it fires.
    pub line: &'static str,
}

/// Every beat, in evaluation order.
pub const STORY_BEATS: [StoryBeat; 5] = [
    StoryBeat {
        flag: "ad3",
        skill: Skill::Adaptation,
        threshold: 3,
        line: "You start to recognise the safe routes. The city has a rhythm.",
    },
    StoryBeat {
        flag: "li3",
        skill: Skill::Linguistics,
        threshold: 3,
        line: "A few words become clear. Not enough... but you can ask for water.",
    },
    StoryBeat {
        flag: "ad6",
        skill: Skill::Adaptation,
        threshold: 6,
        line: "You finally get it: this civilisation is not \"advanced\". It is... different.",
    },
    StoryBeat {
        flag: "li6",
        skill: Skill::Linguistics,
        threshold: 6,
        line: "You catch whole sentences. People talk fast, but you are no longer drowning.",
    },
    StoryBeat {
        flag: "ad10",
        skill: Skill::Adaptation,
        threshold: 10,
        line: "You stop being an intruder. You become a piece of the puzzle.",
    },
];

/// Fire every beat whose threshold is reached and whose flag is not yet
/// set. Returns the flags fired by this call, in order.
pub fn emit_story_flags(state: &mut GameState) -> Vec<&'static str> {
    let mut fired = Vec::new();
    for beat in &STORY_BEATS {
        if state.skill_level(beat.skill) < beat.threshold || state.story_flags.contains(beat.flag) {
            continue;
        }
        state.story_flags.insert(beat.flag.to_owned());
        state.push_log(beat.line);
        debug!(flag = beat.flag, "Story beat");
        fired.push(beat.flag);
    }
    fired
}
