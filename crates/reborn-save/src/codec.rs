//! The persisted save record.
//!
//! A save is one line of `|`-separated fields in a fixed order:
//!
//! | # | Field | Encoding |
//! |---|---|---|
//! | 0 | credits | float |
//! | 1 | age in days | float |
//! | 2 | life seconds | float |
//! | 3 | active activity | id |
//! | 4 | active job | id, or `null` |
//! | 5 | echoes | integer |
//! | 6 | total lives | integer |
//! | 7 | story flags | `;`-joined |
//! | 8 | upgrades | `id,level` pairs, `;`-joined |
//! | 9 | skills | `id,level,xp` triples, `;`-joined |
//! | 10 | log | lines joined by `;;`, any `\|` written as `/` |
//! | 11 | activity mastery | `id,level,xp` triples |
//! | 12 | job mastery | `id,level,xp` triples |
//! | 13 | selected housing | id |
//! | 14 | selected food | id, or `null` |
//! | 15 | owned "other" items | `;`-joined |
//! | 16 | active "other" items | `;`-joined |
//! | 17 | job wait seconds | float |
//!
//! Fields 0 to 10 are mandatory and make up the [`RecordLayout::Legacy`]
//! record. [`RecordLayout::Extended`] adds fields 11 to 17. Records that
//! stop part-way through the extension are read as legacy records with the
//! fields they do carry, and every missing or blank trailing field takes
//! its new-life default. Inside list fields, entries that do not parse are
//! skipped. Extra trailing fields are ignored.
//!
//! Floats are written with at least one fractional digit, so `5840.0`
//! rather than `5840`, matching records written by earlier releases.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use reborn_types::{GameState, LOG_CAPACITY, Skill, SkillState, UpgradeId};
use tracing::trace;

use crate::error::DecodeError;

/// Record shapes known to [`decode`], oldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    /// Economy, skills, and log only.
    Legacy,
    /// Adds mastery, shop selections, and the job wait.
    Extended,
}

impl RecordLayout {
    /// Number of fields the layout defines.
    #[must_use]
    pub const fn field_count(self) -> usize {
        match self {
            Self::Legacy => 11,
            Self::Extended => 18,
        }
    }

    /// The newest layout a record with `fields` fields fully carries, or
    /// `None` when it is too short for any.
    #[must_use]
    pub const fn for_field_count(fields: usize) -> Option<Self> {
        if fields >= Self::Extended.field_count() {
            Some(Self::Extended)
        } else if fields >= Self::Legacy.field_count() {
            Some(Self::Legacy)
        } else {
            None
        }
    }
}

/// Fields every record must carry.
pub const MANDATORY_FIELDS: usize = RecordLayout::Legacy.field_count();

/// Fields written by [`encode`].
pub const FIELD_COUNT: usize = RecordLayout::Extended.field_count();

const FIELD_SEPARATOR: &str = "|";
const LIST_SEPARATOR: &str = ";";
const LOG_SEPARATOR: &str = ";;";
const ENTRY_SEPARATOR: &str = ",";
const NONE: &str = "null";

/// Positions of each field in the record.
mod field {
    pub const CREDITS: usize = 0;
    pub const AGE_DAYS: usize = 1;
    pub const LIFE_SECONDS: usize = 2;
    pub const ACTIVE_ACTIVITY: usize = 3;
    pub const ACTIVE_JOB: usize = 4;
    pub const ECHOES: usize = 5;
    pub const TOTAL_LIVES: usize = 6;
    pub const STORY_FLAGS: usize = 7;
    pub const UPGRADES: usize = 8;
    pub const SKILLS: usize = 9;
    pub const LOG: usize = 10;
    pub const ACTIVITY_MASTERY: usize = 11;
    pub const JOB_MASTERY: usize = 12;
    pub const SELECTED_HOUSING: usize = 13;
    pub const SELECTED_FOOD: usize = 14;
    pub const OWNED_OTHER: usize = 15;
    pub const ACTIVE_OTHER: usize = 16;
    pub const JOB_WAIT: usize = 17;
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Encode `state` as a save record.
pub fn encode(state: &GameState) -> String {
    let fields: [String; FIELD_COUNT] = [
        encode_float(state.credits),
        encode_float(state.age_days),
        encode_float(state.life_seconds),
        state.active_activity.to_string(),
        state
            .active_job
            .as_ref()
            .map_or_else(|| NONE.to_owned(), ToString::to_string),
        state.echoes.to_string(),
        state.total_lives.to_string(),
        join_ids(&state.story_flags),
        join_entries(
            state
                .upgrades
                .iter()
                .map(|(id, level)| format!("{id}{ENTRY_SEPARATOR}{level}")),
        ),
        join_entries(
            state
                .skills
                .iter()
                .map(|(skill, track)| track_entry(skill.id(), *track)),
        ),
        encode_log(&state.log),
        join_entries(
            state
                .activity_mastery
                .iter()
                .map(|(id, track)| track_entry(id.as_str(), *track)),
        ),
        join_entries(
            state
                .job_mastery
                .iter()
                .map(|(id, track)| track_entry(id.as_str(), *track)),
        ),
        state.selected_housing.to_string(),
        state
            .selected_food
            .as_ref()
            .map_or_else(|| NONE.to_owned(), ToString::to_string),
        join_ids(&state.owned_other),
        join_ids(&state.active_other),
        encode_float(state.job_wait_seconds_remaining),
    ];
    fields.join(FIELD_SEPARATOR)
}

fn track_entry(id: &str, track: SkillState) -> String {
    format!(
        "{id}{ENTRY_SEPARATOR}{}{ENTRY_SEPARATOR}{}",
        track.level,
        encode_float(track.xp)
    )
}

/// `Display` for `f64`, with `.0` added to whole numbers.
fn encode_float(value: f64) -> String {
    let mut out = value.to_string();
    if out.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        out.push_str(".0");
    }
    out
}

fn join_entries(entries: impl Iterator<Item = String>) -> String {
    entries.collect::<Vec<_>>().join(LIST_SEPARATOR)
}

fn join_ids<T: ToString>(ids: &BTreeSet<T>) -> String {
    join_entries(ids.iter().map(ToString::to_string))
}

fn encode_log(log: &[String]) -> String {
    let mut out = String::new();
    for (i, line) in log.iter().enumerate() {
        if i > 0 {
            out.push_str(LOG_SEPARATOR);
        }
        out.push_str(&line.replace(FIELD_SEPARATOR, "/"));
    }
    out
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode a save record.
///
/// # Errors
///
/// Returns [`DecodeError::TooFewFields`] for records with fewer than
/// [`MANDATORY_FIELDS`] fields, and [`DecodeError::InvalidNumber`] when a
/// mandatory numeric field does not parse.
pub fn decode(record: &str) -> Result<GameState, DecodeError> {
    let fields = Fields::split(record)?;
    let defaults = GameState::default();

    let mut upgrades = GameState::default_upgrades();
    upgrades.extend(parse_upgrades(fields.mandatory(field::UPGRADES)));
    let mut skills = GameState::default_skills();
    skills.extend(parse_skills(fields.mandatory(field::SKILLS)));

    Ok(GameState {
        credits: fields.number(field::CREDITS, "credits")?,
        age_days: fields.number(field::AGE_DAYS, "age_days")?,
        life_seconds: fields.number(field::LIFE_SECONDS, "life_seconds")?,
        active_activity: fields
            .optional(field::ACTIVE_ACTIVITY)
            .map_or(defaults.active_activity, Into::into),
        active_job: fields.nullable(field::ACTIVE_JOB).map(Into::into),
        echoes: fields.number(field::ECHOES, "echoes")?,
        total_lives: fields.number(field::TOTAL_LIVES, "total_lives")?,
        story_flags: parse_set(fields.mandatory(field::STORY_FLAGS)),
        upgrades,
        skills,
        log: fields
            .optional(field::LOG)
            .map_or(defaults.log, decode_log),
        activity_mastery: fields
            .optional(field::ACTIVITY_MASTERY)
            .map(parse_tracks)
            .unwrap_or_default(),
        job_mastery: fields
            .optional(field::JOB_MASTERY)
            .map(parse_tracks)
            .unwrap_or_default(),
        selected_housing: fields
            .optional(field::SELECTED_HOUSING)
            .map_or(defaults.selected_housing, Into::into),
        selected_food: fields.nullable(field::SELECTED_FOOD).map(Into::into),
        owned_other: fields
            .optional(field::OWNED_OTHER)
            .map(parse_set)
            .unwrap_or_default(),
        active_other: fields
            .optional(field::ACTIVE_OTHER)
            .map(parse_set)
            .unwrap_or_default(),
        job_wait_seconds_remaining: fields
            .optional(field::JOB_WAIT)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(0.0),
    })
}

/// The split record.
struct Fields<'a>(Vec<&'a str>);

impl<'a> Fields<'a> {
    fn split(record: &'a str) -> Result<Self, DecodeError> {
        let fields: Vec<&str> = record
            .trim_end_matches(['\r', '\n'])
            .split(FIELD_SEPARATOR)
            .collect();
        let Some(layout) = RecordLayout::for_field_count(fields.len()) else {
            return Err(DecodeError::TooFewFields {
                found: fields.len(),
                required: MANDATORY_FIELDS,
            });
        };
        trace!(?layout, fields = fields.len(), "Decoding save record");
        Ok(Self(fields))
    }

    /// A field inside the mandatory prefix; blank if somehow absent.
    fn mandatory(&self, index: usize) -> &'a str {
        self.0.get(index).copied().unwrap_or_default()
    }

    /// A field that may be absent or blank.
    fn optional(&self, index: usize) -> Option<&'a str> {
        self.0
            .get(index)
            .copied()
            .filter(|raw| !raw.trim().is_empty())
    }

    /// Like [`optional`](Self::optional), with `null` also meaning absent.
    fn nullable(&self, index: usize) -> Option<&'a str> {
        self.optional(index).filter(|raw| *raw != NONE)
    }

    fn number<T: FromStr>(&self, index: usize, name: &'static str) -> Result<T, DecodeError> {
        let raw = self.mandatory(index);
        raw.trim()
            .parse()
            .ok()
            .ok_or_else(|| DecodeError::InvalidNumber {
                field: name,
                value: raw.to_owned(),
            })
    }
}

fn entries(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(LIST_SEPARATOR).filter(|entry| !entry.is_empty())
}

fn parse_set<T: Ord + From<String>>(raw: &str) -> BTreeSet<T> {
    entries(raw).map(|id| T::from(id.to_owned())).collect()
}

fn parse_upgrades(raw: &str) -> BTreeMap<UpgradeId, u32> {
    entries(raw)
        .filter_map(|entry| {
            let parsed = match entry.split(ENTRY_SEPARATOR).collect::<Vec<_>>().as_slice() {
                [id, level] => level.trim().parse().ok().map(|level| (UpgradeId::from(*id), level)),
                _ => None,
            };
            if parsed.is_none() {
                trace!(entry, "Skipping malformed upgrade entry");
            }
            parsed
        })
        .collect()
}

/// Parse `id,level,xp` triples. Levels below 1 are raised to 1.
fn parse_track_entries(raw: &str) -> impl Iterator<Item = (&str, SkillState)> {
    entries(raw).filter_map(|entry| {
        let parsed = match entry.split(ENTRY_SEPARATOR).collect::<Vec<_>>().as_slice() {
            [id, level, xp] => match (level.trim().parse::<u32>(), xp.trim().parse::<f64>()) {
                (Ok(level), Ok(xp)) => Some((*id, SkillState::new(level.max(1), xp))),
                _ => None,
            },
            _ => None,
        };
        if parsed.is_none() {
            trace!(entry, "Skipping malformed track entry");
        }
        parsed
    })
}

fn parse_tracks<T: Ord + From<String>>(raw: &str) -> BTreeMap<T, SkillState> {
    parse_track_entries(raw)
        .map(|(id, track)| (T::from(id.to_owned()), track))
        .collect()
}

/// Skill triples; unknown skill ids are dropped.
fn parse_skills(raw: &str) -> BTreeMap<Skill, SkillState> {
    parse_track_entries(raw)
        .filter_map(|(id, track)| Skill::from_id(id).map(|skill| (skill, track)))
        .collect()
}

fn decode_log(raw: &str) -> Vec<String> {
    let lines: Vec<&str> = raw.split(LOG_SEPARATOR).collect();
    let excess = lines.len().saturating_sub(LOG_CAPACITY);
    lines.into_iter().skip(excess).map(str::to_owned).collect()
}
