//! Echo-priced permanent upgrades.

use reborn_content::{Catalog, UpgradeDef};
use reborn_types::{GameState, UpgradeId};
use tracing::debug;

use crate::error::UpgradeError;

/// Price of the next level: `floor(base_cost * cost_growth^level)`, never
/// below `base_cost`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn upgrade_cost(def: &UpgradeDef, current_level: u32) -> u64 {
    let base = u64::from(def.base_cost);
    let raw = f64::from(def.base_cost) * def.cost_growth.powf(f64::from(current_level));
    if raw.is_nan() {
        return base;
    }
    // `as` saturates: an overflowing price reads as u64::MAX.
    (raw.floor() as u64).max(base)
}

/// Buy one level of upgrade `id`, returning the new state.
///
/// # Errors
///
/// Returns [`UpgradeError::UnknownUpgrade`] for ids the catalog lacks and
/// [`UpgradeError::InsufficientEchoes`] when the price exceeds the echoes
/// on hand. The state is untouched in both cases.
pub fn try_buy_upgrade(
    catalog: &Catalog,
    state: &GameState,
    id: &str,
) -> Result<GameState, UpgradeError> {
    let def = catalog
        .upgrade(id)
        .ok_or_else(|| UpgradeError::UnknownUpgrade { id: id.to_owned() })?;
    let level = state.upgrade_level(id);
    let cost = upgrade_cost(def, level);
    let Some(echoes) = state.echoes.checked_sub(cost) else {
        return Err(UpgradeError::InsufficientEchoes {
            id: id.to_owned(),
            cost,
            echoes: state.echoes,
        });
    };

    let new_level = level.saturating_add(1);
    let mut next = state.clone();
    next.echoes = echoes;
    next.upgrades.insert(UpgradeId::from(id), new_level);
    next.push_log(format!(
        "Upgrade purchased: {} (level {new_level}).",
        def.name
    ));

    debug!(upgrade = id, level = new_level, cost, echoes, "Upgrade bought");
    Ok(next)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reborn_types::upgrades::{START_BONUS, XP_BOOST};

    use super::*;

    fn def(id: &str) -> &'static UpgradeDef {
        Catalog::standard().upgrade(id).unwrap()
    }

    #[test]
    fn cost_grows_geometrically_from_base() {
        assert_eq!(upgrade_cost(def(XP_BOOST), 0), 10);
        assert_eq!(upgrade_cost(def(XP_BOOST), 1), 13);
        assert_eq!(upgrade_cost(def(XP_BOOST), 2), 18);
        assert_eq!(upgrade_cost(def(START_BONUS), 0), 15);
        assert_eq!(upgrade_cost(def(START_BONUS), 1), 21);
    }

    #[test]
    fn cost_never_drops_below_base() {
        let shrinking = UpgradeDef {
            cost_growth: 0.5,
            ..def(XP_BOOST).clone()
        };
        assert_eq!(upgrade_cost(&shrinking, 4), 10);
    }

    #[test]
    fn absurd_levels_saturate() {
        assert_eq!(upgrade_cost(def(XP_BOOST), u32::MAX), u64::MAX);
    }

    #[test]
    fn purchase_deducts_and_levels_up() {
        let state = GameState {
            echoes: 25,
            ..GameState::default()
        };
        let next = try_buy_upgrade(Catalog::standard(), &state, XP_BOOST).unwrap();
        assert_eq!(next.echoes, 15);
        assert_eq!(next.upgrade_level(XP_BOOST), 1);
        assert_eq!(
            next.log.last().map(String::as_str),
            Some("Upgrade purchased: Residual memory (level 1).")
        );

        let next = try_buy_upgrade(Catalog::standard(), &next, XP_BOOST).unwrap();
        assert_eq!(next.echoes, 2);
        assert_eq!(next.upgrade_level(XP_BOOST), 2);
    }

    #[test]
    fn insufficient_echoes_is_rejected() {
        let state = GameState {
            echoes: 9,
            ..GameState::default()
        };
        let result = try_buy_upgrade(Catalog::standard(), &state, XP_BOOST);
        assert_eq!(
            result,
            Err(UpgradeError::InsufficientEchoes {
                id: XP_BOOST.to_owned(),
                cost: 10,
                echoes: 9,
            })
        );
    }

    #[test]
    fn unknown_upgrade_is_rejected() {
        let state = GameState {
            echoes: 1_000,
            ..GameState::default()
        };
        let result = try_buy_upgrade(Catalog::standard(), &state, "time_travel");
        assert!(matches!(result, Err(UpgradeError::UnknownUpgrade { .. })));
    }
}
