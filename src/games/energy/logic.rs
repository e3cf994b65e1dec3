/// Solar Clicker game logic. Pure functions over the resource state.

use super::state::{EnergyState, ResourceState, UpgradeId};

/// Factor applied to an upgrade's cost after each purchase (then floored).
pub const COST_GROWTH: f64 = 1.5;

/// Result of a purchase attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum PurchaseOutcome {
    Purchased { paid: f64, next_cost: f64, owned: u32 },
    /// Not enough energy (or unknown upgrade). Nothing changed.
    NotAffordable,
}

/// Manual generate: add one click's worth of energy.
pub fn apply_click(res: &mut ResourceState) {
    res.energy += res.per_click;
}

/// One second of passive generation.
pub fn apply_tick(res: &mut ResourceState) {
    res.energy += res.per_second;
}

pub fn can_afford(res: &ResourceState, id: UpgradeId) -> bool {
    res.upgrade(id).is_some_and(|u| res.energy >= u.cost)
}

/// Buy one unit of `id` if affordable.
///
/// On success the cost is paid, the effect is added to `per_second`, the
/// owned count goes up and the stored cost becomes `floor(cost × 1.5)`.
/// Each call checks affordability on its own, so a stale double activation
/// simply fails the second time.
pub fn purchase(res: &mut ResourceState, id: UpgradeId) -> PurchaseOutcome {
    let energy = res.energy;
    let Some(upgrade) = res.upgrades.get_mut(&id) else {
        return PurchaseOutcome::NotAffordable;
    };
    if energy < upgrade.cost {
        return PurchaseOutcome::NotAffordable;
    }

    let paid = upgrade.cost;
    upgrade.owned += 1;
    upgrade.cost = (upgrade.cost * COST_GROWTH).floor();
    let (effect, next_cost, owned) = (upgrade.per_second_effect, upgrade.cost, upgrade.owned);

    res.energy -= paid;
    res.per_second += effect;
    PurchaseOutcome::Purchased {
        paid,
        next_cost,
        owned,
    }
}

/// Energy as shown to the player: floored toward zero.
pub fn display_quantity(energy: f64) -> u64 {
    energy.max(0.0).floor() as u64
}

/// Floored value with thousands separators, e.g. `12,345`.
pub fn format_number(n: f64) -> String {
    let s = display_quantity(n).to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

// ── State-level actions (log + flash on top of the economy) ────────

pub fn click(state: &mut EnergyState) {
    apply_click(&mut state.resources);
    state.total_clicks += 1;
}

/// Advance `delta_ticks` one-second ticks.
pub fn tick(state: &mut EnergyState, delta_ticks: u32) {
    for _ in 0..delta_ticks {
        apply_tick(&mut state.resources);
        state.elapsed_seconds += 1;
    }
    state.purchase_flash = state.purchase_flash.saturating_sub(delta_ticks);
}

/// Try to buy an upgrade. Returns true if successful.
pub fn buy_upgrade(state: &mut EnergyState, id: UpgradeId) -> bool {
    match purchase(&mut state.resources, id) {
        PurchaseOutcome::Purchased {
            paid,
            next_cost,
            owned,
        } => {
            log::info!(
                "bought {} #{} for {}, next cost {}, now {}/s",
                id.name(),
                owned,
                paid,
                next_cost,
                state.resources.per_second
            );
            state.purchase_flash = 1;
            state.add_log(
                &format!(
                    "{} を購入！ ({}台) 次は {}",
                    id.name(),
                    owned,
                    format_number(next_cost)
                ),
                false,
            );
            true
        }
        PurchaseOutcome::NotAffordable => {
            log::debug!("purchase of {} rejected: not affordable", id.name());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn owned_sum(res: &ResourceState) -> f64 {
        res.upgrades
            .values()
            .map(|u| u.owned as f64 * u.per_second_effect)
            .sum()
    }

    #[test]
    fn click_adds_per_click() {
        let mut res = ResourceState::new();
        apply_click(&mut res);
        assert_eq!(res.energy, 1.0);
    }

    #[test]
    fn tick_adds_per_second() {
        let mut res = ResourceState::new();
        res.per_second = 6.0;
        apply_tick(&mut res);
        apply_tick(&mut res);
        assert_eq!(res.energy, 12.0);
    }

    #[test]
    fn first_panel_scenario() {
        let mut res = ResourceState::new();
        apply_click(&mut res);
        assert_eq!(res.energy, 1.0);

        res.energy = 10.0;
        assert!(can_afford(&res, UpgradeId::SmallPanel));
        let outcome = purchase(&mut res, UpgradeId::SmallPanel);
        assert_eq!(
            outcome,
            PurchaseOutcome::Purchased {
                paid: 10.0,
                next_cost: 15.0,
                owned: 1
            }
        );
        assert_eq!(res.energy, 0.0);
        assert_eq!(res.per_second, 1.0);
        assert_eq!(res.upgrade(UpgradeId::SmallPanel).unwrap().cost, 15.0);
    }

    #[test]
    fn unaffordable_purchase_is_noop() {
        let mut res = ResourceState::new();
        res.energy = 9.5;
        let before = res.clone();
        assert!(!can_afford(&res, UpgradeId::SmallPanel));
        assert_eq!(purchase(&mut res, UpgradeId::SmallPanel), PurchaseOutcome::NotAffordable);
        assert_eq!(res, before);
    }

    #[test]
    fn double_activation_checks_each_time() {
        let mut res = ResourceState::new();
        res.energy = 20.0;
        assert!(matches!(purchase(&mut res, UpgradeId::SmallPanel), PurchaseOutcome::Purchased { .. }));
        // 10 left, next cost 15
        assert_eq!(purchase(&mut res, UpgradeId::SmallPanel), PurchaseOutcome::NotAffordable);
        assert_eq!(res.energy, 10.0);
        assert_eq!(res.upgrade(UpgradeId::SmallPanel).unwrap().owned, 1);
    }

    #[test]
    fn costs_are_independent_per_upgrade() {
        let mut res = ResourceState::new();
        res.energy = 1000.0;
        purchase(&mut res, UpgradeId::Battery);
        assert_eq!(res.upgrade(UpgradeId::Battery).unwrap().cost, 150.0);
        assert_eq!(res.upgrade(UpgradeId::SmallPanel).unwrap().cost, 10.0);
        assert_eq!(res.per_second, 5.0);
    }

    #[test]
    fn panel_cost_sequence() {
        let mut res = ResourceState::new();
        res.energy = 1_000_000.0;
        let mut costs = Vec::new();
        for _ in 0..5 {
            purchase(&mut res, UpgradeId::SmallPanel);
            costs.push(res.upgrade(UpgradeId::SmallPanel).unwrap().cost);
        }
        assert_eq!(costs, vec![15.0, 22.0, 33.0, 49.0, 73.0]);
    }

    #[test]
    fn display_floors() {
        assert_eq!(display_quantity(0.0), 0);
        assert_eq!(display_quantity(9.99), 9);
        assert_eq!(display_quantity(12.0), 12);
        assert_eq!(format_number(1234567.8), "1,234,567");
        assert_eq!(format_number(999.0), "999");
    }

    #[test]
    fn state_buy_logs_and_flashes() {
        let mut state = EnergyState::new();
        state.resources.energy = 10.0;
        assert!(buy_upgrade(&mut state, UpgradeId::SmallPanel));
        assert_eq!(state.purchase_flash, 1);
        assert!(state.log.last().unwrap().text.contains("Small Panel"));

        assert!(!buy_upgrade(&mut state, UpgradeId::SmallPanel));
        tick(&mut state, 1);
        assert_eq!(state.purchase_flash, 0);
        assert_eq!(state.resources.energy, 1.0);
        assert_eq!(state.elapsed_seconds, 1);
    }

    proptest! {
        #[test]
        fn click_changes_only_energy(energy in 0.0f64..1e9, per_click in 0.0f64..1e3) {
            let mut res = ResourceState::new();
            res.energy = energy;
            res.per_click = per_click;
            let before = res.clone();
            apply_click(&mut res);

            prop_assert_eq!(res.energy, energy + per_click);
            prop_assert_eq!(res.per_click, before.per_click);
            prop_assert_eq!(res.per_second, before.per_second);
            prop_assert_eq!(&res.upgrades, &before.upgrades);
        }

        #[test]
        fn repeated_purchases_grow_cost_geometrically(n in 1usize..25, battery in any::<bool>()) {
            let id = if battery { UpgradeId::Battery } else { UpgradeId::SmallPanel };
            let mut res = ResourceState::new();
            res.energy = 1e15;
            let mut cost = res.upgrade(id).unwrap().cost;
            for _ in 0..n {
                let outcome = purchase(&mut res, id);
                let next = res.upgrade(id).unwrap().cost;
                prop_assert!(
                    matches!(outcome, PurchaseOutcome::Purchased { paid, .. } if paid == cost),
                    "expected purchase at {}", cost
                );
                prop_assert_eq!(next, (cost * 1.5).floor());
                prop_assert!(next > cost);
                cost = next;
            }
        }

        #[test]
        fn purchases_never_overdraw(energy in 0.0f64..500.0, picks in proptest::collection::vec(any::<bool>(), 0..20)) {
            let mut res = ResourceState::new();
            res.energy = energy;
            for battery in picks {
                let id = if battery { UpgradeId::Battery } else { UpgradeId::SmallPanel };
                let before = res.clone();
                let affordable = can_afford(&res, id);
                let outcome = purchase(&mut res, id);
                prop_assert!(res.energy >= 0.0);
                if !affordable {
                    prop_assert_eq!(outcome, PurchaseOutcome::NotAffordable);
                    prop_assert_eq!(&res, &before);
                }
                prop_assert_eq!(res.per_second, owned_sum(&res));
            }
        }
    }
}
