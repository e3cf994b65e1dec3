/// Solar Clicker state definitions.

use std::collections::BTreeMap;

/// Purchasable upgrades that add to passive generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UpgradeId {
    SmallPanel,
    Battery,
}

impl UpgradeId {
    /// All upgrades in display order.
    pub fn all() -> &'static [UpgradeId] {
        &[UpgradeId::SmallPanel, UpgradeId::Battery]
    }

    pub fn name(&self) -> &str {
        match self {
            UpgradeId::SmallPanel => "Small Panel",
            UpgradeId::Battery => "Battery",
        }
    }

    /// Cost of the first purchase.
    pub fn base_cost(&self) -> f64 {
        match self {
            UpgradeId::SmallPanel => 10.0,
            UpgradeId::Battery => 100.0,
        }
    }

    /// Energy per second added by each purchase.
    pub fn per_second_effect(&self) -> f64 {
        match self {
            UpgradeId::SmallPanel => 1.0,
            UpgradeId::Battery => 5.0,
        }
    }

    /// Key to buy (1-2 mapped to upgrade index).
    pub fn key(&self) -> char {
        match self {
            UpgradeId::SmallPanel => '1',
            UpgradeId::Battery => '2',
        }
    }

    pub fn from_key(key: char) -> Option<UpgradeId> {
        UpgradeId::all().iter().copied().find(|u| u.key() == key)
    }
}

/// Current price, effect and owned count of one upgrade.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeRecord {
    /// Price of the next purchase. Grows after every purchase.
    pub cost: f64,
    pub per_second_effect: f64,
    pub owned: u32,
}

impl UpgradeRecord {
    pub fn new(id: UpgradeId) -> Self {
        Self {
            cost: id.base_cost(),
            per_second_effect: id.per_second_effect(),
            owned: 0,
        }
    }
}

/// The resource economy: everything clicks, ticks and purchases touch.
///
/// `per_second` is not derived from `upgrades`; every purchase adds the
/// effect once and bumps `owned` in the same step, which keeps
/// `per_second == Σ owned × per_second_effect`.
#[derive(Clone, Debug, PartialEq)]
pub struct ResourceState {
    /// Accumulated energy (real-valued; floored only for display).
    pub energy: f64,
    pub per_click: f64,
    pub per_second: f64,
    pub upgrades: BTreeMap<UpgradeId, UpgradeRecord>,
}

impl ResourceState {
    pub fn new() -> Self {
        Self {
            energy: 0.0,
            per_click: 1.0,
            per_second: 0.0,
            upgrades: UpgradeId::all()
                .iter()
                .map(|&id| (id, UpgradeRecord::new(id)))
                .collect(),
        }
    }

    pub fn upgrade(&self, id: UpgradeId) -> Option<&UpgradeRecord> {
        self.upgrades.get(&id)
    }
}

/// Log entry for the Solar Clicker side panel.
#[derive(Clone, Debug)]
pub struct EnergyLogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full Solar Clicker state: the economy plus presentation bookkeeping.
pub struct EnergyState {
    pub resources: ResourceState,
    pub log: Vec<EnergyLogEntry>,
    /// Manual generate presses, for the stats line.
    pub total_clicks: u64,
    /// Seconds the generator has been running.
    pub elapsed_seconds: u64,
    /// Frames left of the purchase highlight.
    pub purchase_flash: u32,
}

impl EnergyState {
    pub fn new() -> Self {
        Self {
            resources: ResourceState::new(),
            log: vec![EnergyLogEntry {
                text: "Solar Clicker へようこそ！ パネルをタップして発電しよう。".into(),
                is_important: true,
            }],
            total_clicks: 0,
            elapsed_seconds: 0,
            purchase_flash: 0,
        }
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(EnergyLogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > 30 {
            self.log.remove(0);
        }
    }
}
