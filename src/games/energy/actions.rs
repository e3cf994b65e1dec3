//! Semantic action IDs for Solar Clicker click targets.

/// Press the main solar panel.
pub const GENERATE: u16 = 0;

/// Upgrade purchase (base + index into `UpgradeId::all()`).
pub const BUY_UPGRADE_BASE: u16 = 100;
