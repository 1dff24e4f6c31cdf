// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;
use understory_hierarchy::HierarchyConfig;
use understory_overlap::OverlapConfig;
use understory_radial::RadialConfig;
use understory_timing::SettleSchedule;
use understory_view2d::CenteringConfig;

/// Size of the layout canvas; the project sits at its center.
pub const CANVAS_SIZE: Size = Size::new(1920.0, 1080.0);
/// Delay between an immediate centering and its correction pass.
pub const CORRECTION_DELAY_MS: u64 = 100;

/// Configuration for a [`TaskMap`](crate::TaskMap) and every component it owns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TaskMapConfig {
    /// Layout tunables.
    pub radial: RadialConfig,
    /// Selection rule tunables.
    pub hierarchy: HierarchyConfig,
    /// Overlap detection tunables.
    pub overlap: OverlapConfig,
    /// Centering tunables.
    pub centering: CenteringConfig,
    /// Delays of the settle passes run after each operation.
    pub settle: SettleSchedule,
    /// See [`CANVAS_SIZE`].
    pub canvas: Size,
    /// See [`CORRECTION_DELAY_MS`].
    pub correction_delay_ms: u64,
}

impl Default for TaskMapConfig {
    fn default() -> Self {
        Self {
            radial: RadialConfig::default(),
            hierarchy: HierarchyConfig::default(),
            overlap: OverlapConfig::default(),
            centering: CenteringConfig::default(),
            settle: SettleSchedule::default(),
            canvas: CANVAS_SIZE,
            correction_delay_ms: CORRECTION_DELAY_MS,
        }
    }
}
