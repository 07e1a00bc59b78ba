//! Per-tick and whole-run reports.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::systems::presentation::PresentationStats;
use crate::systems::replication::ReplicationStats;
use crate::waddle::gate::GateCondition;

/// What happened during one logical tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub actions: usize,
    /// Waddle changes applied on the first-predicted pass.
    pub state_changes: u64,
    /// Waddle changes applied on replays. Always zero.
    pub replay_changes: u64,
    /// Deltas handed to replication at the end of the tick.
    pub deltas_flushed: usize,
    pub waddling: usize,
    /// Waddling entities whose gate no longer passes.
    pub stale_waddlers: usize,
}

/// Totals for a whole run, printed by the CLI.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SimSummary {
    pub mode: String,
    pub ticks: u64,
    pub entities: usize,
    pub prediction_passes: u32,
    pub actions: BTreeMap<&'static str, u64>,
    pub state_changes: u64,
    pub replay_changes: u64,
    pub deltas_flushed: u64,
    pub final_waddling: usize,
    pub stale_waddler_ticks: u64,
    /// Why stale waddlers would currently be refused by the gate.
    pub stale_reasons: BTreeMap<GateCondition, u64>,
    pub replication: Option<ReplicationStats>,
    pub presentation: Option<PresentationStats>,
}

impl SimSummary {
    pub fn record_tick(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.state_changes += report.state_changes;
        self.replay_changes += report.replay_changes;
        self.deltas_flushed += report.deltas_flushed as u64;
        self.stale_waddler_ticks += report.stale_waddlers as u64;
        self.final_waddling = report.waddling;
    }
}
