/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and swarm counters to be displayed in the UI.
 */

use std::time::Duration;

use crate::physics::StepStats;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub alive_particles: usize,
    pub pairs_visited: usize,
    pub respawned_total: usize,
}

impl DebugInfo {
    pub fn record_step(&mut self, stats: StepStats) {
        self.alive_particles = stats.alive;
        self.pairs_visited = stats.pairs_visited;
        self.respawned_total += stats.respawned;
    }
}
