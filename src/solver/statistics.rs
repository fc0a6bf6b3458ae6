use prettytable::{row, Table};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Statistics {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
    pub learned_clauses: u64,
    pub backjumps: u64,
    pub restarts: u64,
    pub proof_steps: usize,
    start: Instant,
    elapsed: Duration,
}

impl Default for Statistics {
    fn default() -> Self {
        Statistics {
            decisions: 0,
            propagations: 0,
            conflicts: 0,
            learned_clauses: 0,
            backjumps: 0,
            restarts: 0,
            proof_steps: 0,
            start: Instant::now(),
            elapsed: Duration::default(),
        }
    }
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_timing(&mut self) {
        self.start = Instant::now();
    }

    pub fn stop_timing(&mut self) {
        self.elapsed = self.start.elapsed();
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }

    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*prettytable::format::consts::FORMAT_NO_COLSEP);
        table.set_titles(row![b -> "Solver Statistics", "Value"]);
        table.add_row(row!["Decisions", self.decisions]);
        table.add_row(row!["Propagations", self.propagations]);
        table.add_row(row!["Conflicts", self.conflicts]);
        table.add_row(row!["Learned clauses", self.learned_clauses]);
        table.add_row(row!["Backjumps", self.backjumps]);
        table.add_row(row!["Restarts", self.restarts]);
        table.add_row(row!["Proof steps", self.proof_steps]);
        table.add_row(row!["Time (approx.)", format!("{:.3}s", self.elapsed.as_secs_f32())]);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_ms_reflects_stop_timing() {
        let mut stats = Statistics::new();
        stats.start_timing();
        stats.stop_timing();
        assert!(stats.elapsed_ms() < 1000);
    }
}
