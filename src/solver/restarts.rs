/// Fires every `threshold`-th conflict when enabled.
#[derive(Debug, Clone, Default)]
pub struct Restarter {
    conflicts_since_last_restart: u32,
}

impl Restarter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conflict(&mut self) {
        self.conflicts_since_last_restart += 1;
    }

    pub fn is_due(&self, enabled: bool, threshold: u32) -> bool {
        enabled && threshold > 0 && self.conflicts_since_last_restart % threshold == 0
    }

    pub fn reset(&mut self) {
        self.conflicts_since_last_restart = 0;
    }
}
