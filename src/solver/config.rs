use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub struct Config {
    pub enable_restart: bool,
    /// K: conflict counter modulus that triggers a restart.
    pub restart_threshold: u32,
    pub enable_subsumption: bool,
    pub max_iterations: u32,
    pub max_proof_steps: u32,
    pub max_bcp_rounds: u32,
    pub max_explanation_steps: u32,
    /// Polled at the top of each outer-loop iteration and each BCP round.
    pub interrupt: Arc<AtomicBool>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            enable_restart: false,
            restart_threshold: 5,
            enable_subsumption: false,
            max_iterations: 1_000_000,
            max_proof_steps: 10_000,
            max_bcp_rounds: 1_000,
            max_explanation_steps: 100,
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }
}
