//! Simulator configuration.

use serde::{Deserialize, Serialize};

use super::turn::TurnType;

/// Settings shared by every simulator builder and the episode driver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Seed for the simulator's RNG (dice, random turns, seat order).
    pub seed: u64,

    /// How acting agents are chosen each step.
    pub turn_type: TurnType,

    /// Step cap for the episode driver (0 = unlimited).
    pub max_steps: usize,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            turn_type: TurnType::Sequential,
            max_steps: 10_000,
        }
    }
}

impl SimulatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_turn_type(mut self, turn_type: TurnType) -> Self {
        self.turn_type = turn_type;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulatorConfig::default();
        assert_eq!(config.seed, 42);
        assert_eq!(config.turn_type, TurnType::Sequential);
        assert_eq!(config.max_steps, 10_000);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimulatorConfig::new()
            .with_seed(7)
            .with_turn_type(TurnType::RandomOrder)
            .with_max_steps(0);

        assert_eq!(config.seed, 7);
        assert_eq!(config.turn_type, TurnType::RandomOrder);
        assert_eq!(config.max_steps, 0);
    }

    #[test]
    fn test_serialization() {
        let config = SimulatorConfig::default().with_turn_type(TurnType::Random);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SimulatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
