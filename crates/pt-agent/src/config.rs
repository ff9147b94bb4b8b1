//! Aggregate agent configuration.

use pt_behavior::BehaviorConfig;
use pt_mobility::MovementConfig;
use pt_schedule::PoolConfig;
use pt_spatial::CacheConfig;

use crate::{AgentError, AgentResult};

/// Every tunable of one agent.  Sections missing from a JSON config take
/// their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    pub cache:    CacheConfig,
    pub pool:     PoolConfig,
    pub movement: MovementConfig,
    pub behavior: BehaviorConfig,
}

impl AgentConfig {
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> AgentResult<Self> {
        let config: AgentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the agent cannot run with.  Speed and tick are
    /// checked again by the movement engine.
    pub fn validate(&self) -> AgentResult<()> {
        if self.cache.side == 0 {
            return Err(AgentError::Config("cache side must be at least 1 tile".into()));
        }
        if !(self.cache.max_slope.is_finite() && self.cache.max_slope > 0.0) {
            return Err(AgentError::Config(format!(
                "max_slope must be positive, got {}",
                self.cache.max_slope
            )));
        }
        if !(self.behavior.reach.is_finite() && self.behavior.reach > 0.0) {
            return Err(AgentError::Config(format!(
                "reach must be positive, got {}",
                self.behavior.reach
            )));
        }
        if self.pool.worker_threads == 0 {
            return Err(AgentError::Config("worker_threads must be at least 1".into()));
        }
        Ok(())
    }
}
