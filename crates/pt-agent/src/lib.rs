//! `pt-agent`: the agent facade over path search, movement and behaviours.
//!
//! # Wiring
//!
//! ```text
//! AgentBuilder::build
//!   Pathfinder<R>  ← Terrain + StructureSource + CacheConfig
//!   MovementEngine ← Pathfinder + Body + MovementConfig
//!   TaskPool       ← PoolConfig (or a borrowed runtime)
//!     └─ Scheduler loop          (delayed + one-shot callbacks)
//!   EventProcessors ─► Outcomes  (action results from event text)
//!   BehaviorContext ← engine + Host + Notifier + Outcomes + Control
//!
//! Agent::start(request)
//!   BehaviorSlot::try_start ─► drive(behaviour) submitted to the TaskPool
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `serde`    | Config derives and `AgentConfig::from_json_str`.        |
//! | `parallel` | Samples terrain on Rayon's pool during cache refresh.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pt_agent::{AgentBuilder, AgentConfig};
//! use pt_behavior::BehaviorRequest;
//!
//! let agent = AgentBuilder::new(terrain, structures, body, host)
//!     .config(AgentConfig::default())
//!     .build()?;
//! agent.start(BehaviorRequest::Follow("alice".into()))?;
//! // ...
//! agent.handle().block_on(agent.shutdown());
//! ```

pub mod agent;
pub mod builder;
pub mod config;
pub mod error;
pub mod observer;


pub use agent::{Agent, Toggle};
pub use builder::AgentBuilder;
pub use config::AgentConfig;
pub use error::{AgentError, AgentResult};
pub use observer::{AgentObserver, NoopObserver};
