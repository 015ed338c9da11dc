//! Tabular Q-learning.
//!
//! The agent learns from immediate, game-supplied move rewards:
//!
//! Q(s,a) ← Q(s,a) + α/N(s,a) · [r + γ · max_b Q(s,b) − Q(s,a)]
//!
//! where N(s,a) counts updates of the pair, so the step size shrinks as a
//! pair is revisited. Both tables belong to one agent instance.
//!
//! ## Usage Example
//!
//! ```rust
//! use rust_gridsearch::core::PlayerId;
//! use rust_gridsearch::games::connect::ConnectGame;
//! use rust_gridsearch::qlearn::{QLearningAgent, QLearningConfig};
//!
//! let game = ConnectGame::new(2, 5, 4).unwrap();
//! let config = QLearningConfig::default().with_seed(7);
//! let mut agent = QLearningAgent::new(game.clone(), PlayerId::FIRST, config).unwrap();
//!
//! let state = game.initial_state();
//! let action = agent.learning_run(&state);
//! assert!(action.is_some());
//!
//! let json = agent.snapshot().to_json().unwrap();
//! assert!(json.contains("\"version\": 1"));
//! ```

pub mod agent;
pub mod config;
pub mod snapshot;
pub mod table;

pub use agent::{Learning, QLearningAgent};
pub use config::{QLearningConfig, RewardSchedule};
pub use snapshot::{QEntry, QTableSnapshot};
pub use table::QTable;
