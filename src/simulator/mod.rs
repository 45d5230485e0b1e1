//! Simulators: the state machine agents drive.
//!
//! - `Rules`: what a domain supplies (initial position, rewards, legal
//!   actions, transition)
//! - `GameSimulator`: current state, lazily cached rewards and legal
//!   actions, validated transitions
//! - `adversarial`: two-agent zero-sum reward vectors

pub mod rules;
pub mod game;
pub mod adversarial;

pub use adversarial::{AdversarialRules, Outcome, ADVERSARIAL_AGENTS};
pub use game::GameSimulator;
pub use rules::{single_action, JointAction, Rules};
