//! Battle engine.
//!
//! ## Key Types
//!
//! - `BattleEngine`: resolves attacks, sweeps and turn flips
//! - `ScoringRules`: hit points and multipliers
//! - `Ability` / `AbilityGrant`: flags granted by destroying resources
//! - `AttackResult` / `SweepResult`: what the engine reports back
//!
//! ## Admission
//!
//! The `admission` functions decide whether an intent may reach the engine
//! at all. The engine re-checks phase and turn itself and answers a refused
//! attack with a zero-point "not your turn" result.

pub mod admission;
pub mod battle;
pub mod result;
pub mod rules;

pub use battle::BattleEngine;
pub use result::{
    offline_message, AttackOutcome, AttackResult, SweepReading, SweepResult, MSG_ALREADY_TARGETED, MSG_BREACH,
    MSG_MISSED, MSG_NOT_YOUR_TURN, MSG_OUT_OF_BOUNDS,
};
pub use rules::{
    Ability, AbilityGrant, Beneficiary, DestroyEffect, ScoringRules, ADMIN_ACCESS_MULTIPLIER,
    DATABASE_CHAIN_BONUS_MULTIPLIER, HIT_POINTS,
};
