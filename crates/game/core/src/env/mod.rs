//! Injectable environment services for the engine.
//!
//! Randomness is the only ambient dependency the rules have; it is threaded
//! explicitly as an [`RngOracle`] handle so every probabilistic branch
//! (encounter spawns, enemy damage jitter, flee checks) is reproducible with
//! a scripted source in tests.
mod rng;

pub use rng::{PcgRng, RngOracle, ScriptedRng};
