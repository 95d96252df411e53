//! Concrete die rollers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{DieRoller, MAX_FACE, MIN_FACE, is_face};
use crate::error::{EngineError, EngineResult};

/// Rolls d6s from any `rand` RNG. Defaults to [`StdRng`].
#[derive(Debug, Clone)]
pub struct RngRoller<R = StdRng> {
    rng: R,
}

impl RngRoller<StdRng> {
    /// A roller with a fixed seed, for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A roller seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl<R: Rng> RngRoller<R> {
    /// Wrap an existing RNG.
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Unwrap the underlying RNG.
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: Rng> DieRoller for RngRoller<R> {
    fn roll_d6(&mut self) -> u8 {
        self.rng.random_range(MIN_FACE..=MAX_FACE)
    }
}

/// Replays a fixed sequence of faces, starting over when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedRoller {
    faces: Vec<u8>,
    consumed: usize,
}

impl ScriptedRoller {
    /// Create a roller from a non-empty sequence of faces in `1..=6`.
    pub fn new(faces: Vec<u8>) -> EngineResult<Self> {
        if faces.is_empty() {
            return Err(EngineError::InvalidInput(
                "scripted roller needs at least one face".to_string(),
            ));
        }
        if let Some(bad) = faces.iter().find(|&&face| !is_face(face)) {
            return Err(EngineError::InvalidInput(format!(
                "scripted face {bad} is not a d6 face"
            )));
        }
        Ok(Self { faces, consumed: 0 })
    }

    /// How many dice have been rolled so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// The scripted sequence.
    pub fn faces(&self) -> &[u8] {
        &self.faces
    }
}

impl DieRoller for ScriptedRoller {
    fn roll_d6(&mut self) -> u8 {
        let face = self.faces[self.consumed % self.faces.len()];
        self.consumed += 1;
        face
    }
}
