//! Six-sided dice: the engine's only source of randomness.
//!
//! Everything that rolls takes a `&mut dyn DieRoller` (or a generic
//! `DieRoller`), so tests can swap the RNG for a [`ScriptedRoller`] and get
//! fully deterministic resolution.

pub mod roller;

pub use roller::{RngRoller, ScriptedRoller};

/// Lowest face on a d6.
pub const MIN_FACE: u8 = 1;

/// Highest face on a d6.
pub const MAX_FACE: u8 = 6;

/// A source of d6 results.
pub trait DieRoller {
    /// Roll one d6, returning a face in `1..=6`.
    fn roll_d6(&mut self) -> u8;
}

impl<D: DieRoller + ?Sized> DieRoller for &mut D {
    fn roll_d6(&mut self) -> u8 {
        (**self).roll_d6()
    }
}

/// Returns true if `face` is a valid d6 face.
pub fn is_face(face: u8) -> bool {
    (MIN_FACE..=MAX_FACE).contains(&face)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roll_twice(roller: &mut dyn DieRoller) -> (u8, u8) {
        (roller.roll_d6(), roller.roll_d6())
    }

    #[test]
    fn face_bounds() {
        assert!(!is_face(0));
        assert!(is_face(1));
        assert!(is_face(6));
        assert!(!is_face(7));
    }

    #[test]
    fn borrowed_roller_advances_the_original() {
        let mut scripted = ScriptedRoller::new(vec![2, 5, 3]).unwrap();
        {
            let mut borrowed = &mut scripted;
            assert_eq!(roll_twice(&mut borrowed), (2, 5));
        }
        assert_eq!(scripted.roll_d6(), 3);
        assert_eq!(scripted.consumed(), 3);
    }
}
