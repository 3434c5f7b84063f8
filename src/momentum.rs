//! This module implements some domain-specific 4-momentum handling logic.

use crate::numeric::Float;
use nalgebra::{SVector, Vector3};

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum, stored as (Px, Py, Pz, E)
pub type FourMomentum = SVector<Float, MOMENTUM_DIM>;

/// Spatial part of a 4-momentum, or a velocity in units of c
pub type ThreeVector = Vector3<Float>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// Build a 4-momentum from a spatial momentum and an energy
pub fn from_parts(p: &ThreeVector, energy: Float) -> FourMomentum {
    FourMomentum::new(p[X], p[Y], p[Z], energy)
}

/// Extract the spatial part of a 4-momentum
pub fn spatial(p: &FourMomentum) -> ThreeVector {
    p.xyz()
}

/// Minkowski norm E² - |p|², i.e. the squared invariant mass
pub fn mass_squared(p: &FourMomentum) -> Float {
    p[E] * p[E] - p.xyz().norm_squared()
}

/// Velocity (in units of c) of the frame in which this 4-momentum is at rest
///
/// Only meaningful for timelike 4-momenta with positive energy, which the
/// caller is expected to check beforehand.
///
pub fn velocity(p: &FourMomentum) -> ThreeVector {
    p.xyz() / p[E]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mass_of_a_beam_pair() {
        let p = FourMomentum::new(0., 0., 468.7, 531.3);
        assert_relative_eq!(mass_squared(&p), 4. * 500. * 31.3, max_relative = 1e-12);
        assert_relative_eq!(velocity(&p), ThreeVector::new(0., 0., 468.7 / 531.3));
    }

    #[test]
    fn parts_are_reassembled_in_order() {
        let p = from_parts(&ThreeVector::new(1., 2., 3.), 4.);
        assert_eq!((p[X], p[Y], p[Z], p[E]), (1., 2., 3., 4.));
        assert_eq!(spatial(&p), ThreeVector::new(1., 2., 3.));
    }
}
