//! Lorentz boosts and the fixed beam boost applied to every particle
//!
//! Sign conventions follow the "active" picture: `LorentzBoost::from_velocity`
//! with velocity `beta` takes a particle at rest to a particle moving with
//! velocity `beta`. The boost which brings a system to rest is therefore the
//! one with velocity `-p/E`.

use crate::{
    beams::Beams,
    momentum::{self, FourMomentum, ThreeVector, E},
    numeric::Float,
};

use nalgebra::Matrix4;
use prefix_num_ops::real::*;
use thiserror::Error;

/// Errors that can occur while building a Lorentz boost
#[allow(missing_docs)]
#[derive(Debug, Error, PartialEq)]
pub enum BoostError {
    #[error("Boost velocity {beta} is not below the speed of light")]
    Superluminal { beta: Float },

    #[error("Cannot boost to the rest frame of non-timelike 4-momentum {p:?}")]
    NotTimelike { p: [Float; 4] },
}

/// Lorentz boost, acting on (Px, Py, Pz, E) 4-vectors
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorentzBoost {
    /// Velocity which a particle at rest acquires under this boost
    beta: ThreeVector,

    /// Boost matrix, with the energy row and column last
    matrix: Matrix4<Float>,
}
//
impl LorentzBoost {
    // ### CONSTRUCTION ###

    /// Pure boost with velocity `beta` (in units of c)
    pub fn from_velocity(beta: ThreeVector) -> Result<Self, BoostError> {
        let beta2 = beta.norm_squared();
        // Written so that NaN velocities are rejected too
        if !(beta2 < 1.) {
            return Err(BoostError::Superluminal { beta: sqrt(beta2) });
        }
        let gamma = 1. / sqrt(1. - beta2);

        // (gamma - 1) / beta² rewritten so that it stays finite at beta = 0
        let spatial_factor = gamma * gamma / (1. + gamma);
        let matrix = Matrix4::from_fn(|row, col| match (row, col) {
            (E, E) => gamma,
            (E, i) | (i, E) => gamma * beta[i],
            (i, j) => {
                let kronecker = if i == j { 1. } else { 0. };
                kronecker + spatial_factor * beta[i] * beta[j]
            }
        });
        Ok(Self { beta, matrix })
    }

    /// Boost which brings a system of 4-momentum `p` to rest
    pub fn to_rest_frame_of(p: &FourMomentum) -> Result<Self, BoostError> {
        if !(p[E] > 0.) || !(momentum::mass_squared(p) > 0.) {
            return Err(BoostError::NotTimelike { p: (*p).into() });
        }
        Self::from_velocity(-momentum::velocity(p))
    }

    /// Boost which undoes this one
    pub fn inverse(&self) -> Self {
        // Cannot fail: the opposite velocity has the same norm
        let matrix = Matrix4::from_fn(|row, col| {
            if (row == E) != (col == E) {
                -self.matrix[(row, col)]
            } else {
                self.matrix[(row, col)]
            }
        });
        Self {
            beta: -self.beta,
            matrix,
        }
    }

    // ### APPLICATION ###

    /// Apply this boost to a 4-momentum
    pub fn apply(&self, p: &FourMomentum) -> FourMomentum {
        self.matrix * p
    }

    // ### PROPERTIES ###

    /// Velocity which a particle at rest acquires under this boost
    pub fn velocity(&self) -> ThreeVector {
        self.beta
    }

    /// Lorentz factor of this boost
    pub fn gamma(&self) -> Float {
        self.matrix[(E, E)]
    }

    /// Access the underlying 4x4 matrix
    pub fn matrix(&self) -> &Matrix4<Float> {
        &self.matrix
    }
}

/// Which way the beam boost goes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoostDirection {
    /// From the rest frame of the beam system to the lab frame. A system at
    /// rest with the beams' invariant mass is mapped onto the combined beams.
    CenterOfMassToLab,

    /// From the lab frame to the rest frame of the beam system. The combined
    /// beams are mapped onto a system at rest.
    LabToCenterOfMass,
}

/// Constant boost derived from a pair of reference beams
///
/// This is computed once at startup and then shared by reference with every
/// piece of code that needs to boost particles.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeamBoost {
    /// Beams from which the boost was derived
    beams: Beams,

    /// Direction in which the boost operates
    direction: BoostDirection,

    /// Precomputed transform
    transform: LorentzBoost,
}
//
impl BeamBoost {
    /// Derive the boost associated with some beam conditions
    pub fn new(beams: Beams, direction: BoostDirection) -> Result<Self, BoostError> {
        // This brings the beam system to rest, which is the opposite of what
        // we usually want to do with simulated events.
        let to_rest = LorentzBoost::to_rest_frame_of(&beams.combined())?;
        let transform = match direction {
            BoostDirection::LabToCenterOfMass => to_rest,
            BoostDirection::CenterOfMassToLab => to_rest.inverse(),
        };
        Ok(Self {
            beams,
            direction,
            transform,
        })
    }

    /// Boost from the symmetric frame of the simulation to the HALHF lab frame
    pub fn halhf() -> Result<Self, BoostError> {
        Self::new(Beams::halhf(), BoostDirection::CenterOfMassToLab)
    }

    /// Boost going in the opposite direction for the same beams
    pub fn inverse(&self) -> Self {
        let direction = match self.direction {
            BoostDirection::CenterOfMassToLab => BoostDirection::LabToCenterOfMass,
            BoostDirection::LabToCenterOfMass => BoostDirection::CenterOfMassToLab,
        };
        Self {
            beams: self.beams,
            direction,
            transform: self.transform.inverse(),
        }
    }

    /// Boost a 4-momentum
    pub fn boost(&self, p: &FourMomentum) -> FourMomentum {
        self.transform.apply(p)
    }

    /// Beams from which the boost was derived
    pub fn beams(&self) -> &Beams {
        &self.beams
    }

    /// Direction in which the boost operates
    pub fn direction(&self) -> BoostDirection {
        self.direction
    }

    /// Underlying Lorentz transform
    pub fn transform(&self) -> &LorentzBoost {
        &self.transform
    }
}
