//! Reference beam momenta defining the lab frame of the collider
//!
//! The HALHF Higgs factory collides a 500 GeV electron beam with a 31.3 GeV
//! positron beam. Events simulated in the symmetric center-of-mass frame are
//! carried into this asymmetric lab frame by the boost operator. Changing the
//! beam conditions requires changing the constants below and recompiling.

use crate::{
    momentum::{FourMomentum, E, X, Y, Z},
    numeric::Float,
};

/// Electron beam energy (GeV)
pub const ELECTRON_BEAM_ENERGY: Float = 500.;

/// Positron beam energy (GeV)
pub const POSITRON_BEAM_ENERGY: Float = 31.3;

/// Pair of incoming beam particles, as seen in the lab frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Beams {
    /// Incoming electron 4-momentum (GeV)
    pub electron: FourMomentum,

    /// Incoming positron 4-momentum (GeV)
    pub positron: FourMomentum,
}
//
impl Beams {
    /// Massless beams colliding head-on along the z axis, the electron going
    /// towards +z and the positron towards -z
    pub fn head_on(electron_energy: Float, positron_energy: Float) -> Self {
        Self {
            electron: FourMomentum::new(0., 0., electron_energy, electron_energy),
            positron: FourMomentum::new(0., 0., -positron_energy, positron_energy),
        }
    }

    /// HALHF beam conditions
    pub fn halhf() -> Self {
        Self::head_on(ELECTRON_BEAM_ENERGY, POSITRON_BEAM_ENERGY)
    }

    /// 4-momentum of the combined two-beam system
    pub fn combined(&self) -> FourMomentum {
        self.electron + self.positron
    }

    /// Same beams with their roles along the beam axis exchanged
    ///
    /// Spatial momenta are reflected, so that the high-energy beam now travels
    /// towards -z. The resulting lab frame moves with the opposite velocity.
    ///
    pub fn mirrored(&self) -> Self {
        let reflect = |p: &FourMomentum| FourMomentum::new(-p[X], -p[Y], -p[Z], p[E]);
        Self {
            electron: reflect(&self.electron),
            positron: reflect(&self.positron),
        }
    }
}
//
impl Default for Beams {
    fn default() -> Self {
        Self::halhf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum;
    use approx::assert_relative_eq;

    #[test]
    fn halhf_center_of_mass_energy() {
        let com = Beams::halhf().combined();
        assert_relative_eq!(com, FourMomentum::new(0., 0., 468.7, 531.3), epsilon = 1e-12);

        // sqrt(s) = 2 sqrt(E1 E2) for massless head-on beams
        let sqrt_s = momentum::mass_squared(&com).sqrt();
        assert_relative_eq!(sqrt_s, 2. * (500. * 31.3 as Float).sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn mirroring_flips_the_combined_momentum() {
        let beams = Beams::halhf();
        let mirrored = beams.mirrored();
        assert_relative_eq!(
            mirrored.combined(),
            FourMomentum::new(0., 0., -468.7, 531.3),
            epsilon = 1e-12
        );
        assert_eq!(mirrored.mirrored(), beams);
    }
}
