//! Boost events: carrying simulated collisions into an asymmetric lab frame
//!
//!
//! # Introduction (for the physicist)
//!
//! Event samples for future electron-positron colliders are usually produced
//! in the center-of-mass frame of the collision. The HALHF Higgs factory design
//! collides beams of very different energies (500 GeV electrons on 31.3 GeV
//! positrons), so its lab frame moves along the beam axis with respect to the
//! center-of-mass frame. This crate applies the corresponding Lorentz boost to
//! every Monte Carlo particle of an event file, so that existing samples can
//! be studied under HALHF beam conditions.
//!
//!
//! # Introduction (for the computer guy)
//!
//! The work is a plain streaming transform:
//!
//! * compute the boost once from the beam constants ([`boost::BeamBoost`])
//! * for each file, read one event at a time ([`records::EventReader`]),
//! * boost the momenta of its `MCParticle` collection ([`rewrite::boost_event`]),
//! * write it to a new `-boosted` file ([`records::EventWriter`]).

#![warn(missing_docs)]

pub mod beams;
pub mod boost;
pub mod config;
pub mod logging;
pub mod momentum;
pub mod numeric;
pub mod records;
pub mod rewrite;
