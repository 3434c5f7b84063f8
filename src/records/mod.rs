//! Event record files: a sequence of events, each holding named collections
//!
//! A file starts with a short header identifying the format, followed by one
//! frame per event. Frames carry their payload length so that events can be
//! counted without being decoded. All numbers are stored big-endian.
//!
//! Particle collections are decoded into `McParticle`s. Collections of any
//! other type are kept as opaque bytes and written back untouched.

mod codec;
mod error;
mod reader;
mod writer;

pub use self::{error::RecordError, reader::EventReader, writer::EventWriter};

use crate::{
    momentum::{self, FourMomentum, ThreeVector},
    numeric::Float,
};

use prefix_num_ops::real::*;

/// Magic bytes at the start of every event record file
pub const FILE_MAGIC: [u8; 4] = *b"EVRS";

/// Major format version, files with another major version are rejected
pub const FORMAT_MAJOR: u16 = 1;

/// Minor format version, only informative
pub const FORMAT_MINOR: u16 = 0;

/// Marker preceding each event frame
pub const RECORD_MARKER: u32 = 0xABAD_CAFE;

/// Largest event payload that we accept to load in memory (bytes)
pub const MAX_PAYLOAD_LEN: u32 = 1 << 30;

/// Type tag and conventional name of Monte Carlo particle collections
pub const MC_PARTICLE: &str = "MCParticle";

/// Monte Carlo truth particle
#[derive(Clone, Debug, Default, PartialEq)]
pub struct McParticle {
    /// PDG particle code
    pub pdg: i32,

    /// Status assigned by the event generator
    pub generator_status: i32,

    /// Status bits assigned by the detector simulation
    pub simulator_status: i32,

    /// Production vertex (mm)
    pub vertex: [Float; 3],

    /// Decay or stopping point (mm)
    pub endpoint: [Float; 3],

    /// Momentum at the production vertex (GeV)
    momentum: [Float; 3],

    /// Mass (GeV)
    pub mass: Float,

    /// Charge (units of e)
    pub charge: f32,

    /// Creation time (ns)
    pub time: f32,

    /// Spin
    pub spin: [f32; 3],

    /// Colour flow
    pub color_flow: [i32; 2],

    /// Indices of the parents within the same collection
    pub parents: Vec<u32>,
}
//
impl McParticle {
    /// Particle of a given type, with all other fields zeroed
    pub fn new(pdg: i32, momentum: [Float; 3], mass: Float) -> Self {
        Self {
            pdg,
            momentum,
            mass,
            ..Self::default()
        }
    }

    /// Momentum components (GeV)
    pub fn momentum(&self) -> [Float; 3] {
        self.momentum
    }

    /// Overwrite the momentum. The energy follows, since it is not stored.
    pub fn set_momentum(&mut self, momentum: [Float; 3]) {
        self.momentum = momentum;
    }

    /// Energy (GeV), derived from the momentum and mass
    pub fn energy(&self) -> Float {
        let [px, py, pz] = self.momentum;
        sqrt(px * px + py * py + pz * pz + self.mass * self.mass)
    }

    /// (Px, Py, Pz, E) 4-momentum
    pub fn four_momentum(&self) -> FourMomentum {
        momentum::from_parts(&ThreeVector::from(self.momentum), self.energy())
    }
}

/// Contents of a collection
#[derive(Clone, Debug, PartialEq)]
pub enum CollectionData {
    /// Monte Carlo particles
    Particles(Vec<McParticle>),

    /// Any other kind of data, passed through as raw bytes
    Opaque {
        /// Type tag of the elements
        type_name: String,

        /// Encoded elements
        payload: Vec<u8>,
    },
}

/// Named collection of an event
#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
    /// Collection name, unique within an event
    pub name: String,

    /// Collection contents
    pub data: CollectionData,
}
//
impl Collection {
    /// Particle collection
    pub fn particles(name: impl Into<String>, particles: Vec<McParticle>) -> Self {
        Self {
            name: name.into(),
            data: CollectionData::Particles(particles),
        }
    }

    /// Type tag of this collection's elements
    pub fn type_name(&self) -> &str {
        match &self.data {
            CollectionData::Particles(_) => MC_PARTICLE,
            CollectionData::Opaque { type_name, .. } => type_name,
        }
    }
}

/// One simulated collision
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Event {
    /// Run number
    pub run_number: i32,

    /// Event number within the run
    pub event_number: i32,

    /// Time stamp (ns since the Unix epoch)
    pub timestamp: i64,

    /// Event weight
    pub weight: Float,

    /// Name of the detector model
    pub detector_name: String,

    /// Free-form string parameters, in file order
    pub parameters: Vec<(String, String)>,

    /// Collections, in file order
    pub collections: Vec<Collection>,
}
//
impl Event {
    /// Look up a collection by name
    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Particles of the named particle collection
    ///
    /// Yields nothing if there is no such collection, or if it does not hold
    /// particles.
    ///
    pub fn particles<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a McParticle> + 'a {
        let particles: &[McParticle] = match self.collection(name).map(|c| &c.data) {
            Some(CollectionData::Particles(particles)) => &particles[..],
            _ => &[],
        };
        particles.iter()
    }

    /// Mutable access to the particles of the named particle collection
    pub fn particles_mut<'a>(
        &'a mut self,
        name: &str,
    ) -> impl Iterator<Item = &'a mut McParticle> + 'a {
        let collection = self.collections.iter_mut().find(|c| c.name == name);
        let particles: &mut [McParticle] = match collection.map(|c| &mut c.data) {
            Some(CollectionData::Particles(particles)) => &mut particles[..],
            _ => &mut [],
        };
        particles.iter_mut()
    }
}
