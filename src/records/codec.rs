//! Binary encoding of event payloads
//!
//! Decoding operates on a fully loaded payload, so running out of bytes always
//! means that the payload is truncated or corrupt.

use super::{Collection, CollectionData, Event, McParticle, RecordError, MC_PARTICLE};
use crate::numeric::Float;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Byte order of everything stored in event record files
pub type Order = BigEndian;

// ### ENCODING ###

/// Append the encoded form of an event to a buffer
pub fn encode_event(event: &Event, out: &mut Vec<u8>) -> io::Result<()> {
    out.write_i32::<Order>(event.run_number)?;
    out.write_i32::<Order>(event.event_number)?;
    out.write_i64::<Order>(event.timestamp)?;
    out.write_f64::<Order>(event.weight)?;
    write_string(out, &event.detector_name)?;

    write_len(out, event.parameters.len())?;
    for (key, value) in &event.parameters {
        write_string(out, key)?;
        write_string(out, value)?;
    }

    write_len(out, event.collections.len())?;
    for collection in &event.collections {
        write_string(out, &collection.name)?;
        write_string(out, collection.type_name())?;
        match &collection.data {
            CollectionData::Particles(particles) => {
                write_len(out, particles.len())?;
                for particle in particles {
                    encode_particle(particle, out)?;
                }
            }
            CollectionData::Opaque { payload, .. } => {
                write_len(out, payload.len())?;
                out.write_all(payload)?;
            }
        }
    }
    Ok(())
}

fn encode_particle(particle: &McParticle, out: &mut impl Write) -> io::Result<()> {
    out.write_i32::<Order>(particle.pdg)?;
    out.write_i32::<Order>(particle.generator_status)?;
    out.write_i32::<Order>(particle.simulator_status)?;
    for x in particle
        .vertex
        .iter()
        .chain(&particle.endpoint)
        .chain(&particle.momentum)
        .chain([&particle.mass])
    {
        out.write_f64::<Order>(*x)?;
    }
    out.write_f32::<Order>(particle.charge)?;
    out.write_f32::<Order>(particle.time)?;
    for s in particle.spin {
        out.write_f32::<Order>(s)?;
    }
    for c in particle.color_flow {
        out.write_i32::<Order>(c)?;
    }
    write_len(out, particle.parents.len())?;
    for &parent in &particle.parents {
        out.write_u32::<Order>(parent)?;
    }
    Ok(())
}

/// Element counts and byte lengths are stored as u32
fn write_len(out: &mut impl Write, len: usize) -> io::Result<()> {
    let len = u32::try_from(len).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("length {len} does not fit the record format"),
        )
    })?;
    out.write_u32::<Order>(len)
}

fn write_string(out: &mut impl Write, s: &str) -> io::Result<()> {
    write_len(out, s.len())?;
    out.write_all(s.as_bytes())
}

// ### DECODING ###

/// Decode an event from its complete payload
pub fn decode_event(payload: &[u8]) -> Result<Event, RecordError> {
    let mut input = payload;
    let input = &mut input;

    let run_number = input.read_i32::<Order>()?;
    let event_number = input.read_i32::<Order>()?;
    let timestamp = input.read_i64::<Order>()?;
    let weight = input.read_f64::<Order>()?;
    let detector_name = read_string(input)?;

    let num_parameters = read_len(input)?;
    let mut parameters = Vec::with_capacity(num_parameters.min(PREALLOC_LIMIT));
    for _ in 0..num_parameters {
        let key = read_string(input)?;
        let value = read_string(input)?;
        parameters.push((key, value));
    }

    let num_collections = read_len(input)?;
    let mut collections = Vec::with_capacity(num_collections.min(PREALLOC_LIMIT));
    for _ in 0..num_collections {
        let name = read_string(input)?;
        let type_name = read_string(input)?;
        let data = if type_name == MC_PARTICLE {
            let num_particles = read_len(input)?;
            let mut particles = Vec::with_capacity(num_particles.min(PREALLOC_LIMIT));
            for _ in 0..num_particles {
                particles.push(decode_particle(input)?);
            }
            CollectionData::Particles(particles)
        } else {
            let payload = read_bytes(input)?;
            CollectionData::Opaque { type_name, payload }
        };
        collections.push(Collection { name, data });
    }

    if !input.is_empty() {
        return Err(RecordError::TrailingBytes(input.len()));
    }
    Ok(Event {
        run_number,
        event_number,
        timestamp,
        weight,
        detector_name,
        parameters,
        collections,
    })
}

/// Counts come from untrusted input, so don't let them drive allocations
const PREALLOC_LIMIT: usize = 1024;

fn decode_particle(input: &mut &[u8]) -> Result<McParticle, RecordError> {
    let pdg = input.read_i32::<Order>()?;
    let generator_status = input.read_i32::<Order>()?;
    let simulator_status = input.read_i32::<Order>()?;
    let vertex = read_f64_triplet(input)?;
    let endpoint = read_f64_triplet(input)?;
    let momentum = read_f64_triplet(input)?;
    let mass = input.read_f64::<Order>()?;
    let charge = input.read_f32::<Order>()?;
    let time = input.read_f32::<Order>()?;
    let mut spin = [0.; 3];
    input.read_f32_into::<Order>(&mut spin)?;
    let mut color_flow = [0; 2];
    input.read_i32_into::<Order>(&mut color_flow)?;
    let num_parents = read_len(input)?;
    let mut parents = Vec::with_capacity(num_parents.min(PREALLOC_LIMIT));
    for _ in 0..num_parents {
        parents.push(input.read_u32::<Order>()?);
    }
    Ok(McParticle {
        pdg,
        generator_status,
        simulator_status,
        vertex,
        endpoint,
        momentum,
        mass,
        charge,
        time,
        spin,
        color_flow,
        parents,
    })
}

fn read_f64_triplet(input: &mut &[u8]) -> io::Result<[Float; 3]> {
    let mut triplet = [0.; 3];
    input.read_f64_into::<Order>(&mut triplet)?;
    Ok(triplet)
}

fn read_len(input: &mut &[u8]) -> io::Result<usize> {
    Ok(input.read_u32::<Order>()? as usize)
}

fn read_bytes(input: &mut &[u8]) -> io::Result<Vec<u8>> {
    let len = read_len(input)?;
    if len > input.len() {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    let mut bytes = vec![0; len];
    input.read_exact(&mut bytes)?;
    Ok(bytes)
}

fn read_string(input: &mut &[u8]) -> Result<String, RecordError> {
    Ok(String::from_utf8(read_bytes(input)?)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_event() -> Event {
        let mut electron = McParticle::new(11, [0.1, -0.2, 250.], 0.000511);
        electron.generator_status = 1;
        electron.simulator_status = 1 << 24;
        electron.vertex = [0., 0., 0.5];
        electron.endpoint = [1., 2., 3000.];
        electron.charge = -1.;
        electron.time = 0.25;
        electron.spin = [0., 0., 0.5];
        electron.color_flow = [0, 0];
        electron.parents = vec![0];
        Event {
            run_number: 7,
            event_number: 42,
            timestamp: 1_700_000_000_000_000_000,
            weight: 0.5,
            detector_name: "ILD_l5_v02".into(),
            parameters: vec![("ProcessName".into(), "Pe1e1h".into())],
            collections: vec![
                Collection::particles(
                    MC_PARTICLE,
                    vec![McParticle::new(25, [0., 0., 0.], 125.), electron],
                ),
                Collection {
                    name: "VXDCollection".into(),
                    data: CollectionData::Opaque {
                        type_name: "SimTrackerHit".into(),
                        payload: (0..=255).collect(),
                    },
                },
            ],
        }
    }

    #[test]
    fn events_survive_encoding() {
        let event = sample_event();
        let mut payload = Vec::new();
        encode_event(&event, &mut payload).unwrap();
        assert_eq!(decode_event(&payload).unwrap(), event);
    }

    #[test]
    fn truncated_payloads_are_rejected() {
        let mut payload = Vec::new();
        encode_event(&sample_event(), &mut payload).unwrap();
        for len in [0, 3, payload.len() / 2, payload.len() - 1] {
            let err = decode_event(&payload[..len]).unwrap_err();
            assert!(err.is_truncation(), "unexpected error at length {len}: {err}");
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut payload = Vec::new();
        encode_event(&sample_event(), &mut payload).unwrap();
        payload.extend_from_slice(&[0, 0]);
        assert!(matches!(
            decode_event(&payload),
            Err(RecordError::TrailingBytes(2))
        ));
    }

    #[test]
    fn bad_strings_are_rejected() {
        let mut payload = Vec::new();
        encode_event(&Event::default(), &mut payload).unwrap();
        // Detector name: length 1, invalid UTF-8 byte
        let name_offset = 4 + 4 + 8 + 8;
        payload.splice(name_offset..name_offset + 4, [0, 0, 0, 1, 0xff]);
        assert!(matches!(
            decode_event(&payload),
            Err(RecordError::InvalidString(_))
        ));
    }
}
