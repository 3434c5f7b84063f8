//! Rewriting of event files with boosted particle momenta
//!
//! Each input file `dir/name.ext` produces `dir/name-boosted.ext`. Events are
//! streamed one at a time from input to output, so memory use does not depend
//! on file size. Existing files are never overwritten.

use crate::{
    boost::BeamBoost,
    momentum::{X, Y, Z},
    records::{Event, EventReader, EventWriter, RecordError, MC_PARTICLE},
};

use std::{
    io,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use thiserror::Error;
use tracing::{debug, error, info};

/// Text inserted between the file stem and extension of output files
pub const OUTPUT_SUFFIX: &str = "-boosted";

/// Ways in which rewriting a file can fail
///
/// All of them are fatal for the file being processed. Output written before
/// a read or write failure is left on disk as is.
///
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Cannot open input file {path}", path = path.display())]
    OpenInput {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    #[error("Output file {path} already exists, refusing to overwrite it", path = path.display())]
    OutputExists { path: PathBuf },

    #[error("Cannot create output file {path}", path = path.display())]
    CreateOutput {
        path: PathBuf,
        #[source]
        source: RecordError,
    },

    #[error("Failed to read event #{index} from {path}", path = path.display())]
    Read {
        path: PathBuf,
        index: usize,
        #[source]
        source: RecordError,
    },

    #[error("Failed to write event #{index} to {path}", path = path.display())]
    Write {
        path: PathBuf,
        index: usize,
        #[source]
        source: RecordError,
    },
}

/// What was done to a file
#[derive(Clone, Debug, PartialEq)]
pub struct RewriteSummary {
    /// File that was read
    pub input: PathBuf,

    /// File that was written
    pub output: PathBuf,

    /// Number of events written
    pub events: usize,

    /// Number of particles whose momentum was boosted
    pub particles: usize,

    /// Time spent on the file
    pub elapsed: Duration,
}

/// Name of the file which `input` is rewritten into
pub fn output_path_for(input: &Path) -> PathBuf {
    let mut file_name = input.file_stem().unwrap_or_default().to_os_string();
    file_name.push(OUTPUT_SUFFIX);
    if let Some(extension) = input.extension() {
        file_name.push(".");
        file_name.push(extension);
    }
    input.with_file_name(file_name)
}

/// Boost the momenta of the Monte Carlo particles of one event
///
/// Only the momentum is overwritten. The boosted energy is not stored, since
/// particle energies follow from their mass and momentum, and a boost leaves
/// the mass unchanged.
///
/// Returns the number of particles that were boosted.
///
pub fn boost_event(event: &mut Event, boost: &BeamBoost) -> usize {
    let mut num_particles = 0;
    for particle in event.particles_mut(MC_PARTICLE) {
        let boosted = boost.boost(&particle.four_momentum());
        particle.set_momentum([boosted[X], boosted[Y], boosted[Z]]);
        num_particles += 1;
    }
    num_particles
}

/// Boost every event of a file into a new `-boosted` file
pub fn rewrite_file(input: &Path, boost: &BeamBoost) -> Result<RewriteSummary, RewriteError> {
    let start_time = Instant::now();
    let open_error = |source| RewriteError::OpenInput {
        path: input.to_owned(),
        source,
    };

    // Counting events walks the whole file, so a corrupt frame structure is
    // caught before any output is created
    let mut reader = EventReader::open(input).map_err(open_error)?;
    let num_events = reader.event_count().map_err(open_error)?;
    info!("{}: {} events", input.display(), num_events);

    let output = output_path_for(input);
    info!("Will write: {}", output.display());
    let mut writer = EventWriter::create_new(&output).map_err(|source| match source {
        RecordError::Io(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            RewriteError::OutputExists {
                path: output.clone(),
            }
        }
        source => RewriteError::CreateOutput {
            path: output.clone(),
            source,
        },
    })?;

    // Events are read as owned values, modified in place, and dropped as soon
    // as they have been written out
    let mut num_particles = 0;
    loop {
        let index = writer.events_written();
        let event = reader.read_next_event().map_err(|source| RewriteError::Read {
            path: reader.path().to_owned(),
            index,
            source,
        })?;
        let Some(mut event) = event else {
            break;
        };
        debug!("Event {} (#{} in run {})", index, event.event_number, event.run_number);

        num_particles += boost_event(&mut event, boost);
        writer.write_event(&event).map_err(|source| RewriteError::Write {
            path: writer.path().to_owned(),
            index,
            source,
        })?;
    }

    let index = writer.events_written();
    let num_events = writer.finish().map_err(|source| RewriteError::Write {
        path: output.clone(),
        index,
        source,
    })?;
    Ok(RewriteSummary {
        input: input.to_owned(),
        output,
        events: num_events,
        particles: num_particles,
        elapsed: start_time.elapsed(),
    })
}

/// Rewrite several files in order
///
/// Processing stops at the first file that fails: files which come after it
/// are left untouched, and outputs of the files before it are kept.
///
pub fn rewrite_files<P: AsRef<Path>>(
    inputs: &[P],
    boost: &BeamBoost,
) -> Result<Vec<RewriteSummary>, RewriteError> {
    let mut summaries = Vec::with_capacity(inputs.len());
    for (file_idx, input) in inputs.iter().enumerate() {
        let input = input.as_ref();
        match rewrite_file(input, boost) {
            Ok(summary) => {
                info!(
                    "Wrote {} events ({} particles) to {} in {:.3?}",
                    summary.events,
                    summary.particles,
                    summary.output.display(),
                    summary.elapsed
                );
                summaries.push(summary);
            }
            Err(e) => {
                let skipped = inputs.len() - file_idx - 1;
                error!("Aborting on {}, skipping {} remaining file(s)", input.display(), skipped);
                return Err(e);
            }
        }
    }
    Ok(summaries)
}
