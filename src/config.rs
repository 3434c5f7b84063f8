//! Mechanism for loading and sharing the run configuration

use crate::{
    beams::Beams,
    boost::BoostDirection,
    momentum::{E, Z},
};

use clap::Parser;
use std::{ffi::OsString, path::PathBuf};
use tracing::info;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Boost all particles of event record files to match the HALHF beam conditions.",
    long_about = "Boost all particles of event record files to match the HALHF beam conditions.\n\n\
                  Each INPUT_FILE is rewritten into a new file with \"-boosted\" inserted before \
                  its extension. Existing files are never overwritten."
)]
pub struct Cli {
    /// Event record files to boost
    #[arg(required = true, value_name = "INPUT_FILE")]
    pub inputs: Vec<PathBuf>,
}

/// Run configuration
///
/// Only the list of input files comes from the command line. The beam
/// parameters are compile-time constants.
///
#[derive(Debug)]
pub struct Configuration {
    /// Files to be boosted, in processing order
    pub inputs: Vec<PathBuf>,

    /// Reference beams defining the lab frame
    pub beams: Beams,

    /// Direction in which events are boosted
    pub direction: BoostDirection,
}
//
impl Configuration {
    /// Build the configuration from command-line arguments (program name
    /// included), or explain what is wrong with them
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Ok(Self {
            inputs: cli.inputs,
            beams: Beams::halhf(),
            direction: BoostDirection::CenterOfMassToLab,
        })
    }

    /// Log the configuration
    pub fn print(&self) {
        info!(
            "Electron beam  : Pz = {} GeV, E = {} GeV",
            self.beams.electron[Z], self.beams.electron[E]
        );
        info!(
            "Positron beam  : Pz = {} GeV, E = {} GeV",
            self.beams.positron[Z], self.beams.positron[E]
        );
        info!("Boost          : {:?}", self.direction);
        info!("Input files    : {}", self.inputs.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{error::ErrorKind, CommandFactory};

    #[test]
    fn command_line_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn inputs_keep_their_order() {
        let cfg = Configuration::from_args(["boost_events", "b.slcio", "a.slcio"]).unwrap();
        assert_eq!(cfg.inputs, [PathBuf::from("b.slcio"), PathBuf::from("a.slcio")]);
        assert_eq!(cfg.beams, Beams::halhf());
        assert_eq!(cfg.direction, BoostDirection::CenterOfMassToLab);
    }

    #[test]
    fn at_least_one_input_is_required() {
        let err = Configuration::from_args(["boost_events"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn there_are_no_options() {
        let err = Configuration::from_args(["boost_events", "--force", "a.slcio"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
