//! Command-line interface for generating connectivity.
//!
//! `sinew generate <generator>` builds `range` or `grid` populations from the
//! requested shapes, runs one generator and renders the resulting edge list.

mod commands;
mod shape;

pub use commands::{
    Cli, CliError, Command, CommonArgs, DegreeArgs, DogArgs, FixedProbArgs, GaussianProbArgs,
    GaussianWeightArgs, Generator, GenerationReport, GridNArgs, OutputFormat, SelfPolicyArgs,
    render_report, run_cli,
};
pub use shape::{PopulationShape, ShapeParseError};
