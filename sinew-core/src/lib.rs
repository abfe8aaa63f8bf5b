//! Connectivity pattern generators for neuron populations.
//!
//! A [`Population`] describes the index domain of one side of a projection.
//! A generator implementing [`Connector`] turns a pre and a post population
//! into a [`Connection`]: paired pre/post index arrays, optional per-edge
//! weights and the reported population sizes.
//!
//! # Examples
//! ```
//! use sinew_core::{GridFour, Population};
//!
//! let sheet = Population::grid(3, 3);
//! let connection = GridFour::default().connect_within(&sheet)?;
//! assert_eq!(connection.len(), 24);
//! let fan_out = connection.pre_to_post();
//! assert_eq!(fan_out.neighbours(4), &[1, 7, 3, 5]);
//! # Ok::<(), sinew_core::ConnectError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod connect;
mod connection;
mod error;
mod geometry;
mod population;
mod rng;
#[cfg(test)]
mod test_utils;

pub use crate::{
    connect::{
        All2All, Connector, Degree, Dog, FixedPostNum, FixedPreNum, FixedProb, GaussianProb,
        GaussianWeight, GridEight, GridFour, GridN, One2One, ScaleFree, SmallWorld,
    },
    connection::{Adjacency, ConnMatrix, Connection, Edge},
    error::{ConnectError, ConnectErrorCode, Result},
    geometry::{Lattice, squared_distance},
    population::{Population, Shape},
};
