//! Client for a game-jam content API.
//!
//! The remote service stores everything as generic "nodes" addressed by
//! numeric id and encodes repeating metadata sub-records as flat, indexed
//! keys. This crate resolves a game slug to its node, reconstructs typed
//! metadata from the flat encoding ([`meta`]), fetches the referenced author
//! nodes concurrently while preserving request order ([`authors`]), and
//! assembles the resolved [`Game`].

pub mod api;
pub mod authors;
pub mod client;
pub mod config;
pub mod errors;
pub mod meta;
pub mod protocol;
pub mod types;

pub use api::Api;
pub use client::{NodeClient, NodeFetcher};
pub use config::Config;
pub use errors::{ApiError, MetaError};
pub use types::{Author, Game, GameLink};
