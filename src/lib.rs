//! Pokedex catalog pipeline over the PokeAPI.
//!
//! The crate is the data side of a catalog viewer: it fetches the creature
//! list, enriches every entry with its detail record through an unbounded
//! concurrent fan-out, caches the result with a staleness window and
//! request de-duplication, derives filtered/sorted table views as a pure
//! function, and aggregates per-entry detail (species metadata plus the
//! evolution lineage) for the detail screen. Presentation and routing stay
//! outside; the `pokedex` binary is a thin terminal front-end.

pub mod aggregate;
pub mod cache;
pub mod domain;
pub mod enrich;
pub mod error;
pub mod output;
pub mod pokeapi;
pub mod view;
