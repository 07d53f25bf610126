//! # Army conversion core
//!
//! Turns each country's flat list of source armies and navies into the
//! destination game's force hierarchy.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐   ┌──────────────────┐
//! │ SourceRegiment  │──▶│ convert_regiment │──▶ Regiment (+ practicals)
//! └─────────────────┘   └──────────────────┘         │
//!                                                    ▼
//! ┌─────────────────┐   ┌──────────────────┐   ┌───────────────┐
//! │ SourceFormation │──▶│  resolve_basing  │──▶│ organize_land │──▶ ForceGroup
//! │   (location)    │   └──────────────────┘   │ organize_navy │
//! └─────────────────┘                          └───────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`ArmyConverter`] | Runs every formation of one country |
//! | [`CountryConversion`] | Per-country round-robin counters, practicals, air force numbering |
//! | [`ForceGroup`] | Node of the output hierarchy |
//! | [`Basing`] | Province a group is placed in, or the production queue |
//! | [`CandidatePicker`] | Chooses among equally valid basing candidates |
//! | [`ConverterConfig`] | Run-wide settings |
//!
//! Everything runs synchronously on one thread. The only source of
//! nondeterminism is the [`BasingStrategy::Random`] picker; use
//! [`BasingStrategy::First`] or [`BasingStrategy::Seeded`] for repeatable
//! output.

pub mod basing;
pub mod config;
pub mod country;
pub mod force;
pub mod organizer;
pub mod practicals;
pub mod regiment;
pub mod testing;

pub use basing::{BasingStrategy, CandidatePicker, air_location, port_candidates, resolve_basing};
pub use config::ConverterConfig;
pub use country::{
    ArmyConverter, ConversionReport, ConversionStats, CountryConversion, CountryForces, convert_world,
    convert_world_with,
};
pub use force::{Basing, ForceGroup, Members};
pub use organizer::{AirBaseRequirement, OrganizedArmy, ordinal_suffix, organize_land, organize_navy};
pub use practicals::Practicals;
pub use regiment::{Conversion, Regiment, TypeCounters, convert_regiment};
