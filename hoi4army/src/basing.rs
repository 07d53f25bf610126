//! Where converted formations are placed.
//!
//! A source formation's declared location translates to a list of
//! destination candidates. Navies sitting in a land province must move to a
//! port, or failing that to open water next to one of the candidates. Air
//! wings search outward from their army for the nearest friendly air base.

use crate::force::Basing;
use graph_search::Bfs;
use hoi4data::{AdjacencyGraph, LocationMapping, ProvinceId, Provinces, SourceFormation};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How one candidate is chosen when several are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasingStrategy {
    /// Always the first candidate.
    First,
    /// Uniform choice from a fixed seed.
    Seeded,
    /// Uniform choice, seeded from the OS.
    #[default]
    Random,
}

impl FromStr for BasingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(BasingStrategy::First),
            "seeded" => Ok(BasingStrategy::Seeded),
            "random" => Ok(BasingStrategy::Random),
            other => Err(format!(
                "unknown basing strategy '{}' (expected first, seeded or random)",
                other
            )),
        }
    }
}

/// Chooses among basing candidates. One picker serves the whole run.
#[derive(Debug)]
pub struct CandidatePicker {
    rng: Option<StdRng>,
}

impl CandidatePicker {
    pub fn new(strategy: BasingStrategy, seed: u64) -> Self {
        let rng = match strategy {
            BasingStrategy::First => None,
            BasingStrategy::Seeded => Some(StdRng::seed_from_u64(seed)),
            BasingStrategy::Random => Some(StdRng::from_entropy()),
        };
        Self { rng }
    }

    /// Deterministic picker that always takes the first candidate.
    pub fn first() -> Self {
        Self { rng: None }
    }

    pub fn pick(&mut self, candidates: &[ProvinceId]) -> Option<ProvinceId> {
        match &mut self.rng {
            None => candidates.first().copied(),
            Some(rng) => candidates.choose(rng).copied(),
        }
    }
}

/// Candidates for a navy whose declared location is inland.
///
/// Candidates with a naval base win. Otherwise every neighbour of a
/// candidate that is not an imported province is taken as open sea.
pub fn port_candidates(
    candidates: &[ProvinceId],
    provinces: &Provinces,
    adjacency: &AdjacencyGraph,
) -> Vec<ProvinceId> {
    let ports: Vec<ProvinceId> = candidates
        .iter()
        .copied()
        .filter(|&id| provinces.get(id).is_some_and(|p| p.has_naval_base()))
        .collect();
    if !ports.is_empty() {
        return ports;
    }

    let mut sea = Vec::new();
    for &candidate in candidates {
        for &neighbor in adjacency.neighbors(candidate) {
            if !provinces.contains(neighbor) && !sea.contains(&neighbor) {
                sea.push(neighbor);
            }
        }
    }
    sea
}

/// Decide where a converted formation is placed.
pub fn resolve_basing(
    formation: &SourceFormation,
    locations: &LocationMapping,
    provinces: &Provinces,
    adjacency: &AdjacencyGraph,
    picker: &mut CandidatePicker,
) -> Basing {
    let mapped = locations.candidates(formation.location);
    if mapped.is_empty() {
        log::warn!(
            "Could not map source province {} for {}, placing it in the production queue",
            formation.location,
            formation.name
        );
        return Basing::ProductionQueue;
    }

    let on_land = provinces.get(mapped[0]).is_some_and(|p| p.is_land);
    let candidates = if formation.navy && !formation.at_sea && on_land {
        let ports = port_candidates(mapped, provinces, adjacency);
        if ports.is_empty() {
            log::warn!(
                "Could not find a port or open sea for navy {} near source province {}, placing it in the production queue",
                formation.name,
                formation.location
            );
            return Basing::ProductionQueue;
        }
        ports
    } else {
        mapped.to_vec()
    };

    match picker.pick(&candidates) {
        Some(id) if formation.navy || provinces.contains(id) => Basing::Province(id),
        Some(id) => {
            log::debug!(
                "Army {} maps to province {} which is not an imported province, placing it in the production queue",
                formation.name,
                id
            );
            Basing::ProductionQueue
        }
        None => Basing::ProductionQueue,
    }
}

/// Nearest province, in breadth-first order from `start` (inclusive), that
/// `tag` owns and that has an air base.
pub fn air_location(
    start: ProvinceId,
    tag: &str,
    provinces: &Provinces,
    adjacency: &AdjacencyGraph,
) -> Option<ProvinceId> {
    Bfs::find_first(adjacency, start, &(), |id| {
        provinces
            .get(id)
            .is_some_and(|p| p.is_owned_by(tag) && p.air_base > 0)
    })
}
