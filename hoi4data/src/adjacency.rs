use crate::error::DataError;
use crate::provinces::ProvinceId;
use graph_search::Graph;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Graph of province adjacencies.
///
/// Edges are directed and keep their insertion order, so searches over the
/// graph visit neighbours in the order the map data lists them. Ids in the
/// graph that are not imported provinces stand for sea zones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyGraph {
    /// Map of province ID to list of adjacent province IDs
    adjacencies: HashMap<ProvinceId, Vec<ProvinceId>>,
}

impl AdjacencyGraph {
    /// Create a new empty adjacency graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directed edge. Duplicate edges are ignored.
    pub fn add_edge(&mut self, from: ProvinceId, to: ProvinceId) {
        let list = self.adjacencies.entry(from).or_default();
        if !list.contains(&to) {
            list.push(to);
        }
    }

    /// Add a bidirectional adjacency between two provinces.
    pub fn add_adjacency(&mut self, p1: ProvinceId, p2: ProvinceId) {
        self.add_edge(p1, p2);
        self.add_edge(p2, p1);
    }

    /// Neighbours of a province; empty for ids without an adjacency entry.
    pub fn neighbors(&self, province: ProvinceId) -> &[ProvinceId] {
        self.adjacencies
            .get(&province)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of provinces with an adjacency entry.
    pub fn province_count(&self) -> usize {
        self.adjacencies.len()
    }
}

impl Graph<ProvinceId, ()> for AdjacencyGraph {
    fn neighbors(&self, node: ProvinceId, _context: &()) -> Vec<ProvinceId> {
        AdjacencyGraph::neighbors(self, node).to_vec()
    }
}

impl FromIterator<(ProvinceId, Vec<ProvinceId>)> for AdjacencyGraph {
    fn from_iter<I: IntoIterator<Item = (ProvinceId, Vec<ProvinceId>)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (from, targets) in iter {
            for to in targets {
                graph.add_edge(from, to);
            }
        }
        graph
    }
}

/// Load directed edges from a `From;To` CSV.
///
/// Rows starting with `#` are comments; a header row and extra columns are
/// tolerated. Rows whose ids do not parse are skipped with a warning.
pub fn load_adjacencies_csv(path: &Path) -> Result<AdjacencyGraph, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .comment(Some(b'#'))
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut graph = AdjacencyGraph::new();
    let mut skipped = 0usize;

    for (line, result) in reader.records().enumerate() {
        let record = result?;
        let from = record.get(0).and_then(|s| s.trim().parse::<ProvinceId>().ok());
        let to = record.get(1).and_then(|s| s.trim().parse::<ProvinceId>().ok());
        match (from, to) {
            (Some(from), Some(to)) => graph.add_edge(from, to),
            _ if line == 0 => {} // header
            _ => {
                skipped += 1;
                log::warn!("Skipping malformed adjacency row {} in {:?}", line + 1, path);
            }
        }
    }

    log::info!(
        "Loaded adjacencies for {} provinces from {:?} ({} rows skipped)",
        graph.province_count(),
        path,
        skipped
    );
    Ok(graph)
}
