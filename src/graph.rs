use std::{collections::VecDeque, fmt::Display};

use itertools::Itertools;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    error::NetworkError,
    utils::{FxIndexMap, FxIndexSet},
};

/// A directed graph over string identifiers, stored as an adjacency map.
///
/// Every identifier appearing as a successor is also a key of the map.
/// Both vertices and successor sets keep their insertion order,
/// so traversal results are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: FxIndexMap<String, FxIndexSet<String>>,
}

impl Graph {
    pub fn new() -> Graph {
        Graph::default()
    }

    /// Adds a vertex with no successors. Does nothing if the vertex exists.
    pub fn add_vertex(&mut self, vertex: &str) {
        if !self.adjacency.contains_key(vertex) {
            self.adjacency.insert(vertex.to_owned(), FxIndexSet::default());
        }
    }

    /// Adds the edge `from -> to`, creating missing endpoints.
    /// Adding an existing edge again has no effect.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_vertex(from);
        self.add_vertex(to);
        if let Some(successors) = self.adjacency.get_mut(from) {
            successors.insert(to.to_owned());
        }
    }

    pub fn contains(&self, vertex: &str) -> bool {
        self.adjacency.contains_key(vertex)
    }

    /// Iterates over the vertices in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.adjacency.keys().map(String::as_str)
    }

    /// Returns the number of vertices and the number of edges.
    pub fn size(&self) -> (usize, usize) {
        (
            self.adjacency.len(),
            self.adjacency.values().map(FxIndexSet::len).sum(),
        )
    }

    /// The direct out-neighbours of the vertex. Empty for an unknown vertex.
    pub fn successors(&self, vertex: &str) -> Vec<&str> {
        self.adjacency
            .get(vertex)
            .map(|successors| successors.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The direct in-neighbours of the vertex. Empty for an unknown vertex.
    ///
    /// No reverse index is kept, so this scans every successor set.
    pub fn predecessors(&self, vertex: &str) -> Vec<&str> {
        self.adjacency
            .iter()
            .filter(|(_, successors)| successors.contains(vertex))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    pub fn out_degree(&self, vertex: &str) -> usize {
        self.adjacency.get(vertex).map_or(0, FxIndexSet::len)
    }

    pub fn in_degree(&self, vertex: &str) -> usize {
        self.adjacency
            .values()
            .filter(|successors| successors.contains(vertex))
            .count()
    }

    /// Breadth-first search from `start`.
    /// Returns every reachable vertex with its distance in edges, in discovery order.
    /// The start vertex itself is the first entry, at distance 0.
    pub fn reachable_with_dist(&self, start: &str) -> Result<Vec<(String, usize)>, NetworkError> {
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return Err(NetworkError::VertexNotFound(start.to_owned()));
        };

        let mut visited: FxHashSet<&str> = FxHashSet::default();
        let mut queue = VecDeque::from([(start.as_str(), 0)]);
        visited.insert(start.as_str());
        let mut res = Vec::new();

        while let Some((vertex, dist)) = queue.pop_front() {
            res.push((vertex.to_owned(), dist));
            for next in &self.adjacency[vertex] {
                if visited.insert(next.as_str()) {
                    queue.push_back((next.as_str(), dist + 1));
                }
            }
        }
        Ok(res)
    }

    /// Finds a path with the fewest edges from `start` to `end`, both included.
    /// Returns `None` if `end` cannot be reached.
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<Option<Vec<String>>, NetworkError> {
        let Some((start, _)) = self.adjacency.get_key_value(start) else {
            return Err(NetworkError::VertexNotFound(start.to_owned()));
        };
        if start == end {
            return Ok(Some(vec![start.clone()]));
        }

        // Maps each discovered vertex to the vertex it was discovered from.
        let mut parents: FxHashMap<&str, &str> = FxHashMap::default();
        let mut queue = VecDeque::from([start.as_str()]);

        while let Some(vertex) = queue.pop_front() {
            for next in &self.adjacency[vertex] {
                if next == start || parents.contains_key(next.as_str()) {
                    continue;
                }
                parents.insert(next.as_str(), vertex);
                if next == end {
                    return Ok(Some(Self::trace_back(&parents, start, next)));
                }
                queue.push_back(next.as_str());
            }
        }
        Ok(None)
    }

    fn trace_back(parents: &FxHashMap<&str, &str>, start: &str, end: &str) -> Vec<String> {
        let mut path = vec![end.to_owned()];
        let mut current = end;
        while current != start {
            current = parents[current];
            path.push(current.to_owned());
        }
        path.reverse();
        path
    }

    /// Prints every vertex with its successors to stdout.
    pub fn print_graph(&self) {
        print!("{self}");
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (vertex, successors) in &self.adjacency {
            writeln!(f, "{vertex} -> [{}]", successors.iter().join(", "))?;
        }
        Ok(())
    }
}
