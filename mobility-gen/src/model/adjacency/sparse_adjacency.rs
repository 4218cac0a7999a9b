use super::{index_edges, Reachability, SegmentEdge};
use crate::model::TrajectoryError;
use std::collections::{HashMap, HashSet};

/// set-of-successors reachability with the same boundary semantics as
/// [`super::AdjacencyMatrix`], using memory proportional to the edge count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseAdjacency {
    max_index: usize,
    successors: HashMap<usize, HashSet<usize>>,
}

impl SparseAdjacency {
    pub fn build(edges: &[SegmentEdge]) -> Result<SparseAdjacency, TrajectoryError> {
        let (max_index, indexed) = index_edges(edges)?;
        let mut successors: HashMap<usize, HashSet<usize>> = HashMap::new();
        for (o, d) in indexed {
            successors.entry(o).or_default().insert(d);
        }
        Ok(SparseAdjacency {
            max_index,
            successors,
        })
    }

    /// the out-neighbors of a segment index, if it has any
    pub fn get_successors(&self, origin: usize) -> Option<&HashSet<usize>> {
        self.successors.get(&origin)
    }

    pub fn n_edges(&self) -> usize {
        self.successors.values().map(|s| s.len()).sum()
    }
}

impl Reachability for SparseAdjacency {
    fn max_index(&self) -> usize {
        self.max_index
    }

    fn is_reachable(&self, origin: usize, destination: usize) -> bool {
        let boundary = self.boundary_index();
        if origin >= boundary || destination >= boundary {
            return true;
        }
        self.get_successors(origin)
            .map(|s| s.contains(&destination))
            .unwrap_or(false)
    }
}
