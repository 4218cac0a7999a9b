use super::{AdjacencyMatrix, AdjacencyRepresentation, Reachability, SegmentEdge, SparseAdjacency};
use crate::model::TrajectoryError;

/// the structural prior over road segment transitions exposed to the sampler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdjacencyConstraint {
    Dense(AdjacencyMatrix),
    Sparse(SparseAdjacency),
}

impl AdjacencyConstraint {
    pub fn build(
        edges: &[SegmentEdge],
        representation: &AdjacencyRepresentation,
    ) -> Result<AdjacencyConstraint, TrajectoryError> {
        let constraint = match representation {
            AdjacencyRepresentation::Dense => AdjacencyMatrix::build(edges).map(Self::Dense),
            AdjacencyRepresentation::Sparse => SparseAdjacency::build(edges).map(Self::Sparse),
        }?;
        log::debug!(
            "built {representation} adjacency constraint from {} edges with boundary index {}",
            edges.len(),
            constraint.boundary_index()
        );
        Ok(constraint)
    }
}

impl Reachability for AdjacencyConstraint {
    fn max_index(&self) -> usize {
        match self {
            AdjacencyConstraint::Dense(m) => m.max_index(),
            AdjacencyConstraint::Sparse(s) => s.max_index(),
        }
    }

    fn is_reachable(&self, origin: usize, destination: usize) -> bool {
        match self {
            AdjacencyConstraint::Dense(m) => m.is_reachable(origin, destination),
            AdjacencyConstraint::Sparse(s) => s.is_reachable(origin, destination),
        }
    }
}
