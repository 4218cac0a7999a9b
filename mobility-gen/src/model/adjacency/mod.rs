mod adjacency_constraint;
mod adjacency_matrix;
mod adjacency_representation;
mod reachability;
mod sparse_adjacency;

pub use adjacency_constraint::AdjacencyConstraint;
pub use adjacency_matrix::AdjacencyMatrix;
pub use adjacency_representation::AdjacencyRepresentation;
pub use reachability::Reachability;
pub use sparse_adjacency::SparseAdjacency;

use crate::model::TrajectoryError;
use mobility_core::model::SegmentId;

/// a directed transition between two road segments (an OD pair)
pub type SegmentEdge = (SegmentId, SegmentId);

/// converts edges into dense indices and finds the maximum index `M` over all
/// origins and destinations.
///
/// # Returns
///
/// * the largest index and the edges as (origin, destination) indices, or an
///   error if there are no edges or an id cannot be addressed
pub(crate) fn index_edges(
    edges: &[SegmentEdge],
) -> Result<(usize, Vec<(usize, usize)>), TrajectoryError> {
    let as_index = |id: &SegmentId| {
        id.as_index()
            .ok_or(TrajectoryError::UnaddressableSegment(*id))
    };
    let indexed = edges
        .iter()
        .map(|(o, d)| -> Result<(usize, usize), TrajectoryError> {
            Ok((as_index(o)?, as_index(d)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let max_index = indexed
        .iter()
        .map(|(o, d)| *o.max(d))
        .max()
        .ok_or(TrajectoryError::EmptyEdgeSet)?;
    if max_index == usize::MAX {
        return Err(TrajectoryError::UnaddressableSegment(SegmentId(
            max_index as u64,
        )));
    }
    Ok((max_index, indexed))
}
