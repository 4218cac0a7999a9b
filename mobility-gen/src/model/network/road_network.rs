use super::GeometryLookup;
use crate::model::{
    adjacency::{AdjacencyConstraint, AdjacencyRepresentation, SegmentEdge},
    trajectory::Trajectory,
    vocabulary::GraphVocabulary,
    TrajectoryError,
};
use mobility_core::model::{Coordinate, RoadSegment, SegmentId};
use std::collections::HashMap;

/// the road segments of a city network and the directed transitions between
/// them, as supplied by an upstream topology loader.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    segments: HashMap<SegmentId, RoadSegment>,
    edges: Vec<SegmentEdge>,
}

impl RoadNetwork {
    /// creates a network, confirming that segment ids are unique and that
    /// every edge connects two known segments.
    pub fn new(
        segments: Vec<RoadSegment>,
        edges: Vec<SegmentEdge>,
    ) -> Result<RoadNetwork, TrajectoryError> {
        let mut lookup: HashMap<SegmentId, RoadSegment> = HashMap::with_capacity(segments.len());
        for segment in segments {
            let id = segment.id;
            if lookup.insert(id, segment).is_some() {
                return Err(TrajectoryError::DuplicateSegment(id));
            }
        }
        if let Some((o, d)) = edges
            .iter()
            .find(|(o, d)| !lookup.contains_key(o) || !lookup.contains_key(d))
        {
            return Err(TrajectoryError::DanglingEdge(*o, *d));
        }
        log::info!(
            "loaded road network with {} segments and {} edges",
            lookup.len(),
            edges.len()
        );
        Ok(RoadNetwork {
            segments: lookup,
            edges,
        })
    }

    pub fn n_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[SegmentEdge] {
        &self.edges
    }

    pub fn get_segment(&self, id: &SegmentId) -> Result<&RoadSegment, TrajectoryError> {
        self.segments
            .get(id)
            .ok_or(TrajectoryError::MissingSegment(*id))
    }

    /// builds the token vocabulary over every segment of the network
    pub fn vocabulary(&self) -> Result<GraphVocabulary, TrajectoryError> {
        GraphVocabulary::build(self.segments.keys().copied())
    }

    /// builds the adjacency constraint over the network edges
    pub fn adjacency(
        &self,
        representation: &AdjacencyRepresentation,
    ) -> Result<AdjacencyConstraint, TrajectoryError> {
        AdjacencyConstraint::build(&self.edges, representation)
    }

    /// converts a trajectory into the sequence of positions a vehicle visits:
    /// the start coordinate of each segment along the path, followed by the
    /// end coordinate of the final segment.
    ///
    /// # Arguments
    ///
    /// * `trajectory` - trajectory to convert, including its origin
    ///
    /// # Returns
    ///
    /// * coordinates in travel order, or an error if a segment is unknown or
    ///   has no geometry
    pub fn coordinates(&self, trajectory: &Trajectory) -> Result<Vec<Coordinate>, TrajectoryError> {
        let mut result = Vec::with_capacity(trajectory.len() + 2);
        let mut last_end = None;
        for id in trajectory.path() {
            let segment = self.get_segment(id)?;
            let start = segment
                .start
                .ok_or(TrajectoryError::MissingCoordinates(*id))?;
            let end = segment.end.ok_or(TrajectoryError::MissingCoordinates(*id))?;
            result.push(start);
            last_end = Some(end);
        }
        result.extend(last_end);
        Ok(result)
    }
}

impl GeometryLookup for RoadNetwork {
    fn segment_length(&self, id: &SegmentId) -> Option<f64> {
        self.segments.segment_length(id)
    }
}
