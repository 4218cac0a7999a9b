use crate::model::vocabulary::TokenValue;

/// structural query answered by every adjacency representation.
///
/// indices `0..=M` address road segments by id, where `M` is the largest id
/// found in any edge. index `M + 1` is the boundary, an implicit state
/// outside of the known graph which is reachable from, and can reach, every
/// index. any index beyond the boundary is treated as the boundary.
pub trait Reachability {
    /// the largest segment index `M` that appears in an edge
    fn max_index(&self) -> usize;

    /// true if a transition from `origin` to `destination` is structurally legal
    fn is_reachable(&self, origin: usize, destination: usize) -> bool;

    fn boundary_index(&self) -> usize {
        self.max_index() + 1
    }

    /// the matrix index for a decoded token. the end-of-sequence marker and
    /// segments outside of the edge range both map to the boundary.
    fn index_of(&self, value: &TokenValue) -> usize {
        match value {
            TokenValue::EndOfSequence => self.boundary_index(),
            TokenValue::Segment(id) => id
                .as_index()
                .filter(|idx| *idx <= self.max_index())
                .unwrap_or_else(|| self.boundary_index()),
        }
    }
}
