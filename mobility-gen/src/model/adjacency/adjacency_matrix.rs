use super::{index_edges, Reachability, SegmentEdge};
use crate::model::TrajectoryError;
use kdam::tqdm;

/// dense, boundary-padded reachability matrix of shape `(M+2)×(M+2)`.
///
/// cells `[o][d]` for `o, d <= M` are true iff the edge `o -> d` was provided.
/// the final row and final column are the boundary and are entirely true.
/// memory grows with `M²`, which is acceptable at city scale; see
/// [`super::SparseAdjacency`] for larger networks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    dimension: usize,
    /// row-major cells
    cells: Box<[bool]>,
}

impl AdjacencyMatrix {
    /// builds the matrix from directed OD pairs. no self-loops are added and
    /// no symmetry is assumed.
    ///
    /// # Arguments
    ///
    /// * `edges` - directed (origin, destination) pairs
    ///
    /// # Returns
    ///
    /// * the padded matrix, or an error if `edges` is empty
    pub fn build(edges: &[SegmentEdge]) -> Result<AdjacencyMatrix, TrajectoryError> {
        let (max_index, indexed) = index_edges(edges)?;
        let dimension = max_index + 2;
        let too_large = || {
            TrajectoryError::InvalidInput(format!(
                "dense adjacency matrix of dimension {dimension} cannot be allocated, \
                 use adjacency = \"sparse\" for networks with large segment ids"
            ))
        };
        let n_cells = dimension.checked_mul(dimension).ok_or_else(too_large)?;
        let mut cells: Vec<bool> = Vec::new();
        cells
            .try_reserve_exact(n_cells)
            .map_err(|_| too_large())?;
        cells.resize(n_cells, false);
        let edges_iter = tqdm!(
            indexed.into_iter(),
            desc = "building adjacency matrix",
            total = edges.len()
        );
        for (o, d) in edges_iter {
            cells[o * dimension + d] = true;
        }

        // boundary row, then boundary column
        let boundary = dimension - 1;
        for col in 0..dimension {
            cells[boundary * dimension + col] = true;
        }
        for row in 0..dimension {
            cells[row * dimension + boundary] = true;
        }

        Ok(AdjacencyMatrix {
            dimension,
            cells: cells.into_boxed_slice(),
        })
    }

    /// (rows, columns) of the matrix, always square
    pub fn shape(&self) -> (usize, usize) {
        (self.dimension, self.dimension)
    }

    pub fn get(&self, origin: usize, destination: usize) -> Option<bool> {
        if origin >= self.dimension || destination >= self.dimension {
            None
        } else {
            Some(self.cells[origin * self.dimension + destination])
        }
    }

    pub fn row(&self, origin: usize) -> Option<&[bool]> {
        if origin >= self.dimension {
            None
        } else {
            let start = origin * self.dimension;
            Some(&self.cells[start..start + self.dimension])
        }
    }

    pub fn column(&self, destination: usize) -> Option<Vec<bool>> {
        if destination >= self.dimension {
            None
        } else {
            Some(
                (0..self.dimension)
                    .map(|row| self.cells[row * self.dimension + destination])
                    .collect(),
            )
        }
    }
}

impl Reachability for AdjacencyMatrix {
    fn max_index(&self) -> usize {
        self.dimension - 2
    }

    fn is_reachable(&self, origin: usize, destination: usize) -> bool {
        let boundary = self.boundary_index();
        self.get(origin.min(boundary), destination.min(boundary))
            .unwrap_or(true)
    }
}
