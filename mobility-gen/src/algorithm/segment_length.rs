use crate::model::{network::GeometryLookup, trajectory::Trajectory};
use itertools::Itertools;
use mobility_core::model::SegmentId;

/// physical length of a trajectory path (origin plus sampled segments), in meters.
///
/// each distinct segment on the path contributes its length once. segments
/// missing from the lookup are skipped without error, so the result is a
/// lower bound whenever the lookup is incomplete.
///
/// # Arguments
///
/// * `trajectory` - sampled trajectory
/// * `lookup` - segment geometry source
///
/// # Returns
///
/// * total length of the known segments on the path
pub fn trajectory_length<L>(trajectory: &Trajectory, lookup: &L) -> f64
where
    L: GeometryLookup + ?Sized,
{
    sum_distinct(trajectory.path(), lookup)
}

/// same as [`trajectory_length`] for a bare sequence of segment ids
pub fn segments_length<L>(segments: &[SegmentId], lookup: &L) -> f64
where
    L: GeometryLookup + ?Sized,
{
    sum_distinct(segments.iter(), lookup)
}

fn sum_distinct<'a, I, L>(ids: I, lookup: &L) -> f64
where
    I: Iterator<Item = &'a SegmentId>,
    L: GeometryLookup + ?Sized,
{
    let mut missing = 0;
    let total: f64 = ids
        .unique()
        .filter_map(|id| {
            let length = lookup.segment_length(id);
            if length.is_none() {
                missing += 1;
            }
            length
        })
        .sum();
    if missing > 0 {
        log::debug!("{missing} segment(s) had no known length and were skipped");
    }
    total
}
