use super::{ReferenceRoute, RouterError};
use mobility_core::model::Coordinate;
use std::sync::Arc;

/// point-to-point routing service used as ground truth for route quality.
/// implementations wrap a mapping API and may be queried from several
/// threads at once.
pub trait ReferenceRouter: Send + Sync {
    fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<ReferenceRoute, RouterError>;
}

impl<R: ReferenceRouter + ?Sized> ReferenceRouter for Arc<R> {
    fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<ReferenceRoute, RouterError> {
        (**self).route(origin, destination)
    }
}

impl<R: ReferenceRouter + ?Sized> ReferenceRouter for Box<R> {
    fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<ReferenceRoute, RouterError> {
        (**self).route(origin, destination)
    }
}
