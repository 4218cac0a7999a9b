mod geometry_lookup;
mod road_network;

pub use geometry_lookup::GeometryLookup;
pub use road_network::RoadNetwork;
