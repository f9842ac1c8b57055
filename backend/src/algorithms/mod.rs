pub mod clustering;

pub use clustering::{cluster_entities, Cluster, ClusterPreview, Locate, SpatialClusterer, ZoomThresholds};
