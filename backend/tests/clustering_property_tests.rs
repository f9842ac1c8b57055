//! Property tests for marker clustering.

use proptest::prelude::*;
use relief_map::algorithms::SpatialClusterer;
use relief_map::models::Coordinates;

// Dense neighborhoods so merges actually happen at fine zooms.
fn neighborhood() -> impl Strategy<Value = Vec<Coordinates>> {
    prop::collection::vec(
        (34.0f64..34.02, -118.02f64..-118.0).prop_map(|(lat, lon)| Coordinates::new(lat, lon)),
        0..80,
    )
}

proptest! {
    #[test]
    fn prop_clustering_is_deterministic(points in neighborhood(), zoom in -2i32..25) {
        let clusterer = SpatialClusterer::default();
        let a = clusterer.cluster(&points, zoom);
        let b = clusterer.cluster(&points, zoom);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_every_point_lands_in_exactly_one_cluster(points in neighborhood(), zoom in -2i32..25) {
        let clusters = SpatialClusterer::default().cluster(&points, zoom);
        let total: usize = clusters.iter().map(|c| c.len()).sum();
        prop_assert_eq!(total, points.len());
        prop_assert!(clusters.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn prop_single_member_centroid_is_the_member(points in neighborhood(), zoom in 7i32..25) {
        for cluster in SpatialClusterer::default().cluster(&points, zoom) {
            if let Some(only) = cluster.single() {
                prop_assert_eq!(cluster.centroid(), *only);
            }
        }
    }

    #[test]
    fn prop_centroid_is_mean_of_members(points in neighborhood(), zoom in -2i32..25) {
        for cluster in SpatialClusterer::default().cluster(&points, zoom) {
            let n = cluster.len() as f64;
            let lat = cluster.members().iter().map(|p| p.latitude).sum::<f64>() / n;
            let lon = cluster.members().iter().map(|p| p.longitude).sum::<f64>() / n;
            prop_assert!((cluster.centroid().latitude - lat).abs() < 1e-9);
            prop_assert!((cluster.centroid().longitude - lon).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_coarse_zoom_yields_at_most_one_cluster(points in neighborhood(), zoom in -10i32..7) {
        let clusters = SpatialClusterer::default().cluster(&points, zoom);
        prop_assert_eq!(clusters.len(), usize::from(!points.is_empty()));
        for zoom_fine in [10, 20] {
            prop_assert!(SpatialClusterer::default().cluster(&points, zoom_fine).len() >= clusters.len());
        }
    }
}
