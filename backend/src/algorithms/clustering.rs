//! Zoom-dependent marker clustering.
//!
//! A single greedy pass over the input: each point joins the **first**
//! existing cluster (in creation order) whose current centroid lies strictly
//! closer than the zoom threshold, otherwise it starts a new cluster. The
//! centroid is updated as a running mean on every assignment, so the result
//! depends on input order. Distances are planar in degree space, which is
//! what the threshold constants were tuned against.
//!
//! Cost is `O(n·k)` for `k` clusters, fine for the tens to hundreds of
//! markers in a viewport.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::models::{cluster_colors, Coordinates, LocatedEntity};

/// Anything that may carry a map position.
///
/// Returning `None` excludes the item from clustering.
pub trait Locate {
    fn position(&self) -> Option<Coordinates>;
}

impl Locate for LocatedEntity {
    fn position(&self) -> Option<Coordinates> {
        self.coordinates()
    }
}

impl Locate for Coordinates {
    fn position(&self) -> Option<Coordinates> {
        self.is_valid().then_some(*self)
    }
}

impl<T: Locate + ?Sized> Locate for &T {
    fn position(&self) -> Option<Coordinates> {
        (**self).position()
    }
}

/// Zoom tiers and their clustering radii in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomThresholds {
    /// Zoom levels below this merge without a distance limit.
    pub coarse_zoom_below: i32,
    /// Zoom levels at or above this use `fine_threshold_deg`.
    pub fine_zoom_from: i32,
    pub mid_threshold_deg: f64,
    pub fine_threshold_deg: f64,
}

impl Default for ZoomThresholds {
    fn default() -> Self {
        Self {
            coarse_zoom_below: 7,
            fine_zoom_from: 15,
            mid_threshold_deg: 0.002,
            fine_threshold_deg: 0.005,
        }
    }
}

impl ZoomThresholds {
    /// Clustering radius for a zoom level. Out-of-range zooms fall into the
    /// nearest tier.
    pub fn threshold_for(&self, zoom: i32) -> f64 {
        if zoom < self.coarse_zoom_below {
            f64::INFINITY
        } else if zoom < self.fine_zoom_from {
            self.mid_threshold_deg
        } else {
            self.fine_threshold_deg
        }
    }
}

/// Points grouped under one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "T: Serialize"))]
pub struct Cluster<'a, T> {
    centroid: Coordinates,
    members: Vec<&'a T>,
}

impl<'a, T> Cluster<'a, T> {
    fn seed(member: &'a T, at: Coordinates) -> Self {
        Self {
            centroid: at,
            members: vec![member],
        }
    }

    fn absorb(&mut self, member: &'a T, at: Coordinates) {
        let count = self.members.len() as f64;
        self.centroid = Coordinates::new(
            (self.centroid.latitude * count + at.latitude) / (count + 1.0),
            (self.centroid.longitude * count + at.longitude) / (count + 1.0),
        );
        self.members.push(member);
    }

    /// Running mean of member coordinates.
    pub fn centroid(&self) -> Coordinates {
        self.centroid
    }

    /// Members in assignment order.
    pub fn members(&self) -> &[&'a T] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    // Clusters are created with one member and only grow.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Two or more members.
    pub fn is_aggregate(&self) -> bool {
        self.members.len() > 1
    }

    /// The lone member of a single-member cluster.
    pub fn single(&self) -> Option<&'a T> {
        match self.members.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Whether the map draws this as a count bubble rather than the member's
    /// own marker: always below `aggregate_zoom_below`, otherwise only when
    /// there are several members.
    pub fn renders_as_aggregate(&self, zoom: i32, aggregate_zoom_below: i32) -> bool {
        zoom < aggregate_zoom_below || self.is_aggregate()
    }
}

/// First names of a cluster's members plus how many were left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterPreview<'a> {
    pub names: Vec<&'a str>,
    pub remaining: usize,
}

impl<'a> Cluster<'a, LocatedEntity> {
    pub fn preview(&self, limit: usize) -> ClusterPreview<'a> {
        let names = self
            .members
            .iter()
            .take(limit)
            .map(|&e| e.display_name())
            .collect::<Vec<_>>();
        ClusterPreview {
            remaining: self.members.len() - names.len(),
            names,
        }
    }

    /// Gradient stops for the cluster icon.
    pub fn colors(&self) -> Vec<&'static str> {
        cluster_colors(self.members.iter().copied())
    }
}

/// Greedy first-fit clusterer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpatialClusterer {
    thresholds: ZoomThresholds,
}

impl SpatialClusterer {
    pub fn new(thresholds: ZoomThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ZoomThresholds {
        &self.thresholds
    }

    /// Cluster `items` for a zoom level.
    ///
    /// # Arguments
    ///
    /// * `items` - Points in the order they should be assigned
    /// * `zoom` - Map zoom level, any integer
    ///
    /// # Returns
    ///
    /// Clusters in creation order. Items without a valid position are
    /// skipped.
    pub fn cluster<'a, T: Locate>(&self, items: &'a [T], zoom: i32) -> Vec<Cluster<'a, T>> {
        let threshold = self.thresholds.threshold_for(zoom);
        let mut clusters: Vec<Cluster<'a, T>> = Vec::new();
        let mut skipped = 0usize;

        for (index, item) in items.iter().enumerate() {
            let Some(at) = item.position() else {
                skipped += 1;
                debug!(index, "skipping item without valid coordinates");
                continue;
            };

            match clusters
                .iter_mut()
                .find(|c| c.centroid.planar_distance(&at) < threshold)
            {
                Some(cluster) => cluster.absorb(item, at),
                None => {
                    trace!(index, cluster = clusters.len(), "starting new cluster");
                    clusters.push(Cluster::seed(item, at));
                }
            }
        }

        debug!(
            zoom,
            threshold,
            input = items.len(),
            skipped,
            clusters = clusters.len(),
            "clustered markers"
        );
        clusters
    }
}

/// Cluster entities with the default zoom tiers.
pub fn cluster_entities(entities: &[LocatedEntity], zoom: i32) -> Vec<Cluster<'_, LocatedEntity>> {
    SpatialClusterer::default().cluster(entities, zoom)
}
