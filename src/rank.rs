use core::cmp::Ordering;

use crate::cluster::Cluster;

/// Strongest first. Equal forces keep anchor raster order, which makes the
/// unstable sort deterministic without needing an allocating stable sort.
pub fn rank(clusters: &mut [Cluster]) {
    clusters.sort_unstable_by(compare);
}

fn compare(a: &Cluster, b: &Cluster) -> Ordering {
    b.force.cmp(&a.force).then(a.order.cmp(&b.order))
}
