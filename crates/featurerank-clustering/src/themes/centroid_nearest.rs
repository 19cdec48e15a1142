use featurerank_core::config::DistanceMetric;
use featurerank_core::traits::{ClusterView, IThemeNamer};

use super::keyword_frequency::KeywordFrequency;
use crate::distance::distance;

/// Names a cluster after the member text closest to its centroid.
///
/// Without a centroid (or member vectors) it defers to
/// [`KeywordFrequency`].
#[derive(Debug, Clone, Copy)]
pub struct CentroidNearest {
    metric: DistanceMetric,
}

impl CentroidNearest {
    pub fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }
}

impl IThemeNamer for CentroidNearest {
    fn name(&self) -> &str {
        "centroid_nearest"
    }

    fn synthesize(&self, cluster: &ClusterView<'_>) -> String {
        let centroid = match cluster.centroid {
            Some(c) if cluster.vectors.len() == cluster.texts.len() => c,
            _ => return KeywordFrequency::default().synthesize(cluster),
        };

        let mut best: Option<(usize, f64)> = None;
        for (i, v) in cluster.vectors.iter().enumerate() {
            let d = distance(self.metric, v, centroid);
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| cluster.texts[i].trim().to_string())
            .unwrap_or_default()
    }
}
