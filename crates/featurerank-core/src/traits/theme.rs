/// Read-only view of one cluster handed to a theme namer.
#[derive(Debug, Clone)]
pub struct ClusterView<'a> {
    pub cluster_index: usize,
    /// Member texts, in input order.
    pub texts: Vec<&'a str>,
    /// Member embeddings, parallel to `texts`.
    pub vectors: Vec<&'a [f32]>,
    /// `None` when the clustering backend exposes no centroids.
    pub centroid: Option<&'a [f32]>,
}

/// Synthesizes a human-readable name for a cluster.
pub trait IThemeNamer: Send + Sync {
    /// Name of the strategy, for logs.
    fn name(&self) -> &str;

    /// Produce the theme. Called only for non-empty clusters.
    fn synthesize(&self, cluster: &ClusterView<'_>) -> String;
}
