use featurerank_core::traits::{ClusterView, IThemeNamer};

/// Names a cluster after its shortest feedback text (by characters).
/// The first such text wins on equal length.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestText;

impl ShortestText {
    pub(crate) fn pick<'a>(texts: &[&'a str]) -> Option<&'a str> {
        let mut best: Option<(&str, usize)> = None;
        for &text in texts {
            let len = text.trim().chars().count();
            if best.map_or(true, |(_, b)| len < b) {
                best = Some((text, len));
            }
        }
        best.map(|(text, _)| text.trim())
    }
}

impl IThemeNamer for ShortestText {
    fn name(&self) -> &str {
        "shortest_text"
    }

    fn synthesize(&self, cluster: &ClusterView<'_>) -> String {
        Self::pick(&cluster.texts).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_shortest_wins() {
        let view = ClusterView {
            cluster_index: 0,
            texts: vec!["need dark mode", "dark ui", "night!!"],
            vectors: vec![],
            centroid: None,
        };
        assert_eq!(ShortestText.synthesize(&view), "dark ui");
    }
}
