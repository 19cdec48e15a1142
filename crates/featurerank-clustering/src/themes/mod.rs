//! Theme namers. Each implements [`IThemeNamer`] over a [`ClusterView`].

mod centroid_nearest;
mod keyword_frequency;
mod shortest_text;

pub use centroid_nearest::CentroidNearest;
pub use keyword_frequency::KeywordFrequency;
pub use shortest_text::ShortestText;

use featurerank_core::config::{DistanceMetric, ThemeStrategy};
use featurerank_core::traits::IThemeNamer;

/// Build the namer configured by `strategy`.
pub fn namer_for(strategy: ThemeStrategy, metric: DistanceMetric) -> Box<dyn IThemeNamer> {
    match strategy {
        ThemeStrategy::CentroidNearest => Box::new(CentroidNearest::new(metric)),
        ThemeStrategy::KeywordFrequency => Box::new(KeywordFrequency::default()),
        ThemeStrategy::ShortestText => Box::new(ShortestText),
    }
}
