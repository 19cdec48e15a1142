mod embedding;
mod theme;

pub use embedding::IEmbeddingProvider;
pub use theme::{ClusterView, IThemeNamer};
