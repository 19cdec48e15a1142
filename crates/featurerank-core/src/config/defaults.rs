// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "tfidf";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 64;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_PARALLEL_EMBEDDING: bool = true;

// --- Clustering ---
pub const DEFAULT_CLUSTER_COUNT: usize = 5;
pub const DEFAULT_MIN_ITEMS: usize = 2;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_N_INIT: usize = 10;
pub const DEFAULT_MAX_ITERATIONS: usize = 300;
pub const DEFAULT_TOLERANCE: f64 = 1e-4;
pub const DEFAULT_MAX_EXAMPLES: usize = 3;
/// Candidates never carry more example texts than this.
pub const MAX_EXAMPLES_LIMIT: usize = 3;
pub const DEFAULT_MAX_THEME_CHARS: usize = 100;
pub const DEFAULT_MAX_KEYWORDS: usize = 5;

// --- Scoring ---
pub const DEFAULT_CONFIDENCE: f64 = 80.0;
pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_HIGH_THRESHOLD: f64 = 50.0;
pub const DEFAULT_MEDIUM_THRESHOLD: f64 = 20.0;
pub const DEFAULT_STRICT_IMPACT_SCALE: bool = false;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
