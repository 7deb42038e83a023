mod filesystem;
mod loader;
mod thresholds;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{OverrideFile, THRESHOLDS_FILE_NAME, ThresholdFileLoader};
pub use thresholds::{
    DEFAULT_MAX_DUPLICATE_RATIO, DEFAULT_MAX_NON_PRIMARY_LANGUAGE, DEFAULT_MAX_TOKENS,
    DEFAULT_MIN_TOKENS, DEFAULT_MINHASH_SIMILARITY_THRESHOLD, ResolvedThresholds, ThresholdKey,
    ThresholdOverrides, ThresholdResolver, ThresholdSet, ThresholdSource,
};
