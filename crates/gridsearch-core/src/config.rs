//! Engine configuration: [`SearchConfig`] and [`ConfigError`].

use thiserror::Error;

/// Grid dimension used when none is given.
pub const DEFAULT_GRID_SIZE: i32 = 10;

/// Depth limit used by a manual depth-limited run when none is given.
pub const DEFAULT_DEPTH_LIMIT: u32 = 12;

/// Largest accepted grid dimension. Keeps `size * size` comfortably inside
/// `i32` and `u32`.
pub const MAX_GRID_SIZE: i32 = 1024;

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Grid dimension is zero or negative.
    #[error("grid size must be positive, got {0}")]
    NonPositiveGridSize(i32),

    /// Grid dimension exceeds [`MAX_GRID_SIZE`].
    #[error("grid size {size} exceeds the maximum of {max}")]
    GridTooLarge { size: i32, max: i32 },

    /// Depth limit is zero.
    #[error("depth limit must be positive")]
    ZeroDepthLimit,
}

/// Fixed parameters of a search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSearchConfig"))]
pub struct SearchConfig {
    grid_size: i32,
    depth_limit: u32,
}

/// Unchecked wire form of [`SearchConfig`]; deserialization goes through
/// [`SearchConfig::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSearchConfig {
    grid_size: i32,
    depth_limit: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSearchConfig> for SearchConfig {
    type Error = ConfigError;

    fn try_from(raw: RawSearchConfig) -> Result<Self, Self::Error> {
        Self::new(raw.grid_size, raw.depth_limit)
    }
}

impl SearchConfig {
    /// Validate and build a configuration.
    pub fn new(grid_size: i32, depth_limit: u32) -> Result<Self, ConfigError> {
        validate_grid_size(grid_size)?;
        validate_depth_limit(depth_limit)?;
        Ok(Self {
            grid_size,
            depth_limit,
        })
    }

    /// Same as the default configuration but with a different grid size.
    pub fn with_grid_size(self, grid_size: i32) -> Result<Self, ConfigError> {
        Self::new(grid_size, self.depth_limit)
    }

    /// Same configuration with a different default depth limit.
    pub fn with_depth_limit(self, depth_limit: u32) -> Result<Self, ConfigError> {
        Self::new(self.grid_size, depth_limit)
    }

    /// Grid dimension `N`; the grid holds `N * N` cells.
    #[inline]
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Default limit for depth-limited search.
    #[inline]
    pub fn depth_limit(&self) -> u32 {
        self.depth_limit
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

pub(crate) fn validate_grid_size(size: i32) -> Result<(), ConfigError> {
    if size <= 0 {
        return Err(ConfigError::NonPositiveGridSize(size));
    }
    if size > MAX_GRID_SIZE {
        return Err(ConfigError::GridTooLarge {
            size,
            max: MAX_GRID_SIZE,
        });
    }
    Ok(())
}

/// Check a depth limit given at run time.
pub fn validate_depth_limit(limit: u32) -> Result<(), ConfigError> {
    if limit == 0 {
        return Err(ConfigError::ZeroDepthLimit);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.grid_size(), 10);
        assert_eq!(cfg.depth_limit(), 12);
    }

    #[test]
    fn rejects_non_positive_size() {
        assert_eq!(
            SearchConfig::new(0, 12),
            Err(ConfigError::NonPositiveGridSize(0))
        );
        assert_eq!(
            SearchConfig::new(-3, 12),
            Err(ConfigError::NonPositiveGridSize(-3))
        );
    }

    #[test]
    fn rejects_oversized_grid() {
        let err = SearchConfig::new(MAX_GRID_SIZE + 1, 12).unwrap_err();
        assert!(matches!(err, ConfigError::GridTooLarge { .. }));
        assert!(SearchConfig::new(MAX_GRID_SIZE, 12).is_ok());
    }

    #[test]
    fn rejects_zero_depth_limit() {
        assert_eq!(SearchConfig::new(5, 0), Err(ConfigError::ZeroDepthLimit));
        assert_eq!(
            SearchConfig::default().with_depth_limit(0),
            Err(ConfigError::ZeroDepthLimit)
        );
    }

    #[test]
    fn builders_keep_other_field() {
        let cfg = SearchConfig::default()
            .with_grid_size(3)
            .and_then(|c| c.with_depth_limit(4))
            .unwrap();
        assert_eq!(cfg.grid_size(), 3);
        assert_eq!(cfg.depth_limit(), 4);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            ConfigError::NonPositiveGridSize(0).to_string(),
            "grid size must be positive, got 0"
        );
        assert_eq!(
            ConfigError::ZeroDepthLimit.to_string(),
            "depth limit must be positive"
        );
    }
}
