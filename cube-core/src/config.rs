/// Physical layout of the puzzle and how often drift is corrected
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeConfig {
    /// Edge length of one cubelet
    pub cubelet_size: f64,
    /// Empty space between neighbouring cubelets
    pub gap: f64,
    /// Re-snap every N successful turns, or never when `None`
    pub snap_interval: Option<u32>,
}

impl CubeConfig {
    pub fn new(cubelet_size: f64, gap: f64) -> Self {
        Self {
            cubelet_size,
            gap,
            ..Self::default()
        }
    }

    pub fn with_snap_interval(mut self, snap_interval: Option<u32>) -> Self {
        self.snap_interval = snap_interval;
        self
    }

    /// Distance between the centres of adjacent layers
    pub fn spacing(&self) -> f64 {
        self.cubelet_size + self.gap
    }

    /// How far a cubelet may sit from a layer centre and still belong to it.
    ///
    /// Half the spacing: a live position can match at most one layer.
    pub fn layer_tolerance(&self) -> f64 {
        self.spacing() / 2.0
    }

    /// Largest absolute coordinate a cubelet centre may take
    pub fn extent(&self) -> f64 {
        self.spacing()
    }
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            cubelet_size: 1.0,
            gap: 0.05,
            snap_interval: Some(16),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spacing() {
        let config = CubeConfig::default();
        assert!((config.spacing() - 1.05).abs() < 1e-12);
        assert!((config.extent() - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_tolerance_separates_layers() {
        let config = CubeConfig::new(2.0, 0.0);
        assert!(config.layer_tolerance() < config.spacing());
        assert_eq!(config.snap_interval, Some(16));
        assert_eq!(config.with_snap_interval(None).snap_interval, None);
    }
}
