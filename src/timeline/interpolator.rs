use crate::TabSyncError;

/// Known (musical position -> seconds) pair of the sync map.
///
/// The musical position is the bar index plus the offset within the bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorPoint {
    pub position: f64,
    pub seconds: f64,
}

impl AnchorPoint {
    pub const fn new(position: f64, seconds: f64) -> Self {
        Self { position, seconds }
    }
}

/// Piecewise-linear mapping from musical position to absolute time.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolator {
    positions: Vec<f64>,
    seconds: Vec<f64>,
}

impl Interpolator {
    /// Sorts the anchors by position; on duplicate positions the last anchor given wins.
    pub fn build<I>(anchors: I) -> Result<Self, TabSyncError>
    where
        I: IntoIterator<Item = AnchorPoint>,
    {
        let mut anchors: Vec<AnchorPoint> = anchors.into_iter().collect();
        if let Some(anchor) = anchors
            .iter()
            .find(|a| !a.position.is_finite() || !a.seconds.is_finite())
        {
            return Err(TabSyncError::ConfigurationError(format!(
                "anchor must be finite, got {anchor:?}"
            )));
        }
        // stable sort keeps input order among equal positions
        anchors.sort_by(|a, b| a.position.total_cmp(&b.position));

        let mut positions: Vec<f64> = Vec::with_capacity(anchors.len());
        let mut seconds: Vec<f64> = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            if positions.last() == Some(&anchor.position) {
                if let Some(last) = seconds.last_mut() {
                    *last = anchor.seconds;
                }
            } else {
                positions.push(anchor.position);
                seconds.push(anchor.seconds);
            }
        }

        if positions.len() < 2 {
            return Err(TabSyncError::ConfigurationError(format!(
                "at least two distinct anchors are required, got {}",
                positions.len()
            )));
        }
        log::debug!(
            "Interpolator built from {} anchors covering [{}, {}]",
            positions.len(),
            positions[0],
            positions[positions.len() - 1]
        );
        Ok(Self { positions, seconds })
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Absolute time in seconds, rounded to the millisecond.
    ///
    /// Positions outside the anchor range follow the first or last segment.
    pub fn query(&self, position: f64) -> f64 {
        let last = self.positions.len() - 1;
        let upper = self
            .positions
            .partition_point(|&p| p <= position)
            .clamp(1, last);
        let (x1, x2) = (self.positions[upper - 1], self.positions[upper]);
        let (y1, y2) = (self.seconds[upper - 1], self.seconds[upper]);
        let slope = (y2 - y1) / (x2 - x1);
        round_millis(y1 + slope * (position - x1))
    }
}

/// Round half away from zero at millisecond precision.
pub fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
