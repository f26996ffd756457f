/// Desirability score at the edges of the target window. Scores inside the
/// window run from this value up to 1.0 at the midpoint; scores outside
/// decay linearly from it, which keeps the curve continuous at both
/// boundaries.
const EDGE_SCORE: f32 = 0.8;

/// Range-based desirability scoring
pub struct RangeScorer;

impl RangeScorer {
    /// Map a feature value to a [0,1] score against a target window.
    ///
    /// Missing or non-finite values score a neutral 0.5 so a single absent
    /// feature never disqualifies a track. Values inside the window peak at
    /// the midpoint and ease toward 0.8 at the edges; values outside fall
    /// off steeply toward 0.
    pub fn score_in_range(value: Option<f32>, min: f32, max: f32) -> f32 {
        let Some(v) = value else {
            return 0.5;
        };
        if !v.is_finite() {
            return 0.5;
        }

        if v < min {
            // Below range: steep linear falloff from the edge score
            (EDGE_SCORE - (min - v)).max(0.0)
        } else if v > max {
            // Above range: symmetric falloff
            (EDGE_SCORE - (v - max)).max(0.0)
        } else {
            let half_width = (max - min) / 2.0;
            if half_width <= f32::EPSILON {
                // Degenerate window: an exact hit is a perfect match
                return 1.0;
            }
            let midpoint = (min + max) / 2.0;
            let distance_from_mid = (v - midpoint).abs();
            1.0 - (distance_from_mid / half_width) * (1.0 - EDGE_SCORE)
        }
    }
}
