//! Logical-error-rate curves and pseudo-threshold extraction.
//!
//! A threshold scan produces one `ThresholdPoint` per physical rate.
//! The pseudo-threshold is where the curve crosses the identity line
//! p_L = p on a log-log plot. Sampled curves cross between scan
//! points, so the crossing is located by linear interpolation in
//! log-log space between the two bracketing points. A curve that never
//! crosses inside the scanned range yields `None`; callers report that
//! explicitly instead of extrapolating.

use log::warn;

use crate::error::QecError;

/// One measured point of a logical-error-rate curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPoint {
    /// Physical error rate fed to the noise model.
    pub physical_rate: f64,
    /// Estimated logical error rate (failures / trials).
    pub logical_rate: f64,
    /// Monte Carlo trials behind the estimate.
    pub trials: usize,
}

/// An ordered logical-error-rate curve over ascending physical rates.
///
/// Curves from cancelled scans keep the points finished so far but are
/// marked incomplete; downstream consumers must check `is_complete`.
#[derive(Debug, Clone, Default)]
pub struct ThresholdCurve {
    points: Vec<ThresholdPoint>,
    incomplete: bool,
}

impl ThresholdCurve {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<ThresholdPoint>) -> Self {
        Self {
            points,
            incomplete: false,
        }
    }

    pub fn push(&mut self, point: ThresholdPoint) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[ThresholdPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Flag the curve as a partial result (cancelled scan).
    pub fn mark_incomplete(&mut self) {
        self.incomplete = true;
    }

    pub fn is_complete(&self) -> bool {
        !self.incomplete
    }

    /// Locate the crossing of the identity line p_L = p.
    ///
    /// Works in log-log space: for each adjacent pair of points the sign
    /// of ln(p_L) − ln(p) is inspected, and a sign change is resolved by
    /// linear interpolation between the pair. Points with a zero
    /// estimate carry no log-space position and cannot bracket.
    ///
    /// Returns `None` when no crossing lies inside the scanned range.
    pub fn pseudo_threshold(&self) -> Option<f64> {
        for window in self.points.windows(2) {
            let (a, b) = (window[0], window[1]);
            if a.logical_rate <= 0.0 || b.logical_rate <= 0.0 {
                continue;
            }
            let fa = a.logical_rate.ln() - a.physical_rate.ln();
            let fb = b.logical_rate.ln() - b.physical_rate.ln();
            if fa == 0.0 {
                return Some(a.physical_rate);
            }
            if fa.signum() != fb.signum() {
                let t = fa / (fa - fb);
                let ln_p = a.physical_rate.ln() + t * (b.physical_rate.ln() - a.physical_rate.ln());
                return Some(ln_p.exp());
            }
        }
        if !self.points.is_empty() {
            warn!(
                "no pseudo-threshold crossing in [{}, {}]",
                self.points[0].physical_rate,
                self.points[self.points.len() - 1].physical_rate
            );
        }
        None
    }

    /// Validate a scan range: every rate in [0, 1], strictly ascending.
    pub fn validate_rates(rates: &[f64]) -> Result<(), QecError> {
        for (index, &rate) in rates.iter().enumerate() {
            if !(0.0..=1.0).contains(&rate) || rate.is_nan() {
                return Err(QecError::RateOutOfRange(rate));
            }
            if index > 0 && rate <= rates[index - 1] {
                return Err(QecError::RatesNotAscending { index });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(physical_rate: f64, logical_rate: f64) -> ThresholdPoint {
        ThresholdPoint {
            physical_rate,
            logical_rate,
            trials: 1000,
        }
    }

    #[test]
    fn test_crossing_interpolated_in_log_space() {
        // p_L/p goes from 1/2 to 2 symmetrically, so the crossing sits at
        // the log-space midpoint sqrt(0.01 · 0.1).
        let curve = ThresholdCurve::from_points(vec![point(0.01, 0.005), point(0.1, 0.2)]);
        let crossing = curve.pseudo_threshold().unwrap();
        let expected = (0.01f64 * 0.1).sqrt();
        assert!(
            (crossing - expected).abs() < 1e-12,
            "crossing {} vs expected {}",
            crossing,
            expected
        );
    }

    #[test]
    fn test_exact_crossing_point_returned() {
        let curve = ThresholdCurve::from_points(vec![point(0.05, 0.05), point(0.1, 0.4)]);
        let crossing = curve.pseudo_threshold().unwrap();
        assert!((crossing - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_no_crossing_reports_none() {
        // Entirely below the identity line.
        let curve = ThresholdCurve::from_points(vec![
            point(0.01, 0.001),
            point(0.05, 0.01),
            point(0.1, 0.05),
        ]);
        assert_eq!(curve.pseudo_threshold(), None);
    }

    #[test]
    fn test_zero_estimates_cannot_bracket() {
        // A zero estimate next to a point above the line must not create
        // a phantom crossing.
        let curve = ThresholdCurve::from_points(vec![point(0.01, 0.0), point(0.1, 0.2)]);
        assert_eq!(curve.pseudo_threshold(), None);
    }

    #[test]
    fn test_crossing_skips_leading_zero_points() {
        // Zero points first, then a genuine bracket.
        let curve = ThresholdCurve::from_points(vec![
            point(0.001, 0.0),
            point(0.01, 0.005),
            point(0.1, 0.2),
        ]);
        let crossing = curve.pseudo_threshold().unwrap();
        assert!(crossing > 0.01 && crossing < 0.1);
    }

    #[test]
    fn test_incomplete_flag() {
        let mut curve = ThresholdCurve::new();
        assert!(curve.is_complete());
        curve.push(point(0.01, 0.002));
        curve.mark_incomplete();
        assert!(!curve.is_complete());
        assert_eq!(curve.len(), 1);
    }

    #[test]
    fn test_validate_rates() {
        assert!(ThresholdCurve::validate_rates(&[0.001, 0.01, 0.1]).is_ok());
        assert!(matches!(
            ThresholdCurve::validate_rates(&[0.01, 0.01]),
            Err(QecError::RatesNotAscending { index: 1 })
        ));
        assert!(matches!(
            ThresholdCurve::validate_rates(&[0.1, 0.05]),
            Err(QecError::RatesNotAscending { index: 1 })
        ));
        assert!(matches!(
            ThresholdCurve::validate_rates(&[-0.1, 0.05]),
            Err(QecError::RateOutOfRange(_))
        ));
        assert!(matches!(
            ThresholdCurve::validate_rates(&[0.5, 1.5]),
            Err(QecError::RateOutOfRange(_))
        ));
        assert!(ThresholdCurve::validate_rates(&[]).is_ok());
    }
}
