//! Row-oriented export of scan results.
//!
//! Threshold curves flatten to one CSV row per rate point, and labeled
//! spectra / syndrome bit patterns flatten to plain numeric sequences
//! for downstream tooling. No plotting or mapping happens here.

use std::io::{self, Write};

use crate::threshold::ThresholdCurve;

/// Header row of a curve CSV.
pub const CURVE_CSV_HEADER: &str = "physical_error_rate,logical_error_rate,n_trials";

/// Write a curve as CSV: header plus one row per point.
pub fn write_curve_csv<W: Write>(curve: &ThresholdCurve, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", CURVE_CSV_HEADER)?;
    for point in curve.points() {
        writeln!(
            writer,
            "{},{},{}",
            point.physical_rate, point.logical_rate, point.trials
        )?;
    }
    Ok(())
}

/// The same rows as in-memory tuples.
pub fn curve_rows(curve: &ThresholdCurve) -> Vec<(f64, f64, usize)> {
    curve
        .points()
        .iter()
        .map(|p| (p.physical_rate, p.logical_rate, p.trials))
        .collect()
}

/// Strip the labels off a spectrum, keeping the ordered values.
pub fn spectrum_values(spectrum: &[(String, f64)]) -> Vec<f64> {
    spectrum.iter().map(|(_, value)| *value).collect()
}

/// Flatten a syndrome bit pattern to 0/1 values.
pub fn bit_values(bits: &[bool]) -> Vec<u8> {
    bits.iter().map(|&b| u8::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::ThresholdPoint;

    #[test]
    fn test_csv_layout() {
        let curve = ThresholdCurve::from_points(vec![
            ThresholdPoint {
                physical_rate: 0.01,
                logical_rate: 0.002,
                trials: 500,
            },
            ThresholdPoint {
                physical_rate: 0.1,
                logical_rate: 0.25,
                trials: 500,
            },
        ]);
        let mut buffer = Vec::new();
        write_curve_csv(&curve, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CURVE_CSV_HEADER);
        assert_eq!(lines[1], "0.01,0.002,500");
        assert_eq!(lines[2], "0.1,0.25,500");
    }

    #[test]
    fn test_empty_curve_writes_header_only() {
        let curve = ThresholdCurve::new();
        let mut buffer = Vec::new();
        write_curve_csv(&curve, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_curve_rows_match_points() {
        let curve = ThresholdCurve::from_points(vec![ThresholdPoint {
            physical_rate: 0.05,
            logical_rate: 0.04,
            trials: 100,
        }]);
        assert_eq!(curve_rows(&curve), vec![(0.05, 0.04, 100)]);
    }

    #[test]
    fn test_flatteners() {
        let spectrum = vec![("X0".to_string(), 0.5), ("Z1".to_string(), -1.0)];
        assert_eq!(spectrum_values(&spectrum), vec![0.5, -1.0]);
        assert_eq!(bit_values(&[true, false, true]), vec![1, 0, 1]);
    }
}
