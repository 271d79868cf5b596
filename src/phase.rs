//! Phase plotting helper

use std::f64::consts::PI;

/// Bridge phase wraps so a wrapped phase response plots without vertical jumps
///
/// Where consecutive phases jump by π or more, the line is continued past the
/// edge to the wrapped value, broken with a NaN point, and restarted from the
/// wrapped predecessor on the other side. Returns new `(freq, phase)` lists.
pub fn unwrap_phase(freq: &[f64], phase: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = freq.len().min(phase.len());
    let mut new_freq = Vec::with_capacity(n);
    let mut new_phase = Vec::with_capacity(n);
    if n == 0 {
        return (new_freq, new_phase);
    }

    new_freq.push(freq[0]);
    new_phase.push(phase[0]);
    for i in 1..n {
        let (prev, cur) = (phase[i - 1], phase[i]);
        let shift = if cur < prev - PI {
            Some(2.0 * PI)
        } else if cur >= prev + PI {
            Some(-2.0 * PI)
        } else {
            None
        };
        if let Some(shift) = shift {
            new_freq.extend([freq[i], f64::NAN, freq[i - 1]]);
            new_phase.extend([cur + shift, f64::NAN, prev - shift]);
        }
        new_freq.push(freq[i]);
        new_phase.push(cur);
    }
    (new_freq, new_phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_phase_unchanged() {
        let (f, p) = unwrap_phase(&[1.0, 2.0, 3.0], &[0.0, -1.0, -2.0]);
        assert_eq!(f, vec![1.0, 2.0, 3.0]);
        assert_eq!(p, vec![0.0, -1.0, -2.0]);
    }

    #[test]
    fn test_downward_wrap_bridged() {
        // -3 rad wraps to +3 rad
        let (f, p) = unwrap_phase(&[1.0, 2.0], &[-3.0, 3.0]);
        assert_eq!(f.len(), 5);
        assert_eq!(f[1], 2.0);
        assert!((p[1] - (3.0 - 2.0 * PI)).abs() < 1e-12);
        assert!(f[2].is_nan() && p[2].is_nan());
        assert_eq!(f[3], 1.0);
        assert!((p[3] - (-3.0 + 2.0 * PI)).abs() < 1e-12);
        assert_eq!((f[4], p[4]), (2.0, 3.0));
    }

    #[test]
    fn test_upward_wrap_bridged() {
        let (f, p) = unwrap_phase(&[1.0, 2.0], &[3.0, -3.0]);
        assert_eq!(f.len(), 5);
        assert!((p[1] - (-3.0 + 2.0 * PI)).abs() < 1e-12);
        assert!((p[3] - (3.0 - 2.0 * PI)).abs() < 1e-12);
    }

    #[test]
    fn test_empty() {
        let (f, p) = unwrap_phase(&[], &[]);
        assert!(f.is_empty() && p.is_empty());
    }
}
