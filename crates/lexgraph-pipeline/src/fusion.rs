//! Meta-fusion of the overlay perspectives.

/// Blend the available risk perspectives with equal weights.
///
/// Inputs are whichever of `{v11, symbolic fused, graph attention,
/// debate-adjusted}` actually ran; weights renormalize over the present
/// sources. The fused score clips to `[0, 100]`; confidence is
/// agreement-derived (`1 - var/2500`) and clips to `[0.1, 0.99]`.
pub fn meta_fuse(scores: &[f64]) -> (f64, f64) {
    if scores.is_empty() {
        return (0.0, 0.1);
    }
    let n = scores.len() as f64;
    let mean = scores.iter().sum::<f64>() / n;
    let fused = mean.clamp(0.0, 100.0);

    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
    let confidence = (1.0 - variance / 2500.0).clamp(0.1, 0.99);
    (fused, confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn equal_weights_over_available_sources() {
        let (fused, _) = meta_fuse(&[40.0, 60.0]);
        assert_relative_eq!(fused, 50.0);
        let (fused, _) = meta_fuse(&[40.0, 60.0, 80.0, 20.0]);
        assert_relative_eq!(fused, 50.0);
    }

    #[test]
    fn agreement_raises_confidence() {
        let (_, tight) = meta_fuse(&[50.0, 51.0, 49.0, 50.0]);
        let (_, loose) = meta_fuse(&[10.0, 90.0, 30.0, 70.0]);
        assert!(tight > loose);
        assert!(tight <= 0.99);
        assert!(loose >= 0.1);
    }

    #[test]
    fn single_source_is_fully_confident() {
        let (fused, confidence) = meta_fuse(&[72.5]);
        assert_relative_eq!(fused, 72.5);
        assert_relative_eq!(confidence, 0.99);
    }

    #[test]
    fn fused_clips_to_range() {
        let (fused, _) = meta_fuse(&[140.0, 120.0]);
        assert_eq!(fused, 100.0);
    }
}
