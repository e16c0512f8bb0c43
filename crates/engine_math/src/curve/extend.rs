//! Padding and period folding shared by the evaluators.

use glam::DVec2;

use super::CurveSettings;

/// Pad `samples` so they span exactly `[0, max_x]`.
///
/// Does nothing unless [`CurveSettings::extend_x`] is set or when `samples`
/// is empty.
///
/// - Wrapping: the gap between the last sample and the first sample (one
///   period later) is bridged linearly; the value at the period boundary is
///   inserted at both `x = 0` and `x = max_x`.
/// - Otherwise: flat extensions are added at whichever end falls short.
pub fn extend_x(samples: &mut Vec<DVec2>, settings: &CurveSettings) {
    if !settings.extend_x {
        return;
    }
    let (Some(&first), Some(&last)) = (samples.first(), samples.last()) else {
        return;
    };

    if settings.wraps() {
        let max_x = settings.max_x;
        let to_boundary = max_x - last.x;
        let gap = to_boundary + first.x;
        let y = if gap.abs() <= f64::EPSILON {
            first.y
        } else {
            last.y + (first.y - last.y) * (to_boundary / gap)
        };
        samples.insert(0, DVec2::new(0.0, y));
        samples.push(DVec2::new(max_x, y));
    } else {
        if first.x > 0.0 {
            samples.insert(0, DVec2::new(0.0, first.y));
        }
        if last.x < settings.max_x {
            samples.push(DVec2::new(settings.max_x, last.y));
        }
    }
}

/// Move samples lying past `max_x` back by one period to the front.
///
/// Used by evaluators that close a periodic curve by appending a point one
/// period after the first control point.
pub(crate) fn fold_into_period(samples: Vec<DVec2>, max_x: f64) -> Vec<DVec2> {
    let (overflow, inside): (Vec<DVec2>, Vec<DVec2>) =
        samples.into_iter().partition(|p| p.x > max_x);
    let mut folded: Vec<DVec2> = overflow
        .into_iter()
        .map(|p| DVec2::new(p.x - max_x, p.y))
        .collect();
    folded.extend(inside);
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_extension_is_noop() {
        let mut samples = vec![DVec2::new(2.0, 1.0)];
        extend_x(&mut samples, &CurveSettings::new(10.0));
        assert_eq!(samples, vec![DVec2::new(2.0, 1.0)]);
    }

    #[test]
    fn test_clamped_extension_only_pads_short_ends() {
        let settings = CurveSettings::new(10.0).with_extend_x(true);
        let mut samples = vec![DVec2::new(0.0, 1.0), DVec2::new(4.0, 2.0)];
        extend_x(&mut samples, &settings);
        assert_eq!(
            samples,
            vec![DVec2::new(0.0, 1.0), DVec2::new(4.0, 2.0), DVec2::new(10.0, 2.0)]
        );
    }

    #[test]
    fn test_wrapped_extension_blends_by_proximity() {
        let settings = CurveSettings::new(10.0).with_wrap(true).with_extend_x(true);
        // Last sample is 1 unit before the boundary, first is 3 units after.
        let mut samples = vec![DVec2::new(3.0, 4.0), DVec2::new(9.0, 0.0)];
        extend_x(&mut samples, &settings);
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[0], DVec2::new(0.0, 1.0));
        assert_eq!(samples[3], DVec2::new(10.0, 1.0));
    }

    #[test]
    fn test_wrapped_extension_with_no_gap() {
        let settings = CurveSettings::new(10.0).with_wrap(true).with_extend_x(true);
        let mut samples = vec![DVec2::new(0.0, 2.0), DVec2::new(10.0, 2.0)];
        extend_x(&mut samples, &settings);
        assert_eq!(samples.first(), Some(&DVec2::new(0.0, 2.0)));
        assert_eq!(samples.last(), Some(&DVec2::new(10.0, 2.0)));
    }

    #[test]
    fn test_fold_moves_overflow_to_front() {
        let samples = vec![
            DVec2::new(2.0, 1.0),
            DVec2::new(8.0, 2.0),
            DVec2::new(11.0, 3.0),
            DVec2::new(12.0, 4.0),
        ];
        let folded = fold_into_period(samples, 10.0);
        assert_eq!(
            folded,
            vec![
                DVec2::new(1.0, 3.0),
                DVec2::new(2.0, 4.0),
                DVec2::new(2.0, 1.0),
                DVec2::new(8.0, 2.0),
            ]
        );
    }
}
