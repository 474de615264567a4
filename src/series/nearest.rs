//! Nearest-point resolution
//!
//! Every interactive trigger (hover, tap, slider) resolves its query
//! position through [`nearest`].

use super::{Bounds, Point, Series};

/// Result of a nearest-point lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    pub point: Point,
    /// `|query - point.x|`
    pub distance: f64,
    /// Bounds the lookup was checked against
    pub bounds: Bounds,
}

/// Find the point of group `active` whose x is closest to `query`.
///
/// Bounds come from the active group when `restrict_to_group` is set and
/// from the whole series otherwise. A query that is not finite or falls
/// outside `[min_x, max_x]` resolves to `None`. On equal distances the
/// earliest point wins. Points with a NaN coordinate never match.
pub fn nearest(query: f64, series: &Series, active: usize, restrict_to_group: bool) -> Option<Nearest> {
    if !query.is_finite() {
        return None;
    }

    let bounds = series.bounds(restrict_to_group.then_some(active))?;
    if !bounds.contains_x(query) {
        return None;
    }

    let (point, distance) = series
        .group(active)
        .filter(|p| !p.x.is_nan() && !p.y.is_nan())
        .map(|p| (p, (query - p.x).abs()))
        .fold(None, |best: Option<(Point, f64)>, (p, d)| match best {
            Some((_, best_d)) if d >= best_d => best,
            _ => Some((p, d)),
        })?;

    Some(Nearest { point, distance, bounds })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Series {
        Series::new(vec![4.0, 5.0, 6.0], Some(vec![0.0, 1.0, 2.0]), None).unwrap()
    }

    #[test]
    fn test_nearest_picks_closest() {
        let s = series();
        assert_eq!(nearest(0.4, &s, 0, false).unwrap().point.index, 0);
        assert_eq!(nearest(0.6, &s, 0, false).unwrap().point.index, 1);
        let hit = nearest(1.9, &s, 0, false).unwrap();
        assert_eq!(hit.point.index, 2);
        assert_eq!(hit.point.y, 6.0);
        assert!((hit.distance - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_tie_goes_to_first_point() {
        let s = series();
        assert_eq!(nearest(0.5, &s, 0, false).unwrap().point.index, 0);
        assert_eq!(nearest(1.5, &s, 0, false).unwrap().point.index, 1);
    }

    #[test]
    fn test_duplicate_x_first_wins() {
        let s = Series::new(vec![1.0, 2.0, 3.0], Some(vec![1.0, 1.0, 1.0]), None).unwrap();
        assert_eq!(nearest(1.0, &s, 0, false).unwrap().point.index, 0);
    }

    #[test]
    fn test_query_outside_bounds() {
        let s = series();
        assert!(nearest(-1.0, &s, 0, false).is_none());
        assert!(nearest(2.5, &s, 0, false).is_none());
        assert!(nearest(f64::INFINITY, &s, 0, false).is_none());
        assert!(nearest(f64::NAN, &s, 0, false).is_none());
    }

    #[test]
    fn test_group_restricts_candidates() {
        let s = Series::new(vec![4.0, 5.0, 6.0], Some(vec![0.0, 1.0, 2.0]), Some(&[0, 0, 1])).unwrap();

        // Whole-series bounds: any query in [0, 2] lands on the only group-1 point
        for query in [0.0, 0.7, 1.2, 2.0] {
            assert_eq!(nearest(query, &s, 1, false).unwrap().point.index, 2);
        }

        // Group bounds shrink to x == 2
        assert_eq!(nearest(2.0, &s, 1, true).unwrap().point.index, 2);
        assert!(nearest(1.0, &s, 1, true).is_none());
    }

    #[test]
    fn test_nan_y_point_is_skipped() {
        let s = Series::new(vec![1.0, f64::NAN, 3.0], Some(vec![0.0, 1.0, 2.0]), None).unwrap();
        let hit = nearest(1.0, &s, 0, false).unwrap();
        assert_eq!(hit.point.index, 0);
        assert_eq!(hit.distance, 1.0);
        assert_eq!(nearest(1.6, &s, 0, false).unwrap().point.index, 2);
    }

    #[test]
    fn test_first_group_member_not_at_index_zero() {
        let s = Series::new(vec![1.0, 2.0, 3.0], Some(vec![0.0, 5.0, 10.0]), Some(&[1, 0, 0])).unwrap();
        assert_eq!(nearest(0.0, &s, 0, false).unwrap().point.index, 1);
    }
}
