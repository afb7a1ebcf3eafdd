use num_traits::{cast::ToPrimitive, Float, NumCast};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
};

/// Assert two float values are the same up to `eps`.
#[allow(dead_code)]
pub fn assert_float_eq<T>(left: T, right: T, eps: T)
where
    T: Float + Display,
{
    if left.is_nan() {
        assert!(right.is_nan(), "left is NaN, but right is not");
    } else {
        let diff = (left - right).abs();
        assert!(
            diff < eps,
            "values |{} - {}| ≥ {} (diff: {})",
            left,
            right,
            eps,
            diff
        );
    }
}

#[derive(Debug, PartialEq)]
pub enum SearchResult {
    Exact(usize),
    LowerBound(usize),
    UpperBound(usize),
    LeftOf(usize),
}

/// Binary search for `new_val` in the sorted `vec`.
///
/// Incomparable values (e.g. NaN) are treated as equal.
pub fn search_sorted<T: PartialOrd>(vec: &[T], new_val: T) -> SearchResult {
    let mut left = 0;
    let mut right = vec.len();
    while left < right {
        let mid = left + (right - left) / 2;

        match vec[mid].partial_cmp(&new_val).unwrap_or(Ordering::Equal) {
            Ordering::Less => left = mid + 1,
            Ordering::Greater => right = mid,
            Ordering::Equal => return SearchResult::Exact(mid),
        }
    }

    if left == 0 {
        SearchResult::LowerBound(left)
    } else if left < vec.len() {
        SearchResult::LeftOf(left)
    } else {
        SearchResult::UpperBound(left)
    }
}

/// Linearly interpolate `y` at `x0`, given the sorted anchors `x`.
///
/// Values left of the first anchor take `y[0]`, values right of the last
/// anchor take the last `y`. Returns `None` on empty or mismatched anchors.
pub fn interp1d<Tx, Ty>(x: &[Tx], y: &[Ty], x0: Tx) -> Option<Ty>
where
    Tx: PartialOrd + ToPrimitive + Copy + Debug,
    Ty: ToPrimitive + NumCast + Copy + Debug,
{
    if x.len() != y.len() || x.is_empty() {
        return None;
    }
    let index = search_sorted(x, x0);
    match index {
        SearchResult::Exact(idx) => Some(y[idx]),
        SearchResult::LeftOf(idx) => {
            let x1 = ToPrimitive::to_f64(&x[idx - 1])?;
            let x2 = ToPrimitive::to_f64(&x[idx])?;
            let y1 = ToPrimitive::to_f64(&y[idx - 1])?;
            let y2 = ToPrimitive::to_f64(&y[idx])?;
            let x0 = ToPrimitive::to_f64(&x0)?;

            // linear interpolation
            let y0 = y1 + (y2 - y1) * (x0 - x1) / (x2 - x1);

            NumCast::from(y0)
        }
        SearchResult::LowerBound(_) => Some(y[0]),
        SearchResult::UpperBound(idx) => Some(y[idx - 1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_sorted_empty() {
        let vec: Vec<i32> = vec![];
        assert_eq!(search_sorted(&vec, 5), SearchResult::LowerBound(0));
    }

    #[test]
    fn test_search_sorted_exact_match() {
        let vec = vec![1, 2, 3, 4, 5];
        assert_eq!(search_sorted(&vec, 3), SearchResult::Exact(2));
    }

    #[test]
    fn test_search_sorted_no_exact_match_left_of() {
        let vec = vec![1, 3, 5, 7, 9];
        assert_eq!(search_sorted(&vec, 4), SearchResult::LeftOf(2));
    }

    #[test]
    fn test_search_sorted_no_exact_match_upper_bound() {
        let vec = vec![10, 20, 30, 40, 50];
        assert_eq!(search_sorted(&vec, 55), SearchResult::UpperBound(5));
    }

    #[test]
    fn test_interp1d_midpoint() {
        let bp: Vec<u64> = vec![0, 1_000, 3_000];
        let px = vec![0.0, 10.0, 50.0];
        assert_float_eq(interp1d(&bp, &px, 500).unwrap(), 5.0, 1e-9);
        assert_float_eq(interp1d(&bp, &px, 2_000).unwrap(), 30.0, 1e-9);
        assert_float_eq(interp1d(&bp, &px, 3_000).unwrap(), 50.0, 1e-9);
    }

    #[test]
    fn test_interp1d_clamps_past_last_anchor() {
        let bp: Vec<u64> = vec![0, 100];
        let px = vec![0.0, 4.0];
        assert_eq!(interp1d(&bp, &px, 250), Some(4.0));
    }

    #[test]
    fn test_interp1d_mismatched() {
        let bp: Vec<u64> = vec![0, 100];
        let px = vec![0.0];
        assert_eq!(interp1d(&bp, &px, 50), None);
        let empty: Vec<u64> = vec![];
        let none: Vec<f64> = vec![];
        assert_eq!(interp1d(&empty, &none, 0), None);
    }
}
