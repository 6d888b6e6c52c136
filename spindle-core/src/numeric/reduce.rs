use super::Numeric;

/// Sum of all elements. Zero for an empty slice.
pub fn sum<T: Numeric>(v: &[T]) -> T {
    let mut s = T::zero();
    for &e in v {
        s += e;
    }
    s
}

/// Largest element. Negative infinity for an empty slice.
pub fn max<T: Numeric>(v: &[T]) -> T {
    v.iter()
        .fold(T::neg_infinity(), |m, &e| if m <= e { e } else { m })
}

/// Indices of the minimum and maximum elements, found in a single
/// left-to-right scan. Ties keep the first extremal index.
///
/// An empty slice yields `(0, 0)`.
pub fn arg_min_max<T: PartialOrd + Copy>(v: &[T]) -> (usize, usize) {
    let Some(&first) = v.first() else {
        return (0, 0);
    };
    let (mut imin, mut imax) = (0, 0);
    let (mut vmin, mut vmax) = (first, first);
    for (i, &e) in v.iter().enumerate().skip(1) {
        if e < vmin {
            imin = i;
            vmin = e;
        }
        if e > vmax {
            imax = i;
            vmax = e;
        }
    }
    (imin, imax)
}

/// Index of the first maximum element.
pub fn arg_max<T: PartialOrd + Copy>(v: &[T]) -> usize {
    arg_min_max(v).1
}

/// Index of the first minimum element.
pub fn arg_min<T: PartialOrd + Copy>(v: &[T]) -> usize {
    arg_min_max(v).0
}
