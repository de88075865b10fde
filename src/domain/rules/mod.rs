// Domain rules - Interval arithmetic for cuts and kept segments

use crate::domain::model::*;

/// Sort by start and merge overlapping or touching intervals.
///
/// The result is sorted ascending and no two intervals overlap or touch.
/// Normalizing an already normalized list returns it unchanged.
pub fn normalize(intervals: &[Interval]) -> Vec<Interval> {
    let mut ordered = intervals.to_vec();
    ordered.sort_by(|a, b| a.start().seconds.total_cmp(&b.start().seconds));

    let mut iter = ordered.into_iter();
    let Some(mut current) = iter.next() else {
        return Vec::new();
    };

    let mut merged = Vec::new();
    for next in iter {
        if next.start() <= current.end() {
            current = Interval::new_unchecked(current.start(), current.end().max(next.end()));
        } else {
            merged.push(current);
            current = next;
        }
    }
    merged.push(current);

    merged
}

/// Complement of the normalized cuts within `[0, total]`.
///
/// Empty or zero-length pieces are dropped, and cuts reaching past `total`
/// are clamped, so every returned interval lies inside the media.
pub fn compute_keep(total: TimeSpec, cuts: &[Interval]) -> Vec<Interval> {
    let mut keep = Vec::new();
    if !total.seconds.is_finite() || total.seconds <= 0.0 {
        return keep;
    }

    let mut cursor = TimeSpec::zero();
    for cut in cuts {
        if cursor >= total {
            break;
        }
        if cut.start() > cursor {
            push_positive(&mut keep, cursor, cut.start().min(total));
        }
        cursor = cursor.max(cut.end());
    }

    if cursor < total {
        push_positive(&mut keep, cursor, total);
    }

    keep
}

/// Total length covered by a list of disjoint intervals
pub fn total_length(intervals: &[Interval]) -> TimeSpec {
    TimeSpec::from_seconds(intervals.iter().map(|i| i.length().seconds).sum())
}

fn push_positive(keep: &mut Vec<Interval>, start: TimeSpec, end: TimeSpec) {
    if end.seconds > start.seconds {
        keep.push(Interval::new_unchecked(start, end));
    }
}
