//! Grey value averaging over combined domains.

use domain_scan::{RasterDir, raster_scan};
use domain_types::{GreyValue, IntervalDomain, ValueTable};

/// One input of an averaging pass: a domain and the table holding its
/// samples.
pub(crate) type Source<'a, T> = (&'a IntervalDomain, &'a ValueTable<T>);

/// Builds a table over `out` in which every sample is the mean of the
/// sources whose domain covers it.
///
/// Contributions are counted per sample, so a union sample covered by one
/// source gets that source's value unchanged. Samples no source covers keep
/// the background.
pub(crate) fn average_table<T: GreyValue>(
    out: &IntervalDomain,
    sources: &[Source<'_, T>],
    background: T,
) -> ValueTable<T> {
    let mut table = ValueTable::for_domain(out, background);
    let mut sums: Vec<T::Sum> = Vec::new();
    let mut counts: Vec<u32> = Vec::new();

    for itv in raster_scan(out, RasterDir::IncLineIncCol) {
        let width = usize::try_from(itv.len()).unwrap_or(0);
        sums.clear();
        sums.resize(width, T::Sum::default());
        counts.clear();
        counts.resize(width, 0);

        for (dom, values) in sources {
            let kol1 = dom.kol1();
            for src in dom.line_intervals(itv.line) {
                let left = (kol1 + src.left).max(itv.left);
                let right = (kol1 + src.right).min(itv.right);
                if left > right {
                    continue;
                }
                let Some(row) = values.row(itv.line, left, right) else {
                    continue;
                };
                let start = usize::try_from(left - itv.left).unwrap_or(0);
                for (k, &v) in row.iter().enumerate() {
                    sums[start + k] = T::accumulate(sums[start + k], v);
                    counts[start + k] += 1;
                }
            }
        }

        if let Some(dst) = table.row_mut(itv.line, itv.left, itv.right) {
            for ((d, &s), &n) in dst.iter_mut().zip(&sums).zip(&counts) {
                if n > 0 {
                    *d = T::mean(s, n);
                }
            }
        }
    }
    table
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::{intersect_n, union_n};
    use domain_types::Rgba;

    fn filled<T: GreyValue>(dom: &IntervalDomain, v: T) -> ValueTable<T> {
        let mut t = ValueTable::for_domain(dom, T::default());
        for itv in raster_scan(dom, RasterDir::IncLineIncCol) {
            t.row_mut(itv.line, itv.left, itv.right).unwrap().fill(v);
        }
        t
    }

    #[test]
    fn union_counts_per_sample() {
        let a = IntervalDomain::from_intervals(0, &[vec![(0, 3)]]).unwrap();
        let b = IntervalDomain::from_intervals(0, &[vec![(2, 5)]]).unwrap();
        let (ta, tb) = (filled(&a, 10i32), filled(&b, 21i32));
        let u = union_n(&[&a, &b]);
        let avg = average_table(&u, &[(&a, &ta), (&b, &tb)], -1);
        assert_eq!(avg.row(0, 0, 5).unwrap(), &[10, 10, 15, 15, 21, 21]);
    }

    #[test]
    fn intersection_averages_all_inputs() {
        let a = IntervalDomain::rect(0, 1, 0, 1).unwrap();
        let b = IntervalDomain::rect(1, 2, 1, 2).unwrap();
        let c = IntervalDomain::rect(0, 2, 0, 2).unwrap();
        let (ta, tb, tc) = (filled(&a, 1u8), filled(&b, 2u8), filled(&c, 4u8));
        let i = intersect_n(&[&a, &b, &c]);
        let avg = average_table(&i, &[(&a, &ta), (&b, &tb), (&c, &tc)], 0);
        assert_eq!(i.area(), 1);
        assert_eq!(avg.get(1, 1), 2);
    }

    #[test]
    fn rgba_averaged_per_channel() {
        let a = IntervalDomain::rect(0, 0, 0, 0).unwrap();
        let ta = filled(&a, Rgba::new(0, 100, 200, 255));
        let tb = filled(&a, Rgba::new(10, 101, 0, 255));
        let avg = average_table(&a, &[(&a, &ta), (&a, &tb)], Rgba::default());
        assert_eq!(avg.get(0, 0).channels(), [5, 100, 100, 255]);
    }
}
