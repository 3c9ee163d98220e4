use std::cmp::Ordering;
use std::fmt;
use std::ops::Range;

use crate::sample::Feature;
use crate::weak_learner::common::type_and_struct::Threshold;

/// A tolerance parameter for numerical error.
/// Bins narrower than this value are not emitted.
const NUM_TOLERANCE: f64 = 1e-9;
/// Perturbation applied when a feature takes a single value.
const EPS: f64 = 0.001;

/// A struct that stores the first/second order derivative information
/// of the objective at one row (or the sum over a set of rows).
#[derive(Debug, Clone, Copy, Default)]
pub struct GradHess {
    /// First derivative.
    pub grad: f64,
    /// Second derivative.
    pub hess: f64,
}

impl GradHess {
    /// Construct a new pair of derivatives.
    pub fn new(grad: f64, hess: f64) -> Self {
        Self { grad, hess }
    }
}

/// Binning: a feature pre-processing.
#[derive(Debug)]
pub struct Bin(pub(crate) Range<f64>);

impl Bin {
    #[inline(always)]
    fn new(range: Range<f64>) -> Self {
        Self(range)
    }

    #[inline(always)]
    fn contains(&self, item: &f64) -> bool {
        self.0.contains(item)
    }
}

/// The histogram bins of one feature.
/// The left-most bin is open towards `f64::MIN` and the right-most
/// towards `f64::MAX`, so every value falls into some bin.
pub struct Bins(Vec<Bin>);

impl Bins {
    /// Returns the number of bins.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no bins.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cut the given `Feature` into at most `n_bin` equal-width bins.
    #[inline(always)]
    pub fn cut(feature: &Feature, n_bin: usize) -> Self {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        feature.values().iter().copied().for_each(|val| {
            min = min.min(val);
            max = max.max(val);
        });

        // If the minimum value equals the maximum one,
        // slightly perturb them.
        if min == max {
            min -= EPS;
            max += EPS;
        }

        let intercept = (max - min) / n_bin as f64;

        let mut bins = Vec::with_capacity(n_bin);
        let mut left = min;
        while left < max {
            let right = left + intercept;
            bins.push(Bin::new(left..right));

            // Numerical error leads to an unexpected extra split.
            if (right - max).abs() < NUM_TOLERANCE {
                break;
            }
            left = right;
        }

        // The boundary bins catch everything beyond the training range.
        if let Some(first) = bins.first_mut() {
            first.0.start = f64::MIN;
        }
        if let Some(last) = bins.last_mut() {
            last.0.end = f64::MAX;
        }

        Self(bins)
    }

    /// Accumulate the derivative sums of the rows in `indices`
    /// into this feature's bins, then collapse empty bins.
    /// Each returned pair is a candidate threshold (the cut after
    /// the bin) together with the bin's accumulated derivatives.
    pub(crate) fn pack(
        &self,
        indices: &[usize],
        feat: &Feature,
        gh: &[GradHess],
    ) -> Vec<(Threshold, GradHess)> {
        let n_bins = self.0.len();
        let mut packed = vec![GradHess::default(); n_bins];

        for &i in indices {
            let xi = feat[i];

            let pos = self
                .0
                .binary_search_by(|range| {
                    if range.contains(&xi) {
                        return Ordering::Equal;
                    }
                    range.0.start.partial_cmp(&xi).unwrap()
                })
                .expect("every value falls into some bin");
            packed[pos].grad += gh[i].grad;
            packed[pos].hess += gh[i].hess;
        }

        // Collapse empty bins: candidate cuts lie halfway between
        // the end of one occupied bin and the start of the next.
        let mut out = Vec::with_capacity(n_bins);
        let mut pending: Option<(f64, GradHess)> = None;
        for (bin, mass) in self.0.iter().zip(packed) {
            if mass.grad == 0.0 && mass.hess == 0.0 {
                continue;
            }
            if let Some((prev_end, prev_mass)) = pending.take() {
                let threshold = (prev_end + bin.0.start) / 2.0;
                out.push((threshold.into(), prev_mass));
            }
            pending = Some((bin.0.end, mass));
        }
        if let Some((end, mass)) = pending {
            out.push((end.into(), mass));
        }

        out
    }
}

impl fmt::Display for Bins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self
            .0
            .iter()
            .map(|bin| format!("[{:.2}, {:.2})", bin.0.start, bin.0.end))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{inner}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Feature;
    use polars::prelude::*;

    fn feature(values: &[f64]) -> Feature {
        let series = Series::new("x", values);
        Feature::from_series(&series).unwrap()
    }

    #[test]
    fn cut_covers_the_whole_line() {
        let feat = feature(&[0.0, 1.0, 2.0, 3.0]);
        let bins = Bins::cut(&feat, 4);

        assert_eq!(bins.len(), 4);
        assert_eq!(bins.0.first().unwrap().0.start, f64::MIN);
        assert_eq!(bins.0.last().unwrap().0.end, f64::MAX);
    }

    #[test]
    fn cut_handles_constant_features() {
        let feat = feature(&[1.0, 1.0, 1.0]);
        let bins = Bins::cut(&feat, 8);
        assert!(!bins.is_empty());
    }

    #[test]
    fn pack_skips_empty_bins() {
        let feat = feature(&[0.0, 0.0, 10.0, 10.0]);
        let bins = Bins::cut(&feat, 10);
        let gh = vec![GradHess::new(1.0, 1.0); 4];
        let indices = [0, 1, 2, 3];

        let packed = bins.pack(&indices, &feat, &gh);
        // Two occupied value clusters, so two packed entries.
        assert_eq!(packed.len(), 2);
        assert_eq!(packed[0].1.grad, 2.0);
        assert_eq!(packed[1].1.hess, 2.0);
    }
}
