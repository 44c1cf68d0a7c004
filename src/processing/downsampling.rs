use crate::config::{DownsampleMode, Downsampling};

/// Upper bound on drawn points per series when `auto` is set.
pub const AUTO_TARGET_POINTS: usize = 4000;

/// Effective decimation factor for `n` points.
pub fn factor(policy: &Downsampling, n: usize) -> usize {
    if policy.auto {
        n.div_ceil(AUTO_TARGET_POINTS).max(1)
    } else {
        policy.ds.max(1)
    }
}

/// Reduce (x, y) according to the group's downsampling hint.
/// Returns the input unchanged when the factor is 1.
pub fn downsample(x: &[f64], y: &[f64], policy: &Downsampling) -> (Vec<f64>, Vec<f64>) {
    let n = x.len().min(y.len());
    let ds = factor(policy, n);
    if ds <= 1 || n <= 2 {
        return (x[..n].to_vec(), y[..n].to_vec());
    }
    match policy.mode {
        DownsampleMode::Subsample => subsample(&x[..n], &y[..n], ds),
        DownsampleMode::Mean => mean(&x[..n], &y[..n], ds),
        DownsampleMode::Peak => peak(&x[..n], &y[..n], ds),
    }
}

/// Every `ds`-th point.
fn subsample(x: &[f64], y: &[f64], ds: usize) -> (Vec<f64>, Vec<f64>) {
    x.iter().step_by(ds).copied().zip(y.iter().step_by(ds).copied()).unzip()
}

/// Bucket average; x is taken at the bucket start.
fn mean(x: &[f64], y: &[f64], ds: usize) -> (Vec<f64>, Vec<f64>) {
    x.chunks(ds)
        .zip(y.chunks(ds))
        .map(|(xs, ys)| (xs[0], ys.iter().sum::<f64>() / ys.len() as f64))
        .unzip()
}

/// Min and max of each bucket, in time order, so spikes survive decimation.
fn peak(x: &[f64], y: &[f64], ds: usize) -> (Vec<f64>, Vec<f64>) {
    let buckets = x.len().div_ceil(ds);
    let mut out_x = Vec::with_capacity(buckets * 2);
    let mut out_y = Vec::with_capacity(buckets * 2);
    for (xs, ys) in x.chunks(ds).zip(y.chunks(ds)) {
        let mut lo = 0;
        let mut hi = 0;
        for (i, v) in ys.iter().enumerate() {
            // NaN never wins a comparison, so a bucket of NaN keeps index 0
            if *v < ys[lo] {
                lo = i;
            }
            if *v > ys[hi] {
                hi = i;
            }
        }
        let (first, second) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        out_x.push(xs[first]);
        out_y.push(ys[first]);
        if second != first {
            out_x.push(xs[second]);
            out_y.push(ys[second]);
        }
    }
    (out_x, out_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(ds: usize, mode: DownsampleMode) -> Downsampling {
        Downsampling { ds, auto: false, mode }
    }

    #[test]
    fn peak_keeps_spikes() {
        let x: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let y = vec![0.0, 9.0, 0.0, 0.0, 0.0, 0.0, -4.0, 0.0];
        let (dx, dy) = downsample(&x, &y, &policy(4, DownsampleMode::Peak));
        assert_eq!(dx, vec![0.0, 1.0, 4.0, 6.0]);
        assert_eq!(dy, vec![0.0, 9.0, 0.0, -4.0]);
    }

    #[test]
    fn subsample_and_mean() {
        let x: Vec<f64> = (0..6).map(|i| i as f64).collect();
        let y = vec![1.0, 3.0, 5.0, 7.0, 9.0, 11.0];
        assert_eq!(
            downsample(&x, &y, &policy(2, DownsampleMode::Subsample)),
            (vec![0.0, 2.0, 4.0], vec![1.0, 5.0, 9.0])
        );
        assert_eq!(
            downsample(&x, &y, &policy(4, DownsampleMode::Mean)),
            (vec![0.0, 4.0], vec![4.0, 10.0])
        );
    }

    #[test]
    fn auto_targets_point_budget() {
        let auto = Downsampling { ds: 1, auto: true, mode: DownsampleMode::Subsample };
        assert_eq!(factor(&auto, 100), 1);
        assert_eq!(factor(&auto, AUTO_TARGET_POINTS * 3 + 1), 4);
        assert_eq!(factor(&policy(0, DownsampleMode::Peak), 10), 1);
    }
}
