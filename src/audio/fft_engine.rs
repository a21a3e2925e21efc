use crate::error::{AnalysisError, Result};
use realfft::num_complex::Complex32;
use std::f64::consts::PI;

/// Read-only view of every `stride`-th sample of a buffer, starting at `offset`
///
/// The transform recurses on even and odd subsequences through these views,
/// so no sub-array is ever materialised.
#[derive(Clone, Copy, Debug)]
pub struct StridedView<'a> {
    data: &'a [f32],
    offset: usize,
    stride: usize,
    len: usize,
}

impl<'a> StridedView<'a> {
    /// View over the whole buffer
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            offset: 0,
            stride: 1,
            len: data.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, index: usize) -> f32 {
        debug_assert!(index < self.len);
        self.data[self.offset + index * self.stride]
    }

    /// Samples 0, 2, 4, ... of this view
    pub fn even(&self) -> Self {
        Self {
            data: self.data,
            offset: self.offset,
            stride: self.stride * 2,
            len: (self.len + 1) / 2,
        }
    }

    /// Samples 1, 3, 5, ... of this view
    pub fn odd(&self) -> Self {
        Self {
            data: self.data,
            offset: self.offset + self.stride,
            stride: self.stride * 2,
            len: self.len / 2,
        }
    }
}

/// Recursive radix-2 decimation-in-time transform for one fixed size
pub struct FftEngine {
    // Transform size (power of two)
    size: usize,

    // exp(-2*pi*i*k/size) for k in 0..size/2, precomputed once
    twiddles: Vec<Complex32>,
}

impl FftEngine {
    pub fn new(size: usize) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(AnalysisError::InvalidWindowSize(size));
        }

        let twiddles = (0..size / 2)
            .map(|k| {
                let angle = -2.0 * PI * k as f64 / size as f64;
                let (sin, cos) = libm::sincos(angle);
                Complex32::new(cos as f32, sin as f32)
            })
            .collect();

        Ok(Self { size, twiddles })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Transform `window` into `out`. Both must be exactly `size()` long.
    pub fn process(&self, window: &[f32], out: &mut [Complex32]) {
        assert_eq!(window.len(), self.size, "window length must match transform size");
        assert_eq!(out.len(), self.size, "output length must match transform size");

        self.transform_view(StridedView::new(window), out);
    }

    /// Allocating variant of [`FftEngine::process`]
    pub fn transform(&self, window: &[f32]) -> Vec<Complex32> {
        let mut out = vec![Complex32::new(0.0, 0.0); self.size];
        self.process(window, &mut out);
        out
    }

    fn transform_view(&self, input: StridedView<'_>, out: &mut [Complex32]) {
        let n = input.len();
        if n == 1 {
            out[0] = Complex32::new(input.get(0), 0.0);
            return;
        }

        // Half spectra land in the two halves of `out`
        let (evens, odds) = out.split_at_mut(n / 2);
        self.transform_view(input.even(), evens);
        self.transform_view(input.odd(), odds);

        // A length-n sub-transform needs exp(-2*pi*i*k/n) = twiddles[k * size/n]
        let step = self.size / n;
        for (k, (even, odd)) in evens.iter_mut().zip(odds.iter_mut()).enumerate() {
            let e = *even;
            let v = self.twiddles[k * step] * *odd;
            *even = e + v;
            *odd = e - v;
        }
    }
}

/// One-shot fast transform of a power-of-two length window
pub fn fft(window: &[f32]) -> Result<Vec<Complex32>> {
    Ok(FftEngine::new(window.len())?.transform(window))
}

/// Direct O(N^2) summation of the discrete Fourier transform
///
/// Works for any length. Accumulates in f64 so it can serve as the
/// reference the fast transform is checked against.
pub fn dft(window: &[f32]) -> Vec<Complex32> {
    let n = window.len();
    (0..n)
        .map(|k| {
            let (mut re, mut im) = (0.0f64, 0.0f64);
            for (i, &sample) in window.iter().enumerate() {
                // k * i can exceed n, reduce first to keep the angle small
                let angle = -2.0 * PI * ((k * i) % n) as f64 / n as f64;
                let (sin, cos) = libm::sincos(angle);
                re += sample as f64 * cos;
                im += sample as f64 * sin;
            }
            Complex32::new(re as f32, im as f32)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use realfft::RealFftPlanner;

    fn test_signal(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let hashed = ((i * 7919 + 13) % 101) as f32 / 50.0 - 1.0;
                0.5 * hashed + (i as f32 * 0.37).sin()
            })
            .collect()
    }

    fn max_error(a: &[Complex32], b: &[Complex32]) -> f32 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (*x - *y).norm())
            .fold(0.0, f32::max)
    }

    fn peak(spectrum: &[Complex32]) -> f32 {
        spectrum.iter().map(|z| z.norm()).fold(0.0, f32::max)
    }

    #[test]
    fn strided_views_split_even_and_odd() {
        let data = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let view = StridedView::new(&data);
        let odd_even = view.odd().even();
        assert_eq!(odd_even.len(), 2);
        assert_eq!(odd_even.get(0), 1.0);
        assert_eq!(odd_even.get(1), 5.0);

        let even_odd = view.even().odd();
        assert_eq!(even_odd.get(0), 2.0);
        assert_eq!(even_odd.get(1), 6.0);
    }

    #[test]
    fn rejects_non_power_of_two_sizes() {
        assert!(matches!(
            FftEngine::new(6),
            Err(AnalysisError::InvalidWindowSize(6))
        ));
        assert!(FftEngine::new(0).is_err());
        assert!(fft(&[1.0, 2.0, 3.0]).is_err());
    }

    #[test]
    fn single_sample_is_its_own_spectrum() {
        let spectrum = fft(&[0.75]).unwrap();
        assert_eq!(spectrum, vec![Complex32::new(0.75, 0.0)]);
    }

    #[test]
    fn fast_transform_matches_direct_summation() {
        for exponent in 0..=10 {
            let size = 1usize << exponent;
            let signal = test_signal(size);

            let fast = fft(&signal).unwrap();
            let direct = dft(&signal);

            let scale = peak(&direct).max(1.0);
            let relative = max_error(&fast, &direct) / scale;
            assert!(relative < 1e-3, "size {size}: relative error {relative}");
        }
    }

    #[test]
    fn agrees_with_realfft_on_positive_frequencies() {
        let size = 2048;
        let signal = test_signal(size);

        let mut planner = RealFftPlanner::<f32>::new();
        let r2c = planner.plan_fft_forward(size);
        let mut input = signal.clone();
        let mut expected = r2c.make_output_vec();
        r2c.process(&mut input, &mut expected).unwrap();

        let ours = fft(&signal).unwrap();
        let relative = max_error(&ours[..=size / 2], &expected) / peak(&expected);
        assert!(relative < 1e-4, "relative error {relative}");
    }

    #[test]
    fn transform_is_linear() {
        let size = 256;
        let x = test_signal(size);
        let y: Vec<f32> = (0..size).map(|i| (i as f32 * 0.11).cos()).collect();
        let (a, b) = (2.5f32, -0.75f32);
        let mixed: Vec<f32> = x.iter().zip(&y).map(|(x, y)| a * x + b * y).collect();

        let engine = FftEngine::new(size).unwrap();
        let fx = engine.transform(&x);
        let fy = engine.transform(&y);
        let combined: Vec<Complex32> = fx.iter().zip(&fy).map(|(p, q)| *p * a + *q * b).collect();
        let fmixed = engine.transform(&mixed);

        let relative = max_error(&fmixed, &combined) / peak(&combined);
        assert!(relative < 1e-4, "relative error {relative}");
    }

    #[test]
    fn cosine_energy_lands_in_mirrored_bins() {
        let size = 64;
        let bin = 5;
        let signal: Vec<f32> = (0..size)
            .map(|i| (2.0 * std::f32::consts::PI * bin as f32 * i as f32 / size as f32).cos())
            .collect();

        let spectrum = fft(&signal).unwrap();
        let half = size as f32 / 2.0;
        for (k, z) in spectrum.iter().enumerate() {
            if k == bin || k == size - bin {
                assert!((z.norm() - half).abs() < 1e-3, "bin {k}: {}", z.norm());
            } else {
                assert!(z.norm() < 1e-3, "bin {k} leaked {}", z.norm());
            }
        }
    }

    #[test]
    fn constant_signal_is_pure_dc() {
        let spectrum = fft(&[1.0; 16]).unwrap();
        assert!((spectrum[0].re - 16.0).abs() < 1e-5);
        assert!(spectrum[1..].iter().all(|z| z.norm() < 1e-5));
    }

    #[test]
    #[should_panic(expected = "window length must match transform size")]
    fn mismatched_window_is_a_caller_bug() {
        let engine = FftEngine::new(8).unwrap();
        let mut out = vec![Complex32::new(0.0, 0.0); 8];
        engine.process(&[0.0; 4], &mut out);
    }
}
