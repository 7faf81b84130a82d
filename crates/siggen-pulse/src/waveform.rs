//! Uniformly sampled output waveforms.
//!
//! Sample `k` is the signal at `t = k·dt` ns. The first sample is at
//! `t = 0`, the moment the interaction deposits its charge.

use std::ops::AddAssign;

/// A signal sampled at a fixed period.
#[derive(Clone, Debug, PartialEq)]
pub struct Waveform {
    /// Sample values.
    pub samples: Vec<f64>,
    /// Sampling period (ns).
    pub dt: f64,
}

impl Waveform {
    /// Create a waveform from samples.
    pub fn new(samples: Vec<f64>, dt: f64) -> Self {
        Self { samples, dt }
    }

    /// A zero waveform of `len` samples.
    pub fn zeros(len: usize, dt: f64) -> Self {
        Self {
            samples: vec![0.0; len],
            dt,
        }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns `true` if there are no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Span covered by the samples, `len·dt` (ns).
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 * self.dt
    }

    /// Time of sample `index` (ns).
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 * self.dt
    }

    /// Linearly interpolated value at time `t`, holding the end values
    /// outside the sampled span.
    pub fn value_at(&self, t: f64) -> f64 {
        let Some(&last) = self.samples.last() else {
            return 0.0;
        };
        let offset = t / self.dt;
        if !(offset > 0.0) {
            return self.samples[0];
        }
        let idx = offset.floor() as usize;
        if idx + 1 >= self.samples.len() {
            return last;
        }
        let frac = offset - idx as f64;
        self.samples[idx] * (1.0 - frac) + self.samples[idx + 1] * frac
    }

    /// Largest sample value, or 0 for an empty waveform.
    pub fn max(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    /// Last sample value, or 0 for an empty waveform.
    pub fn final_value(&self) -> f64 {
        self.samples.last().copied().unwrap_or(0.0)
    }

    /// First time (ns) the waveform reaches `fraction` of its maximum,
    /// interpolated between samples.
    pub fn time_to_fraction(&self, fraction: f64) -> Option<f64> {
        let target = fraction * self.max();
        if !(target > 0.0) {
            return None;
        }
        let k = self.samples.iter().position(|&v| v >= target)?;
        if k == 0 {
            return Some(0.0);
        }
        let (a, b) = (self.samples[k - 1], self.samples[k]);
        Some(self.time_at(k - 1) + self.dt * (target - a) / (b - a))
    }

    /// The waveform scaled so its maximum is 1. A waveform with no
    /// positive sample is returned unchanged.
    pub fn normalized(&self) -> Waveform {
        let peak = self.max();
        if !(peak > 0.0) {
            return self.clone();
        }
        Waveform {
            samples: self.samples.iter().map(|v| v / peak).collect(),
            dt: self.dt,
        }
    }
}

impl AddAssign<&Waveform> for Waveform {
    /// Sample-wise sum. The shorter waveform is treated as zero-padded.
    fn add_assign(&mut self, rhs: &Waveform) {
        if rhs.samples.len() > self.samples.len() {
            self.samples.resize(rhs.samples.len(), 0.0);
        }
        for (a, b) in self.samples.iter_mut().zip(&rhs.samples) {
            *a += b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Waveform {
        Waveform::new(vec![0.0, 1.0, 2.0, 4.0, 4.0], 10.0)
    }

    #[test]
    fn interpolates_and_holds() {
        let w = ramp();
        assert_eq!(w.value_at(-5.0), 0.0);
        assert_eq!(w.value_at(15.0), 1.5);
        assert_eq!(w.value_at(100.0), 4.0);
        assert_eq!(w.duration(), 50.0);
    }

    #[test]
    fn fraction_crossing() {
        let w = ramp();
        assert_eq!(w.time_to_fraction(0.5), Some(20.0));
        assert_eq!(w.time_to_fraction(0.75), Some(25.0));
        assert_eq!(Waveform::zeros(4, 1.0).time_to_fraction(0.5), None);
    }

    #[test]
    fn normalization() {
        let n = ramp().normalized();
        assert_eq!(n.max(), 1.0);
        assert_eq!(n.samples[2], 0.5);
        let z = Waveform::zeros(3, 1.0);
        assert_eq!(z.normalized(), z);
    }

    #[test]
    fn sum_pads_shorter() {
        let mut a = Waveform::new(vec![1.0, 1.0], 1.0);
        a += &Waveform::new(vec![1.0, 2.0, 3.0], 1.0);
        assert_eq!(a.samples, vec![2.0, 3.0, 3.0]);
    }
}
