//! Conversion from the calculation step to the output period.

/// How calculation samples are reduced to output samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Resampling {
    /// Average the calculation samples falling in each output bin.
    /// Acts as a low-pass filter before decimation.
    #[default]
    BinAverage,
    /// Linearly interpolate the calculation samples at each output time.
    Linear,
}

impl Resampling {
    /// Reduce `input` (period `dt_in`) to `out_len` samples of period `dt_out`.
    ///
    /// Output bins beyond the input hold the last input value.
    pub fn apply(self, input: &[f64], dt_in: f64, dt_out: f64, out_len: usize) -> Vec<f64> {
        let Some(&last) = input.last() else {
            return vec![0.0; out_len];
        };
        let ratio = dt_out / dt_in;
        match self {
            Self::BinAverage => (0..out_len)
                .map(|k| {
                    let lo = ((k as f64 * ratio).floor() as usize).min(input.len());
                    let hi = (((k + 1) as f64 * ratio).floor() as usize).min(input.len());
                    if hi > lo {
                        input[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
                    } else {
                        last
                    }
                })
                .collect(),
            Self::Linear => (0..out_len)
                .map(|k| {
                    let x = k as f64 * ratio;
                    let i = x.floor() as usize;
                    if i + 1 >= input.len() {
                        last
                    } else {
                        let f = x - i as f64;
                        input[i] * (1.0 - f) + input[i + 1] * f
                    }
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bin_average_decimates() {
        let input: Vec<f64> = (0..10).map(f64::from).collect();
        let out = Resampling::BinAverage.apply(&input, 1.0, 5.0, 2);
        assert_eq!(out, vec![2.0, 7.0]);
    }

    #[test]
    fn linear_samples_at_output_times() {
        let input: Vec<f64> = (0..10).map(f64::from).collect();
        let out = Resampling::Linear.apply(&input, 1.0, 2.5, 4);
        assert_eq!(out, vec![0.0, 2.5, 5.0, 7.5]);
    }

    #[test]
    fn short_input_holds_last_value() {
        let out = Resampling::BinAverage.apply(&[1.0, 3.0], 1.0, 2.0, 3);
        assert_eq!(out, vec![2.0, 3.0, 3.0]);
        assert_eq!(Resampling::Linear.apply(&[], 1.0, 2.0, 2), vec![0.0, 0.0]);
    }

    proptest! {
        #[test]
        fn constant_input_is_preserved(c in -10.0f64..10.0, ratio in 1usize..20, n in 1usize..50) {
            let input = vec![c; n * ratio];
            for mode in [Resampling::BinAverage, Resampling::Linear] {
                let out = mode.apply(&input, 1.0, ratio as f64, n);
                prop_assert_eq!(out.len(), n);
                for v in out {
                    prop_assert!((v - c).abs() < 1e-9);
                }
            }
        }
    }
}
