//! Charge-cloud subdivision.
//!
//! A site with a finite cloud size can be drifted as several point-like
//! sub-clouds scattered around its centroid with a Gaussian profile.
//! Offsets are drawn from a ChaCha8 stream seeded from the engine seed and
//! the site's own coordinates, so the same site always splits the same way
//! regardless of which event it appears in.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

use siggen_core::{GeometryError, InteractionSite, Point, Vector};

/// Ratio of a Gaussian's FWHM to its standard deviation, `2·sqrt(2·ln 2)`.
const FWHM_PER_SIGMA: f64 = 2.354_820_045_030_949;

/// Upper bound on sub-clouds per site.
pub const MAX_SUBCLOUDS: usize = 256;

/// Sub-cloud positions with their share of the site energy (keV).
pub type SubClouds = SmallVec<[(Point, f64); 8]>;

/// How a site's charge is represented when drifting.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ChargeCloudModel {
    /// One point charge per carrier species at the site centroid.
    #[default]
    Point,
    /// `subclouds` point charges with a Gaussian spread set by the
    /// site's cloud FWHM. Sites without a cloud size stay point-like.
    Gaussian {
        /// Number of sub-clouds per site.
        subclouds: usize,
    },
}

impl ChargeCloudModel {
    /// Check the model is usable.
    pub fn validate(&self) -> Result<(), GeometryError> {
        match *self {
            Self::Point => Ok(()),
            Self::Gaussian { subclouds } if (1..=MAX_SUBCLOUDS).contains(&subclouds) => Ok(()),
            Self::Gaussian { subclouds } => Err(GeometryError::new(
                "cloud_subclouds",
                format!("must be in 1..={MAX_SUBCLOUDS}, got {subclouds}"),
            )),
        }
    }

    /// Split `site` into sub-clouds.
    ///
    /// The sub-cloud centroid is shifted back onto the site position so the
    /// split does not move the charge-weighted centre. Energies sum to the
    /// site energy.
    pub fn split(&self, site: &InteractionSite, seed: u64) -> SubClouds {
        let mut out = SubClouds::new();
        let (n, fwhm) = match (*self, site.cloud_fwhm) {
            (Self::Gaussian { subclouds }, Some(fwhm)) if subclouds > 1 && fwhm > 0.0 => {
                (subclouds, fwhm)
            }
            _ => {
                out.push((site.position, site.energy));
                return out;
            }
        };

        let sigma = fwhm / FWHM_PER_SIGMA;
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ site_hash(site));
        let offsets: SmallVec<[Vector; 8]> = (0..n)
            .map(|_| {
                Vector::new(
                    box_muller(&mut rng),
                    box_muller(&mut rng),
                    box_muller(&mut rng),
                ) * sigma
            })
            .collect();
        let mut mean = Vector::default();
        for o in &offsets {
            mean += *o;
        }
        let mean = mean * (1.0 / n as f64);

        let share = site.energy / n as f64;
        out.extend(
            offsets
                .into_iter()
                .map(|o| (site.position + (o - mean), share)),
        );
        out
    }
}

fn box_muller(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300);
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

fn site_hash(site: &InteractionSite) -> u64 {
    let p = site.position;
    [p.x, p.y, p.z, site.energy]
        .iter()
        .fold(0u64, |h, v| splitmix64(h ^ v.to_bits()))
}
