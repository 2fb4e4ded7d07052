use std::mem;

use bp_core::{BorderMode, Error, Image, ImageView, to_f32_into};
use bp_filter::GaussianBlur;

use crate::census::fill_census_planes;
use crate::extractor::ChannelExtractor;
use crate::saliency::accumulate_abs_gradient;

/// Number of census comparisons, and therefore planes, per pixel.
pub const NUM_PLANES: usize = 8;

/// Default bandwidth for both smoothing stages.
pub const DEFAULT_SIGMA: f32 = 0.5;

const BLUR_BORDER: BorderMode<f32> = BorderMode::Reflect101;

/// Census-transform bit-plane decomposition of an intensity frame.
///
/// Pipeline per [`compute`](BitPlanes::compute) call:
/// 1. cast the 8-bit input to f32;
/// 2. pre-smooth with `sigma_census` when it is > 0;
/// 3. run the census comparator, filling eight hard {0.0, 1.0} planes;
/// 4. post-smooth each plane independently with `sigma_bit_planes` when it
///    is > 0, turning the hard masks into subpixel-differentiable indicator
///    fields.
///
/// A sigma of exactly 0 disables its stage; the comparator then sees the
/// raw cast and the planes stay strictly binary.
///
/// All grids are owned and refilled in place each frame; a dimension change
/// reallocates them and invalidates prior contents. Sigma setters never
/// recompute: a new value takes effect on the next `compute` only.
#[derive(Debug, Clone)]
pub struct BitPlanes {
    sigma_ct: f32,
    sigma_bp: f32,
    intensity: Image<f32>,
    scratch: Image<f32>,
    planes: [Image<f32>; NUM_PLANES],
    ct_blur: Option<GaussianBlur>,
    bp_blur: Option<GaussianBlur>,
    computed: bool,
}

impl BitPlanes {
    pub fn new(sigma_ct: f32, sigma_bp: f32) -> Result<Self, Error> {
        validate_sigma(sigma_ct)?;
        validate_sigma(sigma_bp)?;
        Ok(Self::with_sigmas(sigma_ct, sigma_bp))
    }

    pub fn from_image(
        image: &ImageView<'_, u8>,
        sigma_ct: f32,
        sigma_bp: f32,
    ) -> Result<Self, Error> {
        let mut out = Self::new(sigma_ct, sigma_bp)?;
        out.compute(image)?;
        Ok(out)
    }

    fn with_sigmas(sigma_ct: f32, sigma_bp: f32) -> Self {
        Self {
            sigma_ct,
            sigma_bp,
            intensity: Image::new_fill(0, 0, 0.0f32),
            scratch: Image::new_fill(0, 0, 0.0f32),
            planes: std::array::from_fn(|_| Image::new_fill(0, 0, 0.0f32)),
            ct_blur: None,
            bp_blur: None,
            computed: false,
        }
    }

    pub fn compute(&mut self, image: &ImageView<'_, u8>) -> Result<(), Error> {
        if image.is_empty() {
            return Err(Error::EmptyImage);
        }

        let w = image.width();
        let h = image.height();
        self.ensure_dims(w, h);
        to_f32_into(image, &mut self.intensity);

        if self.sigma_ct > 0.0 {
            let blur = reuse_blur(&mut self.ct_blur, self.sigma_ct);
            blur.apply_into(&self.intensity.as_view(), &BLUR_BORDER, &mut self.scratch);
            mem::swap(&mut self.intensity, &mut self.scratch);
        }

        fill_census_planes(self.intensity.data(), w, h, &mut self.planes);

        if self.sigma_bp > 0.0 {
            let blur = reuse_blur(&mut self.bp_blur, self.sigma_bp);
            for plane in &mut self.planes {
                blur.apply_into(&plane.as_view(), &BLUR_BORDER, &mut self.scratch);
                mem::swap(plane, &mut self.scratch);
            }
        }

        self.computed = true;
        Ok(())
    }

    pub fn channel(&self, i: usize) -> Result<&Image<f32>, Error> {
        self.planes.get(i).ok_or(Error::ChannelIndexOutOfRange {
            index: i,
            count: NUM_PLANES,
        })
    }

    pub fn channel_data(&self, i: usize) -> Result<&[f32], Error> {
        self.channel(i).map(|c| c.data())
    }

    pub fn set_sigma_census(&mut self, sigma: f32) -> Result<(), Error> {
        validate_sigma(sigma)?;
        self.sigma_ct = sigma;
        Ok(())
    }

    pub fn set_sigma_bit_planes(&mut self, sigma: f32) -> Result<(), Error> {
        validate_sigma(sigma)?;
        self.sigma_bp = sigma;
        Ok(())
    }

    pub fn sigma_census(&self) -> f32 {
        self.sigma_ct
    }

    pub fn sigma_bit_planes(&self) -> f32 {
        self.sigma_bp
    }

    /// Sum of forward-difference gradient magnitudes over all eight planes,
    /// accumulated in plane order 0..8.
    pub fn compute_saliency_map(&self) -> Result<Image<f32>, Error> {
        if !self.computed {
            return Err(Error::NotComputed);
        }

        let w = self.intensity.width();
        let h = self.intensity.height();
        let mut out = Image::new_fill(w, h, 0.0f32);
        for plane in &self.planes {
            accumulate_abs_gradient(plane.data(), w, h, out.data_mut());
        }
        Ok(out)
    }

    fn ensure_dims(&mut self, w: usize, h: usize) {
        if self.intensity.width() == w && self.intensity.height() == h {
            return;
        }

        self.intensity = Image::new_fill(w, h, 0.0f32);
        self.scratch = Image::new_fill(w, h, 0.0f32);
        for plane in &mut self.planes {
            *plane = Image::new_fill(w, h, 0.0f32);
        }
        self.computed = false;
    }
}

impl Default for BitPlanes {
    fn default() -> Self {
        Self::with_sigmas(DEFAULT_SIGMA, DEFAULT_SIGMA)
    }
}

impl ChannelExtractor for BitPlanes {
    const NUM_CHANNELS: usize = NUM_PLANES;

    fn compute(&mut self, image: &ImageView<'_, u8>) -> Result<(), Error> {
        BitPlanes::compute(self, image)
    }

    fn channel(&self, i: usize) -> Result<&Image<f32>, Error> {
        BitPlanes::channel(self, i)
    }

    fn channel_data(&self, i: usize) -> Result<&[f32], Error> {
        BitPlanes::channel_data(self, i)
    }

    fn compute_saliency_map(&self) -> Result<Image<f32>, Error> {
        BitPlanes::compute_saliency_map(self)
    }
}

fn validate_sigma(sigma: f32) -> Result<(), Error> {
    if sigma.is_finite() && sigma >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidSigma(sigma))
    }
}

fn reuse_blur(slot: &mut Option<GaussianBlur>, sigma: f32) -> &mut GaussianBlur {
    let blur = slot.get_or_insert_with(|| GaussianBlur::new(sigma));
    blur.set_sigma(sigma);
    blur
}

#[cfg(test)]
mod tests {
    use bp_core::{Error, Image};

    use super::{BitPlanes, DEFAULT_SIGMA, NUM_PLANES};

    fn checkerboard(n: usize) -> Image<u8> {
        let mut img = Image::new_fill(n, n, 0u8);
        for y in 0..n {
            for x in 0..n {
                if (x + y) % 2 == 1 {
                    img.data_mut()[y * n + x] = 255;
                }
            }
        }
        img
    }

    #[test]
    fn always_eight_planes_matching_input_dims() {
        let img = Image::new_fill(6, 4, 90u8);
        let bp = BitPlanes::from_image(&img.as_view(), 0.5, 0.5).expect("compute succeeds");

        for i in 0..NUM_PLANES {
            let c = bp.channel(i).expect("in-range channel");
            assert_eq!((c.width(), c.height()), (6, 4));
        }
        let err = bp.channel(NUM_PLANES).unwrap_err();
        assert_eq!(
            err,
            Error::ChannelIndexOutOfRange {
                index: 8,
                count: 8
            }
        );
    }

    #[test]
    fn defaults_follow_the_reference_settings() {
        let bp = BitPlanes::default();
        assert_eq!(bp.sigma_census(), DEFAULT_SIGMA);
        assert_eq!(bp.sigma_bit_planes(), DEFAULT_SIGMA);
    }

    #[test]
    fn disabled_smoothing_yields_strictly_binary_planes() {
        let data: Vec<u8> = (0..96).map(|i| (i * 53 % 256) as u8).collect();
        let img = Image::from_vec(12, 8, data).expect("valid image");
        let bp = BitPlanes::from_image(&img.as_view(), 0.0, 0.0).expect("compute succeeds");

        for i in 0..NUM_PLANES {
            let data = bp.channel_data(i).expect("channel data");
            assert!(data.iter().all(|&v| v == 0.0 || v == 1.0), "plane {i}");
        }
    }

    #[test]
    fn smoothing_produces_fractional_indicator_fields() {
        let img = checkerboard(12);
        let bp = BitPlanes::from_image(&img.as_view(), 0.0, 1.0).expect("compute succeeds");

        // The 4-connected comparison planes alternate per pixel, so their
        // smoothed versions must contain strictly fractional values.
        let data = bp.channel_data(1).expect("channel data");
        assert!(data.iter().any(|&v| v > 0.0 && v < 1.0));
        assert!(data.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn uniform_frame_resolves_every_comparison_to_one() {
        let img = Image::new_fill(4, 4, 128u8);
        let bp = BitPlanes::from_image(&img.as_view(), 0.0, 0.0).expect("compute succeeds");

        // Replication border policy: the outer ring compares against
        // replicated pixels, so ties make even border codes all-ones.
        for i in 0..NUM_PLANES {
            let data = bp.channel_data(i).expect("channel data");
            assert!(data.iter().all(|&v| v == 1.0), "plane {i}");
        }
    }

    #[test]
    fn compute_is_deterministic() {
        let data: Vec<u8> = (0..160).map(|i| (i * 97 % 256) as u8).collect();
        let img = Image::from_vec(16, 10, data).expect("valid image");

        let mut a = BitPlanes::default();
        let mut b = BitPlanes::default();
        a.compute(&img.as_view()).expect("compute a");
        b.compute(&img.as_view()).expect("compute b");
        a.compute(&img.as_view()).expect("recompute a");

        for i in 0..NUM_PLANES {
            assert_eq!(
                a.channel_data(i).expect("a data"),
                b.channel_data(i).expect("b data"),
                "plane {i}"
            );
        }
    }

    #[test]
    fn sigma_change_only_affects_the_next_compute() {
        let img = checkerboard(10);
        let mut bp = BitPlanes::new(0.0, 0.0).expect("valid sigmas");
        bp.compute(&img.as_view()).expect("compute succeeds");

        let before = bp.channel_data(0).expect("channel data").to_vec();
        bp.set_sigma_bit_planes(1.5).expect("valid sigma");
        assert_eq!(bp.channel_data(0).expect("channel data"), before.as_slice());
        assert_eq!(bp.sigma_bit_planes(), 1.5);

        bp.compute(&img.as_view()).expect("recompute");
        assert_ne!(bp.channel_data(0).expect("channel data"), before.as_slice());
    }

    #[test]
    fn negative_or_non_finite_sigma_is_rejected() {
        assert_eq!(
            BitPlanes::new(-0.1, 0.5).unwrap_err(),
            Error::InvalidSigma(-0.1)
        );

        let mut bp = BitPlanes::default();
        assert_eq!(
            bp.set_sigma_census(-1.0).unwrap_err(),
            Error::InvalidSigma(-1.0)
        );
        assert!(bp.set_sigma_bit_planes(f32::NAN).is_err());
        // Rejected values leave the previous setting in place.
        assert_eq!(bp.sigma_census(), DEFAULT_SIGMA);
        assert_eq!(bp.sigma_bit_planes(), DEFAULT_SIGMA);
    }

    #[test]
    fn failed_compute_preserves_previous_channels() {
        let img = Image::new_fill(4, 4, 128u8);
        let mut bp = BitPlanes::new(0.0, 0.0).expect("valid sigmas");
        bp.compute(&img.as_view()).expect("compute succeeds");

        let empty = Image::from_vec(0, 0, Vec::<u8>::new()).expect("valid empty image");
        assert_eq!(
            bp.compute(&empty.as_view()).unwrap_err(),
            Error::EmptyImage
        );

        for i in 0..NUM_PLANES {
            let data = bp.channel_data(i).expect("channel data");
            assert!(data.iter().all(|&v| v == 1.0), "plane {i}");
        }
    }

    #[test]
    fn resize_reallocates_and_recomputes() {
        let small = Image::new_fill(4, 4, 10u8);
        let large = Image::new_fill(8, 6, 10u8);

        let mut bp = BitPlanes::new(0.0, 0.0).expect("valid sigmas");
        bp.compute(&small.as_view()).expect("small frame");
        bp.compute(&large.as_view()).expect("large frame");

        let c = bp.channel(0).expect("channel");
        assert_eq!((c.width(), c.height()), (8, 6));
    }

    #[test]
    fn saliency_separates_flat_from_textured() {
        let flat = Image::new_fill(8, 8, 77u8);
        let bp = BitPlanes::from_image(&flat.as_view(), 0.0, 0.0).expect("compute succeeds");
        let s = bp.compute_saliency_map().expect("saliency");
        assert!(s.data().iter().all(|&v| v == 0.0));

        let bp =
            BitPlanes::from_image(&checkerboard(8).as_view(), 0.0, 0.0).expect("compute succeeds");
        let s = bp.compute_saliency_map().expect("saliency");
        // The four 4-connected planes alternate per pixel; each contributes
        // |gx| + |gy| = 2 away from the clamped edges.
        for y in 1..6 {
            for x in 1..6 {
                assert!((s.data()[y * 8 + x] - 8.0).abs() < 1e-5, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn saliency_requires_a_computed_frame() {
        let bp = BitPlanes::default();
        assert_eq!(
            bp.compute_saliency_map().unwrap_err(),
            Error::NotComputed
        );
    }
}
