use bp_core::{Error, Image, ImageView, to_f32_into};

use crate::extractor::ChannelExtractor;
use crate::saliency::accumulate_abs_gradient;

/// Identity channel: the raw intensity frame cast to f32.
///
/// The cheap baseline the bit-planes variant is measured against; no
/// neighborhood operation, no smoothing parameters.
#[derive(Debug, Clone)]
pub struct RawIntensity {
    intensity: Image<f32>,
    computed: bool,
}

impl RawIntensity {
    pub fn new() -> Self {
        Self {
            intensity: Image::new_fill(0, 0, 0.0f32),
            computed: false,
        }
    }

    pub fn from_image(image: &ImageView<'_, u8>) -> Result<Self, Error> {
        let mut out = Self::new();
        out.compute(image)?;
        Ok(out)
    }

    pub fn compute(&mut self, image: &ImageView<'_, u8>) -> Result<(), Error> {
        if image.is_empty() {
            return Err(Error::EmptyImage);
        }

        if self.intensity.width() != image.width() || self.intensity.height() != image.height() {
            self.intensity = Image::new_fill(image.width(), image.height(), 0.0f32);
            self.computed = false;
        }
        to_f32_into(image, &mut self.intensity);
        self.computed = true;
        Ok(())
    }

    /// The sole channel. Any index is accepted for symmetry with the
    /// multi-channel variant and always yields the same grid.
    pub fn channel(&self, _i: usize) -> &Image<f32> {
        &self.intensity
    }

    pub fn channel_data(&self, _i: usize) -> &[f32] {
        self.intensity.data()
    }

    /// Forward-difference gradient magnitude of the intensity channel.
    pub fn compute_saliency_map(&self) -> Result<Image<f32>, Error> {
        if !self.computed {
            return Err(Error::NotComputed);
        }

        let w = self.intensity.width();
        let h = self.intensity.height();
        let mut out = Image::new_fill(w, h, 0.0f32);
        accumulate_abs_gradient(self.intensity.data(), w, h, out.data_mut());
        Ok(out)
    }
}

impl Default for RawIntensity {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelExtractor for RawIntensity {
    const NUM_CHANNELS: usize = 1;

    fn compute(&mut self, image: &ImageView<'_, u8>) -> Result<(), Error> {
        RawIntensity::compute(self, image)
    }

    fn channel(&self, i: usize) -> Result<&Image<f32>, Error> {
        Ok(RawIntensity::channel(self, i))
    }

    fn channel_data(&self, i: usize) -> Result<&[f32], Error> {
        Ok(RawIntensity::channel_data(self, i))
    }

    fn compute_saliency_map(&self) -> Result<Image<f32>, Error> {
        RawIntensity::compute_saliency_map(self)
    }
}

#[cfg(test)]
mod tests {
    use bp_core::{Error, Image};

    use super::RawIntensity;

    #[test]
    fn compute_is_an_exact_cast() {
        let img = Image::from_vec(3, 2, vec![0u8, 1, 2, 253, 254, 255]).expect("valid image");
        let raw = RawIntensity::from_image(&img.as_view()).expect("compute succeeds");

        assert_eq!(
            raw.channel(0).data(),
            &[0.0, 1.0, 2.0, 253.0, 254.0, 255.0]
        );
    }

    #[test]
    fn any_channel_index_yields_the_same_grid() {
        let img = Image::from_vec(2, 2, vec![9u8, 8, 7, 6]).expect("valid image");
        let raw = RawIntensity::from_image(&img.as_view()).expect("compute succeeds");

        assert_eq!(raw.channel_data(0), raw.channel_data(5));
        assert_eq!(raw.channel(3).data(), raw.channel(0).data());
    }

    #[test]
    fn empty_input_is_rejected() {
        let mut raw = RawIntensity::new();
        let empty = Image::from_vec(0, 0, Vec::<u8>::new()).expect("valid empty image");
        assert_eq!(
            raw.compute(&empty.as_view()).unwrap_err(),
            Error::EmptyImage
        );
    }

    #[test]
    fn saliency_requires_a_computed_frame() {
        let raw = RawIntensity::new();
        assert_eq!(
            raw.compute_saliency_map().unwrap_err(),
            Error::NotComputed
        );
    }

    #[test]
    fn saliency_tracks_local_texture() {
        // Flat frame: zero everywhere.
        let flat = Image::new_fill(8, 8, 100u8);
        let raw = RawIntensity::from_image(&flat.as_view()).expect("compute succeeds");
        let s = raw.compute_saliency_map().expect("saliency");
        assert!(s.data().iter().all(|&v| v == 0.0));

        // 1-px checkerboard: full swing away from the border.
        let mut cb = Image::new_fill(8, 8, 0u8);
        for y in 0..8 {
            for x in 0..8 {
                if (x + y) % 2 == 1 {
                    cb.data_mut()[y * 8 + x] = 255;
                }
            }
        }
        let raw = RawIntensity::from_image(&cb.as_view()).expect("compute succeeds");
        let s = raw.compute_saliency_map().expect("saliency");
        for y in 0..7 {
            for x in 0..7 {
                assert_eq!(s.data()[y * 8 + x], 510.0, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn recompute_is_deterministic() {
        let data: Vec<u8> = (0..64).map(|i| (i * 31 % 256) as u8).collect();
        let img = Image::from_vec(8, 8, data).expect("valid image");

        let mut raw = RawIntensity::new();
        raw.compute(&img.as_view()).expect("first compute");
        let first = raw.channel(0).data().to_vec();
        raw.compute(&img.as_view()).expect("second compute");
        assert_eq!(raw.channel(0).data(), first.as_slice());
    }
}
