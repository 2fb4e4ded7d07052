use bp_core::{Error, Image, ImageView};

/// Capability surface shared by the channel extractor variants.
///
/// The channel count is a compile-time constant per implementor and never
/// changes at runtime. Channel contents are valid only after a successful
/// [`compute`](ChannelExtractor::compute) and stay readable until the next
/// one on the same instance.
pub trait ChannelExtractor {
    const NUM_CHANNELS: usize;

    fn size(&self) -> usize {
        Self::NUM_CHANNELS
    }

    /// Replaces all channel contents from one 8-bit intensity frame.
    ///
    /// All-or-nothing: on error the previous channel contents are left
    /// unchanged.
    fn compute(&mut self, image: &ImageView<'_, u8>) -> Result<(), Error>;

    fn channel(&self, i: usize) -> Result<&Image<f32>, Error>;

    fn channel_data(&self, i: usize) -> Result<&[f32], Error>;

    /// Per-pixel scalar field, roughly monotonic in local texture strength.
    /// The caller owns the returned grid.
    fn compute_saliency_map(&self) -> Result<Image<f32>, Error>;
}

#[cfg(test)]
mod tests {
    use bp_core::Image;

    use super::ChannelExtractor;
    use crate::{BitPlanes, RawIntensity};

    fn exercise<E: ChannelExtractor>(extractor: &mut E) {
        let data: Vec<u8> = (0..30).map(|i| (i * 37 % 256) as u8).collect();
        let img = Image::from_vec(6, 5, data).expect("valid image");

        extractor.compute(&img.as_view()).expect("compute succeeds");
        assert_eq!(extractor.size(), E::NUM_CHANNELS);

        for i in 0..extractor.size() {
            let c = extractor.channel(i).expect("in-range channel");
            assert_eq!((c.width(), c.height()), (6, 5));
            assert_eq!(extractor.channel_data(i).expect("channel data").len(), 30);
        }

        let saliency = extractor.compute_saliency_map().expect("saliency");
        assert_eq!((saliency.width(), saliency.height()), (6, 5));
    }

    #[test]
    fn both_variants_share_the_capability_surface() {
        exercise(&mut RawIntensity::new());
        exercise(&mut BitPlanes::default());
        assert_eq!(<RawIntensity as ChannelExtractor>::NUM_CHANNELS, 1);
        assert_eq!(<BitPlanes as ChannelExtractor>::NUM_CHANNELS, 8);
    }
}
