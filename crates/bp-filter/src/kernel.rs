/// Normalized 1D Gaussian kernel.
///
/// Conventions:
/// - `radius = ceil(3*sigma)`, minimum 1.
/// - `weights.len() == 2*radius + 1`.
/// - `weights` is normalized such that `sum(weights) ~= 1`.
#[derive(Debug, Clone)]
pub struct GaussianKernel1D {
    pub sigma: f32,
    pub radius: usize,
    pub weights: Vec<f32>,
}

impl GaussianKernel1D {
    pub fn new(sigma: f32) -> Self {
        assert!(
            sigma.is_finite() && sigma > 0.0,
            "sigma must be > 0 and finite"
        );

        let radius = ((3.0 * sigma).ceil() as usize).max(1);
        let len = 2 * radius + 1;

        let sigma2 = sigma * sigma;
        let mut weights = vec![0.0f32; len];
        for (i, w) in weights.iter_mut().enumerate() {
            let x = i as isize - radius as isize;
            let xf = x as f32;
            *w = (-(xf * xf) / (2.0 * sigma2)).exp();
        }

        let sum: f32 = weights.iter().sum();
        for w in &mut weights {
            *w /= sum;
        }

        Self {
            sigma,
            radius,
            weights,
        }
    }
}
