use bp_core::{BorderMode, Image, ImageView};

use crate::kernel::GaussianKernel1D;

/// Reusable separable Gaussian smoother.
///
/// Evaluation order is fixed: horizontal pass over rows top-to-bottom into an
/// owned scratch image, then vertical pass top-to-bottom into `dst`. Border
/// taps go through [`BorderMode::map`]; interior taps run on plain slice
/// windows without mapping.
#[derive(Debug, Clone)]
pub struct GaussianBlur {
    kernel: GaussianKernel1D,
    tmp: Image<f32>,
}

impl GaussianBlur {
    pub fn new(sigma: f32) -> Self {
        Self {
            kernel: GaussianKernel1D::new(sigma),
            tmp: Image::new_fill(0, 0, 0.0f32),
        }
    }

    pub fn sigma(&self) -> f32 {
        self.kernel.sigma
    }

    /// Rebuilds the kernel only when `sigma` actually changes.
    pub fn set_sigma(&mut self, sigma: f32) {
        if (sigma - self.kernel.sigma).abs() > f32::EPSILON {
            self.kernel = GaussianKernel1D::new(sigma);
        }
    }

    /// Smooths `src` into `dst`, resizing scratch and `dst` as needed.
    pub fn apply_into(
        &mut self,
        src: &ImageView<'_, f32>,
        border: &BorderMode<f32>,
        dst: &mut Image<f32>,
    ) {
        let w = src.width();
        let h = src.height();

        if self.tmp.width() != w || self.tmp.height() != h {
            self.tmp = Image::new_fill(w, h, 0.0f32);
        }
        if dst.width() != w || dst.height() != h {
            *dst = Image::new_fill(w, h, 0.0f32);
        }
        if w == 0 || h == 0 {
            return;
        }

        let kernel = &self.kernel.weights;
        let radius = self.kernel.radius;

        for y in 0..h {
            let dst_row = &mut self.tmp.data_mut()[y * w..(y + 1) * w];
            convolve_row(src.row(y), kernel, radius, border, dst_row);
        }

        convolve_cols(self.tmp.data(), w, h, kernel, radius, border, dst.data_mut());
    }
}

fn convolve_row(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    out: &mut [f32],
) {
    let n = signal.len();
    let klen = kernel.len();

    if n <= 2 * radius {
        for (x, out_x) in out.iter_mut().enumerate() {
            *out_x = border_tap(signal, kernel, radius, border, x);
        }
        return;
    }

    for (x, out_x) in out.iter_mut().take(radius).enumerate() {
        *out_x = border_tap(signal, kernel, radius, border, x);
    }

    // Interior: the full kernel footprint is in bounds, no mapping needed.
    for (out_x, win) in out[radius..n - radius]
        .iter_mut()
        .zip(signal.windows(klen))
    {
        let mut acc = 0.0f32;
        for (&kv, &sv) in kernel.iter().zip(win) {
            acc += kv * sv;
        }
        *out_x = acc;
    }

    for (x, out_x) in out.iter_mut().enumerate().skip(n - radius) {
        *out_x = border_tap(signal, kernel, radius, border, x);
    }
}

fn border_tap(
    signal: &[f32],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    x: usize,
) -> f32 {
    let mut acc = 0.0f32;
    for (k, &kv) in kernel.iter().enumerate() {
        let i = x as isize + k as isize - radius as isize;
        let v = match border.map(i, signal.len()) {
            Some(idx) => signal[idx],
            // Only `Constant` declines to map for a non-empty signal.
            None => match border {
                BorderMode::Constant(c) => *c,
                _ => 0.0,
            },
        };
        acc += kv * v;
    }
    acc
}

fn convolve_cols(
    src: &[f32],
    w: usize,
    h: usize,
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    dst: &mut [f32],
) {
    for y in 0..h {
        let dst_row = &mut dst[y * w..(y + 1) * w];
        dst_row.fill(0.0);

        for (k, &kv) in kernel.iter().enumerate() {
            let sy = y as isize + k as isize - radius as isize;
            match border.map(sy, h) {
                Some(idx) => {
                    let src_row = &src[idx * w..(idx + 1) * w];
                    for (d, &s) in dst_row.iter_mut().zip(src_row) {
                        *d += kv * s;
                    }
                }
                None => {
                    if let BorderMode::Constant(c) = border {
                        for d in dst_row.iter_mut() {
                            *d += kv * *c;
                        }
                    }
                }
            }
        }
    }
}
