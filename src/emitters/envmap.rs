// Copyright @yucwang 2026

use crate::core::texture::Texture;
use crate::math::constants::{Float, ONE_MINUS_EPSILON, PI, Vector2f};

/// Piecewise-constant distribution over an equirectangular background.
///
/// `pdf` holds one normalised weight per cell (summing to 1), `conditional_cdf`
/// one running CDF per row, and `marginal_cdf` the running CDF over rows.
/// Weights are the texture intensity at each cell centre times `sin(pi * v)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundDistribution {
    width: usize,
    height: usize,
    pdf: Vec<Float>,
    conditional_cdf: Vec<Float>,
    marginal_cdf: Vec<Float>,
}

/// Table resolution for a background texture.
fn table_resolution(texture: &Texture) -> (usize, usize) {
    match texture {
        Texture::Solid(_) => (1, 1),
        Texture::Checkerboard(checks) => {
            let n = (checks.scale() as usize).max(1);
            (n, n)
        }
        Texture::Image(image) => image.dimensions(),
    }
}

impl BackgroundDistribution {
    pub fn build(texture: &Texture) -> Self {
        let (width, height) = table_resolution(texture);
        let mut pdf = vec![0.0; width * height];
        let mut conditional_cdf = vec![0.0; width * height];
        let mut marginal_cdf = vec![0.0; height];

        let mut total = 0.0;
        for y in 0..height {
            let v = (y as Float + 0.5) / height as Float;
            let sin_theta = (PI * v).sin();
            let row = y * width;
            let mut row_total = 0.0;
            for x in 0..width {
                let u = (x as Float + 0.5) / width as Float;
                let weight = texture.sample_intensity(u, v) * sin_theta;
                pdf[row + x] = weight;
                row_total += weight;
                conditional_cdf[row + x] = row_total;
            }
            normalize_running_sum(&mut conditional_cdf[row..row + width], row_total);
            total += row_total;
            marginal_cdf[y] = total;
        }
        normalize_running_sum(&mut marginal_cdf, total);

        if total > 0.0 {
            for p in pdf.iter_mut() {
                *p /= total;
            }
        } else {
            pdf.fill(1.0 / (width * height) as Float);
        }

        log::debug!("built background distribution {}x{} (total weight {})", width, height, total);
        Self { width, height, pdf, conditional_cdf, marginal_cdf }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Probability mass of cell `(x, y)`.
    pub fn cell_pdf(&self, x: usize, y: usize) -> Float {
        self.pdf[y * self.width + x]
    }

    pub fn conditional_cdf(&self, y: usize) -> &[Float] {
        &self.conditional_cdf[y * self.width..(y + 1) * self.width]
    }

    pub fn marginal_cdf(&self) -> &[Float] {
        &self.marginal_cdf
    }

    /// Inverse-CDF lookup: picks a row from the marginal CDF, then a column
    /// from that row's conditional CDF. Returns the cell-centre `(u, v)` and
    /// the density with respect to area in `[0, 1]^2`.
    pub fn sample(&self, u1: Float, u2: Float) -> (Vector2f, Float) {
        let y = find_interval(&self.marginal_cdf, u1);
        let x = find_interval(self.conditional_cdf(y), u2);
        let uv = Vector2f::new(
            (x as Float + 0.5) / self.width as Float,
            (y as Float + 0.5) / self.height as Float,
        );
        (uv, self.pdf(&uv))
    }

    /// Density with respect to area in `[0, 1]^2` at `uv`.
    pub fn pdf(&self, uv: &Vector2f) -> Float {
        let x = cell_index(uv.x, self.width);
        let y = cell_index(uv.y, self.height);
        self.cell_pdf(x, y) * (self.width * self.height) as Float
    }
}

/// Divides a running sum by its total; a zero total becomes uniform steps.
fn normalize_running_sum(cdf: &mut [Float], total: Float) {
    if total > 0.0 {
        for c in cdf.iter_mut() {
            *c /= total;
        }
    } else {
        let n = cdf.len() as Float;
        for (i, c) in cdf.iter_mut().enumerate() {
            *c = (i + 1) as Float / n;
        }
    }
}

/// First index whose CDF value exceeds `u`.
fn find_interval(cdf: &[Float], u: Float) -> usize {
    let u = u.clamp(0.0, ONE_MINUS_EPSILON);
    cdf.partition_point(|c| *c <= u).min(cdf.len() - 1)
}

fn cell_index(coord: Float, n: usize) -> usize {
    ((coord * n as Float).floor().max(0.0) as usize).min(n - 1)
}
