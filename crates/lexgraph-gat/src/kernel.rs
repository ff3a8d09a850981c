//! Dense kernels over flattened row-major matrices.

/// `out = x (n x k) @ w (k x m)`, flattened row-major.
pub fn matmul(x: &[f32], n: usize, k: usize, w: &[f32], m: usize) -> Vec<f32> {
    debug_assert_eq!(x.len(), n * k);
    debug_assert_eq!(w.len(), k * m);
    let mut out = vec![0.0f32; n * m];
    for i in 0..n {
        for h in 0..k {
            let xv = x[i * k + h];
            if xv == 0.0 {
                continue;
            }
            let row = &w[h * m..(h + 1) * m];
            let dst = &mut out[i * m..(i + 1) * m];
            for (o, wv) in dst.iter_mut().zip(row) {
                *o += xv * wv;
            }
        }
    }
    out
}

/// Row-wise softmax in place on a flattened `rows x cols` matrix.
///
/// Numerical stability: subtract the row max before exponentiation. Rows
/// that are entirely `-inf` (fully masked) produce NaN, swept to zero.
pub fn row_softmax(mat: &mut [f32], rows: usize, cols: usize) {
    for i in 0..rows {
        let row = &mut mat[i * cols..(i + 1) * cols];
        let max_val = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let mut sum = 0.0f32;
        for v in row.iter_mut() {
            *v = (*v - max_val).exp();
            sum += *v;
        }
        if sum > 0.0 {
            for v in row.iter_mut() {
                *v /= sum;
            }
        }
    }
    for v in mat.iter_mut() {
        if v.is_nan() {
            *v = 0.0;
        }
    }
}

pub fn leaky_relu(x: f32, slope: f32) -> f32 {
    if x >= 0.0 {
        x
    } else {
        slope * x
    }
}

pub fn elu(x: f32) -> f32 {
    if x >= 0.0 {
        x
    } else {
        x.exp() - 1.0
    }
}

pub fn relu(x: f32) -> f32 {
    x.max(0.0)
}

pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn matmul_identity() {
        // 2x2 identity times a 2x3 matrix.
        let eye = vec![1.0, 0.0, 0.0, 1.0];
        let w = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let out = matmul(&eye, 2, 2, &w, 3);
        assert_eq!(out, w);
    }

    #[test]
    fn row_softmax_sums_to_one() {
        let mut mat = vec![1.0, 2.0, 3.0, 4.0];
        row_softmax(&mut mat, 2, 2);
        assert_relative_eq!(mat[0] + mat[1], 1.0, epsilon = 1e-5);
        assert_relative_eq!(mat[2] + mat[3], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn fully_masked_row_becomes_zero() {
        let mut mat = vec![f32::NEG_INFINITY, f32::NEG_INFINITY, 0.5, 0.5];
        row_softmax(&mut mat, 2, 2);
        assert_eq!(&mat[..2], &[0.0, 0.0]);
        assert_relative_eq!(mat[2] + mat[3], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn activations_behave() {
        assert_eq!(leaky_relu(2.0, 0.2), 2.0);
        assert_relative_eq!(leaky_relu(-1.0, 0.2), -0.2);
        assert!(elu(-5.0) > -1.0);
        assert_eq!(relu(-3.0), 0.0);
        assert_relative_eq!(sigmoid(0.0), 0.5);
    }
}
