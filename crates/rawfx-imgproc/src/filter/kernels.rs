/// Create a gaussian blur kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel.
/// * `sigma` - The sigma of the gaussian kernel.
///
/// # Returns
///
/// A vector of the kernel.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Vec<f32> {
    let mut kernel = Vec::with_capacity(kernel_size);

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    kernel
}

/// Odd kernel size covering three standard deviations on each side.
pub fn gaussian_kernel_size(sigma: f32) -> usize {
    2 * (3.0 * sigma.abs()).ceil() as usize + 1
}

/// Create the 3x3 Sobel kernels `(kx, ky)`.
///
/// `kx` responds to horizontal intensity change, `ky` to vertical change.
pub fn sobel_kernels_3x3() -> ([[i32; 3]; 3], [[i32; 3]; 3]) {
    let kernel_x = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
    let kernel_y = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];
    (kernel_x, kernel_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sobel_kernels_3x3() {
        let (kx, ky) = sobel_kernels_3x3();
        // ky is the transpose of kx
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(kx[i][j], ky[j][i]);
            }
        }
        assert_eq!(kx.iter().flatten().sum::<i32>(), 0);
    }

    #[test]
    fn test_gaussian_kernel_1d() {
        let kernel = gaussian_kernel_1d(5, 0.5);

        let expected = [
            0.00026386508,
            0.10645077,
            0.78657067,
            0.10645077,
            0.00026386508,
        ];

        for (&k, &e) in kernel.iter().zip(expected.iter()) {
            assert_relative_eq!(k, e, epsilon = 1e-6);
        }
        assert_relative_eq!(kernel.iter().sum::<f32>(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_gaussian_kernel_size() {
        assert_eq!(gaussian_kernel_size(0.5), 5);
        assert_eq!(gaussian_kernel_size(-1.0), 7);
        assert_eq!(gaussian_kernel_size(6.0), 37);
    }
}
