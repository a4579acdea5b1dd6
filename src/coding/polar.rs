//! Polar transform d = u·G_N, where G_N is the n-th Kronecker power of the kernel
//! [[1, 0], [1, 1]], applied in natural (not bit-reversed) order.

/// Apply the polar transform to the given bits in place.
pub fn transform(bits: &mut [u8]) {
    let n = bits.len();
    assert!(n.is_power_of_two());

    let mut half = 1;

    while half < n {
        for block in bits.chunks_mut(2 * half) {
            let (upper, lower) = block.split_at_mut(half);

            for (u, &l) in upper.iter_mut().zip(lower.iter()) {
                *u ^= l;
            }
        }

        half *= 2;
    }
}

/// Compute the weight of row `i` of G_N.
pub fn row_weight(i: usize) -> usize {
    1 << i.count_ones()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rows() {
        let mut u = [0, 0, 0, 1, 0, 0, 0, 0];
        transform(&mut u[..]);
        assert_eq!(u, [1, 1, 1, 1, 0, 0, 0, 0]);

        let mut u = [1, 0, 0, 0, 0, 0, 0, 0];
        transform(&mut u[..]);
        assert_eq!(u, [1, 0, 0, 0, 0, 0, 0, 0]);

        let mut u = [0, 0, 0, 0, 0, 0, 0, 1];
        transform(&mut u[..]);
        assert_eq!(u, [1; 8]);

        for i in 0..32 {
            let mut u = [0; 32];
            u[i] = 1;
            transform(&mut u[..]);
            assert_eq!(u.iter().filter(|&&b| b == 1).count(), row_weight(i));
        }
    }

    #[test]
    fn test_involution() {
        let bits: Vec<u8> = (0..64).map(|i| (i * 5 % 7 % 2) as u8).collect();
        let mut coded = bits.clone();

        transform(&mut coded[..]);
        assert_ne!(coded, bits);
        transform(&mut coded[..]);
        assert_eq!(coded, bits);
    }

    #[test]
    fn test_linear() {
        let a: Vec<u8> = (0..16).map(|i| (i % 3 == 0) as u8).collect();
        let b: Vec<u8> = (0..16).map(|i| (i % 5 == 1) as u8).collect();
        let mut sum: Vec<u8> = a.iter().zip(&b).map(|(x, y)| x ^ y).collect();
        let (mut a, mut b) = (a, b);

        transform(&mut a[..]);
        transform(&mut b[..]);
        transform(&mut sum[..]);

        assert!(sum.iter().zip(a.iter().zip(&b)).all(|(&s, (&x, &y))| s == x ^ y));
    }
}
