use num::One;

/// Calculate ceil(a / b).
pub fn div_ceil<T>(a: T, b: T) -> T where
    T: std::ops::Add<T, Output = T> + std::ops::Sub<T, Output = T> +
       std::ops::Div<T, Output = T> + One + Copy
{
    (a + b - T::one()) / b
}

/// Calculate ceil(log2(x)) for x > 0.
pub fn log2_ceil(x: usize) -> usize {
    assert!(x > 0);
    (usize::BITS - (x - 1).leading_zeros()) as usize
}
