//! # Game Mathematics
//!
//! Roundness measures how many trailing zero digits a number has in a given base.
//! A round number is an integer that ends with one or more zero digits, so 590 is
//! rounder than 592 but less round than 600.

/// The surface value the player polishes.
///
/// Level scaling multiplies the goal by growing powers of the base, so this is wider
/// than 32 bits.
pub type Surface = i64;

/// Counts the trailing zero digits of `number` written in `base`.
///
/// Zero counts as round once. The sign of `number` does not matter. Bases below 2
/// have no meaningful digits and always report 0.
///
/// # Examples
///
/// ```
/// use smoothlife::roundness;
///
/// assert_eq!(roundness(100, 10), 2);
/// assert_eq!(roundness(318, 10), 0);
/// assert_eq!(roundness(20, 10), 1);
/// assert_eq!(roundness(-4000, 10), 3);
/// assert_eq!(roundness(0, 10), 1);
/// assert_eq!(roundness(8, 2), 3);
/// ```
pub fn roundness(number: Surface, base: Surface) -> u32 {
    if number == 0 {
        return 1;
    }
    if base < 2 {
        return 0;
    }

    let mut rest = number;
    let mut zeros = 0;
    while rest % base == 0 {
        rest /= base;
        zeros += 1;
    }
    zeros
}
