//! Classical parity of measured correction bits.

/// True iff an odd number of `bits` are set.
///
/// ```rust
/// use qlink_dist::parity::parity;
///
/// assert!(!parity(&[]));
/// assert!(parity(&[true, false]));
/// assert!(!parity(&[true, true]));
/// ```
pub fn parity(bits: &[bool]) -> bool {
    bits.iter().fold(false, |acc, bit| acc ^ bit)
}
