// Copyright (c) The qm-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integer helpers shared by the merge and encoding stages.

/// Returns the number of set bits in the binary representation of `value`.
#[inline]
pub fn ones_count(value: u32) -> u32 {
    value.count_ones()
}

/// Returns true if `value` is a (positive) power of two.
#[inline]
pub fn is_power_of_two(value: u32) -> bool {
    value.is_power_of_two()
}

/// Returns the bit position `p` such that `value == 2^p`, or `None` if `value` is not a power of
/// two.
#[inline]
pub fn bit_position(value: u32) -> Option<u32> {
    is_power_of_two(value).then(|| value.trailing_zeros())
}

/// Renders `value` as a binary string of exactly `width` characters, most significant bit first.
///
/// Panics if `value` doesn't fit in `width` bits.
///
/// ```
/// use qm_min::bits::to_binary;
///
/// assert_eq!(to_binary(5, 4), "0101");
/// assert_eq!(to_binary(0, 1), "0");
/// ```
pub fn to_binary(value: u32, width: usize) -> String {
    assert!(
        width >= 32 || value >> width == 0,
        "value {} must fit in {} bits",
        value,
        width
    );
    format!("{:0width$b}", value, width = width)
}
