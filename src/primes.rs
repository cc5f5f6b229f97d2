//! Fixed table of prime bucket capacities.
//!
//! The values are the classic "good sizes for hash tables" progression:
//! each step is roughly double the previous one and every entry is prime,
//! which keeps modulo bucket selection well spread for realistic key sets.
//! Growth walks this table left to right and never leaves it.

/// Bucket capacities in growth order. The final entry is a hard ceiling;
/// the cursor never advances past it.
pub(crate) const PRIMES: [usize; 22] = [
    769,
    1_543,
    3_079,
    6_151,
    12_289,
    24_593,
    49_157,
    98_317,
    196_613,
    393_241,
    786_433,
    1_572_869,
    3_145_739,
    6_291_469,
    12_582_917,
    25_165_843,
    50_331_653,
    100_663_319,
    201_326_611,
    402_653_189,
    805_306_457,
    1_610_612_741,
];

/// Capacity at a cursor position.
#[inline]
pub(crate) fn capacity_for(index: usize) -> usize {
    PRIMES[index]
}

/// True when the cursor sits on the final prime and cannot advance.
#[inline]
pub(crate) fn is_last(index: usize) -> bool {
    index == PRIMES.len() - 1
}
