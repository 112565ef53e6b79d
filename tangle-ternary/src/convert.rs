// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

//! Conversions between trit sequences, tryte sequences and native integers.
//!
//! Trit sequences are interpreted in balanced ternary with the least significant trit first:
//! `value = Σ tᵢ·3ⁱ`.

use crate::{Btrit, Error, TritBuf, Tryte, TryteBuf, TRITS_PER_TRYTE};

use std::convert::TryFrom;

/// Converts a trit slice into trytes. The slice length must be a multiple of three.
pub fn trits_to_trytes(trits: &[Btrit]) -> Result<TryteBuf, Error> {
    if trits.len() % TRITS_PER_TRYTE != 0 {
        return Err(Error::InvalidLength(trits.len()));
    }

    Ok(trits
        .chunks(TRITS_PER_TRYTE)
        .map(|chunk| Tryte::from_trits([chunk[0], chunk[1], chunk[2]]))
        .collect())
}

/// Converts a tryte slice into trits, three per tryte.
pub fn trytes_to_trits(trytes: &[Tryte]) -> TritBuf {
    TryteBuf::from_trytes(trytes).as_trits()
}

/// Encodes a signed integer into `len` balanced trits, least significant first.
///
/// Fails with [`Error::RangeExceeded`] if the value does not fit into `len` trits.
pub fn trits_from_i64(value: i64, len: usize) -> Result<TritBuf, Error> {
    let mut trits = TritBuf::zeros(len);
    trits_from_i64_into(value, &mut trits)?;
    Ok(trits)
}

/// Encodes a signed integer into an existing trit slice, least significant first.
pub fn trits_from_i64_into(mut value: i64, trits: &mut [Btrit]) -> Result<(), Error> {
    for trit in trits.iter_mut() {
        let rem = match value.rem_euclid(3) {
            2 => -1,
            rem => rem as i8,
        };
        // Safe because `rem` is in `{-1, 0, 1}`.
        *trit = Btrit::try_from(rem).unwrap();
        value = (value - rem as i64) / 3;
    }

    if value == 0 {
        Ok(())
    } else {
        Err(Error::RangeExceeded)
    }
}

/// Evaluates a balanced trit sequence as a signed integer.
///
/// Fails with [`Error::RangeExceeded`] if the value overflows an `i64`.
pub fn trits_to_i64(trits: &[Btrit]) -> Result<i64, Error> {
    let mut value: i64 = 0;

    // Horner evaluation from the most significant non-zero trit down.
    for trit in trits.iter().rev().skip_while(|t| **t == Btrit::Zero) {
        value = value
            .checked_mul(3)
            .and_then(|v| v.checked_add(*trit as i64))
            .ok_or(Error::RangeExceeded)?;
    }

    Ok(value)
}

/// Adds `rhs` onto `lhs` in balanced ternary, with the carry in `{-1, 0, 1}`.
///
/// `rhs` may be shorter than `lhs`; a final carry beyond `lhs` is discarded, so the addition is
/// performed modulo `3^lhs.len()` around the balanced range.
pub fn add_inplace(lhs: &mut [Btrit], rhs: &[Btrit]) {
    let mut carry = 0i8;

    for (i, trit) in lhs.iter_mut().enumerate() {
        let rhs_trit = rhs.get(i).map(|t| *t as i8).unwrap_or(0);
        let mut sum = *trit as i8 + rhs_trit + carry;

        if sum > 1 {
            sum -= 3;
            carry = 1;
        } else if sum < -1 {
            sum += 3;
            carry = -1;
        } else {
            carry = 0;
        }

        // Safe because `sum` has been folded into `{-1, 0, 1}`.
        *trit = Btrit::try_from(sum).unwrap();
    }
}

/// Increments a balanced trit sequence by one unit, wrapping around its range.
pub fn increment_inplace(trits: &mut [Btrit]) {
    for trit in trits.iter_mut() {
        let (incremented, overflown) = trit.overflowing_increment();
        *trit = incremented;
        if !overflown {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn increment_carries() {
        let mut trits = TritBuf::zeros(3);

        // 0 -> 1 -> 2 -> 3: exercises both carry branches.
        for expected in [[1, 0, 0], [-1, 1, 0], [0, 1, 0]] {
            increment_inplace(&mut trits);
            let expected = TritBuf::try_from_i8s(expected).unwrap();
            assert_eq!(trits.as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn add_discards_final_carry() {
        let mut lhs = TritBuf::filled(3, Btrit::PlusOne);
        let rhs = TritBuf::try_from_i8s([1]).unwrap();

        // 13 + 1 wraps to -13 in three trits.
        add_inplace(lhs.as_slice_mut(), &rhs);
        assert_eq!(trits_to_i64(&lhs).unwrap(), -13);
    }
}
