// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use tangle_crypto::HASH_LENGTH;
use tangle_ternary::{convert, Btrit, TritBuf};

/// The number of message values in one normalization fragment.
const FRAGMENT_VALUES: usize = 27;

/// Errors occurring while normalizing a hash.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// A message of a length other than one hash unit.
    #[error("invalid message length {0}")]
    InvalidMessageLength(usize),
}

/// Normalizes a bundle hash so that the 27 values of each of its three fragments sum to zero.
///
/// Winternitz signatures leak key material in proportion to the signed values; balancing each
/// fragment fixes the amount of revealed information. Values saturate at ±13, so a normalized
/// hash may still contain 13s - bundle finalization re-rolls the hash until none remain.
pub fn normalize(hash: &[Btrit]) -> Result<TritBuf, NormalizeError> {
    if hash.len() != HASH_LENGTH {
        return Err(NormalizeError::InvalidMessageLength(hash.len()));
    }

    let mut normalized = TritBuf::zeros(HASH_LENGTH);

    for (fragment_index, fragment) in hash.chunks(FRAGMENT_VALUES * 3).enumerate() {
        let mut values = [0i8; FRAGMENT_VALUES];
        for (value, trits) in values.iter_mut().zip(fragment.chunks(3)) {
            *value = trits[0] as i8 + 3 * trits[1] as i8 + 9 * trits[2] as i8;
        }

        let mut sum: i16 = values.iter().map(|v| *v as i16).sum();

        if sum > 0 {
            for value in values.iter_mut() {
                while sum > 0 && *value > -13 {
                    *value -= 1;
                    sum -= 1;
                }
            }
        } else {
            for value in values.iter_mut() {
                while sum < 0 && *value < 13 {
                    *value += 1;
                    sum += 1;
                }
            }
        }

        for (value_index, value) in values.iter().enumerate() {
            let offset = fragment_index * FRAGMENT_VALUES * 3 + value_index * 3;
            // A message value always fits three trits.
            convert::trits_from_i64_into(*value as i64, &mut normalized[offset..offset + 3]).unwrap();
        }
    }

    Ok(normalized)
}

/// Returns `true` if any value of the normalized hash equals 13, making the matching Winternitz
/// chain an empty chain that reveals the key chunk itself.
pub fn has_insecure_value(normalized: &[Btrit]) -> bool {
    normalized
        .chunks(3)
        .any(|trits| trits[0] as i8 + 3 * trits[1] as i8 + 9 * trits[2] as i8 == 13)
}
