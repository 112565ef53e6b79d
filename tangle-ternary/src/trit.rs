// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::Error;

use std::{convert::TryFrom, fmt};

/// A balanced trit, the fundamental unit of ternary information.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(i8)]
pub enum Btrit {
    /// The trit `-1`.
    NegOne = -1,
    /// The trit `0`.
    Zero = 0,
    /// The trit `1`.
    PlusOne = 1,
}

impl Btrit {
    /// Returns the trit incremented by one, carrying over `1` back to `-1`.
    ///
    /// The second element of the pair is `true` when the increment wrapped.
    pub fn overflowing_increment(self) -> (Self, bool) {
        match self {
            Btrit::NegOne => (Btrit::Zero, false),
            Btrit::Zero => (Btrit::PlusOne, false),
            Btrit::PlusOne => (Btrit::NegOne, true),
        }
    }
}

impl Default for Btrit {
    fn default() -> Self {
        Btrit::Zero
    }
}

impl From<Btrit> for i8 {
    fn from(trit: Btrit) -> Self {
        trit as i8
    }
}

impl TryFrom<i8> for Btrit {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Btrit::NegOne),
            0 => Ok(Btrit::Zero),
            1 => Ok(Btrit::PlusOne),
            _ => Err(Error::InvalidTrit(value)),
        }
    }
}

impl fmt::Display for Btrit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as i8)
    }
}
