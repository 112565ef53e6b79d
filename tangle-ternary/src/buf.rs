// Copyright 2021 IOTA Stiftung
// SPDX-License-Identifier: Apache-2.0

use crate::{convert, Btrit, Error, Tryte, TRITS_PER_TRYTE};

use std::{
    convert::TryFrom,
    fmt, iter,
    ops::{Deref, DerefMut},
};

/// An owned, growable buffer of balanced trits.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TritBuf {
    inner: Vec<Btrit>,
}

impl TritBuf {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer of `len` zero trits.
    pub fn zeros(len: usize) -> Self {
        Self::filled(len, Btrit::Zero)
    }

    /// Creates a buffer of `len` copies of `trit`.
    pub fn filled(len: usize, trit: Btrit) -> Self {
        Self {
            inner: vec![trit; len],
        }
    }

    /// Creates a buffer holding a copy of the given trit slice.
    pub fn from_trits(trits: &[Btrit]) -> Self {
        Self { inner: trits.to_vec() }
    }

    /// Creates a buffer from raw `i8` trit values, rejecting values outside of `{-1, 0, 1}`.
    pub fn try_from_i8s<I: IntoIterator<Item = i8>>(values: I) -> Result<Self, Error> {
        values.into_iter().map(Btrit::try_from).collect()
    }

    /// Appends a trit to the end of the buffer.
    pub fn push(&mut self, trit: Btrit) {
        self.inner.push(trit);
    }

    /// Interprets the buffer as a trit slice.
    pub fn as_slice(&self) -> &[Btrit] {
        &self.inner
    }

    /// Interprets the buffer as a mutable trit slice.
    pub fn as_slice_mut(&mut self) -> &mut [Btrit] {
        &mut self.inner
    }
}

impl Deref for TritBuf {
    type Target = [Btrit];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for TritBuf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl iter::FromIterator<Btrit> for TritBuf {
    fn from_iter<I: IntoIterator<Item = Btrit>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl iter::Extend<Btrit> for TritBuf {
    fn extend<I: IntoIterator<Item = Btrit>>(&mut self, iter: I) {
        self.inner.extend(iter);
    }
}

impl fmt::Debug for TritBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TritBuf[")?;
        for trit in self.iter() {
            write!(f, "{}, ", trit)?;
        }
        write!(f, "]")
    }
}

/// An owned buffer of trytes, the unit in which ternary data travels over the wire.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct TryteBuf {
    inner: Vec<Tryte>,
}

impl TryteBuf {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer of `len` `9` trytes.
    pub fn zeros(len: usize) -> Self {
        Self {
            inner: vec![Tryte::Nine; len],
        }
    }

    /// Parses a tryte string, rejecting characters outside of `[9A-Z]`.
    pub fn try_from_str(s: &str) -> Result<Self, Error> {
        s.chars().map(Tryte::try_from).collect()
    }

    /// Creates a buffer holding a copy of the given tryte slice.
    pub fn from_trytes(trytes: &[Tryte]) -> Self {
        Self {
            inner: trytes.to_vec(),
        }
    }

    /// Appends a tryte to the end of the buffer.
    pub fn push(&mut self, tryte: Tryte) {
        self.inner.push(tryte);
    }

    /// Expands the buffer into trits, three per tryte.
    pub fn as_trits(&self) -> TritBuf {
        let mut trits = TritBuf::zeros(self.len() * TRITS_PER_TRYTE);
        for (i, tryte) in self.iter().enumerate() {
            trits[i * TRITS_PER_TRYTE..(i + 1) * TRITS_PER_TRYTE].copy_from_slice(&tryte.as_trits());
        }
        trits
    }

    /// Recomposes a tryte buffer from a trit slice whose length is a multiple of three.
    pub fn from_trits(trits: &[Btrit]) -> Result<Self, Error> {
        convert::trits_to_trytes(trits)
    }

    /// Interprets the buffer as a tryte slice.
    pub fn as_slice(&self) -> &[Tryte] {
        &self.inner
    }
}

impl Deref for TryteBuf {
    type Target = [Tryte];

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl iter::FromIterator<Tryte> for TryteBuf {
    fn from_iter<I: IntoIterator<Item = Tryte>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for TryteBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tryte in self.iter() {
            write!(f, "{}", tryte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for TryteBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TryteBuf({})", self)
    }
}
