//! Classical bitstrings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IrError, IrResult};

/// An ordered sequence of classical bits, in register order.
///
/// The textual form writes bit 0 first, so `"10"` means qubit 0 measured
/// `1` and qubit 1 measured `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bitstring(Vec<bool>);

impl Bitstring {
    /// Build a bitstring from bits, rejecting the empty sequence.
    pub fn from_bits(bits: Vec<bool>) -> IrResult<Self> {
        if bits.is_empty() {
            return Err(IrError::EmptyBitstring);
        }
        Ok(Self(bits))
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for a constructed bitstring; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bit at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.0.get(index).copied()
    }

    /// The bits as a slice.
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    /// Iterate over the bits in register order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    /// Number of `1` bits.
    pub fn count_ones(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }

    /// Indices of the `0` bits.
    pub fn zero_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, b)| (!*b).then_some(i))
    }
}

impl FromStr for Bitstring {
    type Err = IrError;

    fn from_str(s: &str) -> IrResult<Self> {
        let bits = s
            .trim()
            .chars()
            .enumerate()
            .map(|(position, ch)| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                ch => Err(IrError::InvalidBit { ch, position }),
            })
            .collect::<IrResult<Vec<_>>>()?;
        Self::from_bits(bits)
    }
}

impl TryFrom<String> for Bitstring {
    type Error = IrError;

    fn try_from(value: String) -> IrResult<Self> {
        value.parse()
    }
}

impl From<Bitstring> for String {
    fn from(value: Bitstring) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Bitstring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
