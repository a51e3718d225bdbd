//! qlink Core Types
//!
//! This crate holds the small vocabulary shared by every other qlink crate:
//! opaque qubit handles, the gate kinds the distributed protocols need, the
//! measurement bases, and the classical [`Bitstring`] used both as the search
//! target and as the measured output.
//!
//! # Example
//!
//! ```rust
//! use qlink_ir::{Bitstring, Gate, QubitId};
//!
//! let target: Bitstring = "1011".parse().unwrap();
//! assert_eq!(target.len(), 4);
//! assert_eq!(target.count_ones(), 3);
//! assert_eq!(target.to_string(), "1011");
//!
//! assert_eq!(Gate::H.name(), "h");
//! assert_eq!(QubitId(3).to_string(), "q3");
//! ```

pub mod bitstring;
pub mod error;
pub mod gate;
pub mod qubit;

pub use bitstring::Bitstring;
pub use error::{IrError, IrResult};
pub use gate::{Basis, Gate};
pub use qubit::QubitId;
