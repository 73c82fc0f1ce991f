//! # Reference Dilithium signer for the quorum-crystals threshold scheme
//!
//! This crate implements the ring R_q = Z_q[X]/(X^256 + 1) with
//! q = 8380417, the polynomial-vector and matrix arithmetic built on it, and
//! a functionally complete Dilithium-family signer (key generation,
//! rejection-sampled signing, verification) at NIST levels 2, 3 and 5.
//!
//! The crate is the arithmetic and signing substrate of
//! `quorum-crystals-threshold`; it has no knowledge of secret sharing. The
//! signer is reference-grade: multiplication runs through a negacyclic NTT,
//! but the encodings are the crate's own unambiguous wire format rather than
//! the FIPS 204 packed bytes, and no constant-time hardening is claimed.
//!
//! ## Example
//!
//! ```
//! use quorum_crystals_dilithium::{Dilithium, SecurityLevel};
//!
//! let dilithium = Dilithium::new(SecurityLevel::Three);
//! let keypair = dilithium.keygen(Some(&[7u8; 32]));
//! let signature = dilithium.sign(b"hello", &keypair, None).unwrap();
//! assert!(dilithium.verify(b"hello", &signature, &keypair.public));
//! ```
//!
//! ## Security Warning
//!
//! **This implementation is for research and experimentation purposes
//! only.** It has not undergone a security audit and must not be used in
//! production systems without thorough review.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod encoding;
pub mod errors;
pub mod field;
pub mod matrix;
mod ntt;
pub mod params;
pub mod poly;
pub mod polyvec;
pub mod rounding;
pub mod sampling;
pub mod sign;

pub use errors::DilithiumError;
pub use field::FieldElement;
pub use matrix::Matrix;
pub use params::{ParamSet, SecurityLevel, D, N, Q};
pub use poly::Polynomial;
pub use polyvec::PolynomialVector;
pub use sign::{Dilithium, Keypair, PrivateKey, PublicKey, Signature};
