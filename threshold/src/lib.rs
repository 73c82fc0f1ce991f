//! # Threshold Dilithium signatures
//!
//! This crate implements a (t, n) threshold variant of the Dilithium
//! signature scheme: any t of n participants can cooperate to produce a
//! signature that verifies under the single shared public key, and the full
//! secret key never exists at any single site after the dealer step.
//!
//! ## How it works
//!
//! The private vectors s1 and s2 are split coefficient-wise with an adapted
//! Shamir scheme over Z_q ([`AdaptedShamirSSS`]). A signing session fixes a
//! sharing of one low-norm mask vector y; each participant evaluates it at
//! their id to obtain y_u, then broadcasts the commitment A*y_u and the
//! response z_u = y_u + c*s1_share_u for the session's common challenge c.
//! The combiner Lagrange-interpolates the responses and commitments of any
//! t participants; by the linearity of interpolation the result equals
//! z = y + c*s1, so the output is an ordinary Dilithium signature.
//!
//! Like single-party Dilithium, a signing attempt is rejection-sampled: a
//! session whose combined response lands outside its norm bound fails with
//! [`ThresholdError::SigningBoundViolation`] and the orchestrator restarts
//! it under a fresh session seed.
//!
//! ## Quick Start
//!
//! ```
//! use quorum_crystals_dilithium::SecurityLevel;
//! use quorum_crystals_threshold::{ThresholdError, ThresholdSignature};
//!
//! // 1. Setup: a trusted dealer derives one key share per participant.
//! let scheme = ThresholdSignature::new(2, 3, SecurityLevel::Two)?;
//! let shares = scheme.distributed_keygen(Some(&[7u8; 32]))?;
//! let public_key = shares[0].public_key().clone();
//!
//! // 2. Sessions are rejection-sampled: retry with fresh seeds until the
//! //    combined response passes its bounds.
//! let signature = (0u8..64)
//! 	.find_map(|attempt| {
//! 		let session_seed = [attempt; 32];
//! 		// Any two participants sign the same message under one seed.
//! 		let partials = vec![
//! 			scheme.partial_sign(b"message", &shares[0], Some(&session_seed)).ok()?,
//! 			scheme.partial_sign(b"message", &shares[2], Some(&session_seed)).ok()?,
//! 		];
//! 		match scheme.combine_signatures(&partials, &public_key) {
//! 			Ok(signature) => Some(signature),
//! 			Err(ThresholdError::SigningBoundViolation) => None,
//! 			Err(_) => None,
//! 		}
//! 	})
//! 	.expect("a session should succeed well within 64 attempts");
//!
//! // 3. Anyone can verify against the shared public key.
//! assert!(scheme.verify(b"message", &signature, &public_key));
//! # Ok::<(), quorum_crystals_threshold::ThresholdError>(())
//! ```
//!
//! ## Security Warning
//!
//! **This implementation is for research and experimentation purposes
//! only.** It has not undergone a security audit and must not be used in
//! production systems without thorough review. Participants are assumed
//! honest-but-faulty; faulty contributions are caught by bound checks and
//! [`ThresholdSignature::verify_partial_signature`], not by verifiable
//! secret sharing.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod config;
mod error;
mod keygen;
pub mod keys;
pub mod shamir;
mod scheme;
mod signing;

pub use config::ThresholdConfig;
pub use error::{ThresholdError, ThresholdResult, MAX_PARTICIPANTS, MIN_THRESHOLD};
pub use keys::KeyShare;
pub use scheme::{ThresholdInfo, ThresholdSignature};
pub use shamir::{lagrange_coefficients, AdaptedShamirSSS, ParticipantId, ShamirShare};
pub use signing::PartialSignature;

// The arithmetic and signer layer, re-exported for callers that verify
// signatures or build on the ring types directly.
pub use quorum_crystals_dilithium::{
	Dilithium, DilithiumError, FieldElement, Matrix, Polynomial, PolynomialVector, PublicKey,
	SecurityLevel, Signature,
};
