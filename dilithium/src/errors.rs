//! Error types for the Dilithium signer.

use core::fmt;

/// Errors surfaced by key generation, signing and verification.
///
/// The enum is closed and carries no data: error values never transport
/// coefficients or other key-derived material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DilithiumError {
	/// Unsupported security level or inconsistent construction parameters.
	InvalidConfig,
	/// The rejection-sampling loop exceeded its attempt cap.
	RejectionExhausted,
	/// Signature verification failed.
	VerificationFailed,
	/// A serialised value could not be decoded.
	InvalidEncoding,
}

impl fmt::Display for DilithiumError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DilithiumError::InvalidConfig => {
				write!(f, "invalid Dilithium configuration")
			},
			DilithiumError::RejectionExhausted => {
				write!(f, "rejection sampling exceeded the attempt cap")
			},
			DilithiumError::VerificationFailed => {
				write!(f, "signature verification failed")
			},
			DilithiumError::InvalidEncoding => {
				write!(f, "malformed serialised value")
			},
		}
	}
}

impl std::error::Error for DilithiumError {}
