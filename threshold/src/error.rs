//! Error types for threshold operations.

use core::fmt;

use quorum_crystals_dilithium::DilithiumError;

/// Result type for threshold operations.
pub type ThresholdResult<T> = Result<T, ThresholdError>;

/// Errors surfaced by the threshold scheme.
///
/// The enum is closed and carries no data: error values never transport
/// coefficients, share contents or anything derived from them, and a bound
/// violation does not reveal which coefficient or participant caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdError {
	/// Construction-time violation of the (t, n, level) constraints.
	InvalidConfig,
	/// Fewer than t shares or partial signatures were supplied.
	InsufficientShares,
	/// Duplicate or zero participant ids in a share set.
	InvalidShareSet,
	/// Shares of different vector lengths were mixed.
	ShareLengthMismatch,
	/// Partial signatures carry differing challenges.
	InconsistentSession,
	/// The combined response or hint exceeds its norm bound; the session
	/// should be restarted with a fresh seed.
	SigningBoundViolation,
	/// The signing rejection loop exceeded its attempt cap; retry with a
	/// fresh seed.
	RejectionExhausted,
	/// Signature verification failed (surfaced by strict verification).
	VerificationFailed,
	/// A serialised value could not be decoded.
	InvalidEncoding,
}

impl fmt::Display for ThresholdError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ThresholdError::InvalidConfig => {
				write!(f, "invalid threshold configuration")
			},
			ThresholdError::InsufficientShares => {
				write!(f, "not enough shares to reach the threshold")
			},
			ThresholdError::InvalidShareSet => {
				write!(f, "duplicate or zero participant ids in share set")
			},
			ThresholdError::ShareLengthMismatch => {
				write!(f, "shares of different vector lengths were mixed")
			},
			ThresholdError::InconsistentSession => {
				write!(f, "partial signatures belong to different sessions")
			},
			ThresholdError::SigningBoundViolation => {
				write!(f, "combined signature exceeds its norm bound")
			},
			ThresholdError::RejectionExhausted => {
				write!(f, "rejection sampling exceeded the attempt cap")
			},
			ThresholdError::VerificationFailed => {
				write!(f, "signature verification failed")
			},
			ThresholdError::InvalidEncoding => {
				write!(f, "malformed serialised value")
			},
		}
	}
}

impl std::error::Error for ThresholdError {}

impl From<DilithiumError> for ThresholdError {
	fn from(err: DilithiumError) -> Self {
		match err {
			DilithiumError::InvalidConfig => ThresholdError::InvalidConfig,
			DilithiumError::RejectionExhausted => ThresholdError::RejectionExhausted,
			DilithiumError::VerificationFailed => ThresholdError::VerificationFailed,
			DilithiumError::InvalidEncoding => ThresholdError::InvalidEncoding,
		}
	}
}

/// Maximum number of participants; ids must stay nonzero in one byte.
pub const MAX_PARTICIPANTS: u16 = 255;

/// Minimum threshold value.
pub const MIN_THRESHOLD: u16 = 2;

/// Validate (t, n) threshold parameters.
pub fn validate_threshold_params(t: u16, n: u16) -> ThresholdResult<()> {
	if t < MIN_THRESHOLD || t > n || n > MAX_PARTICIPANTS {
		return Err(ThresholdError::InvalidConfig);
	}
	Ok(())
}
