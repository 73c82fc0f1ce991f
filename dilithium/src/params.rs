//! Parameter definitions for the Dilithium security levels.
//!
//! All three NIST security levels share the ring R_q = Z_q[X]/(X^256 + 1);
//! the per-level parameters control the matrix dimensions, the noise bounds
//! and the challenge sparsity.

use crate::errors::DilithiumError;

/// Prime modulus q = 2^23 - 2^13 + 1.
pub const Q: u32 = 8380417;

/// Ring dimension (degree of X^N + 1).
pub const N: usize = 256;

/// Number of bits in q.
pub const Q_BITS: usize = 23;

/// Number of bits dropped from t by Power2Round.
pub const D: usize = 13;

/// Size of key-generation and signing seeds in bytes.
pub const SEED_SIZE: usize = 32;

/// Size of the message digest mu in bytes.
pub const CRH_SIZE: usize = 64;

/// Cap on rejection-sampling attempts in the signing loop.
pub const MAX_SIGN_ATTEMPTS: usize = 64;

/// Dilithium security level.
///
/// The level selects one of the three NIST parameter sets. Level 3 is the
/// default, matching the reference implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SecurityLevel {
	/// NIST level 2 (Dilithium2).
	Two,
	/// NIST level 3 (Dilithium3).
	#[default]
	Three,
	/// NIST level 5 (Dilithium5).
	Five,
}

impl SecurityLevel {
	/// Parse a numeric security level (2, 3 or 5).
	///
	/// # Errors
	///
	/// Returns [`DilithiumError::InvalidConfig`] for any other value.
	pub fn from_int(level: u8) -> Result<Self, DilithiumError> {
		match level {
			2 => Ok(SecurityLevel::Two),
			3 => Ok(SecurityLevel::Three),
			5 => Ok(SecurityLevel::Five),
			_ => Err(DilithiumError::InvalidConfig),
		}
	}

	/// Numeric value of this level.
	pub fn as_int(&self) -> u8 {
		match self {
			SecurityLevel::Two => 2,
			SecurityLevel::Three => 3,
			SecurityLevel::Five => 5,
		}
	}

	/// Parameter set for this level.
	pub fn params(&self) -> &'static ParamSet {
		match self {
			SecurityLevel::Two => &LEVEL2,
			SecurityLevel::Three => &LEVEL3,
			SecurityLevel::Five => &LEVEL5,
		}
	}
}

/// Parameter set for one security level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSet {
	/// Rows of the public matrix A (length of t and s2).
	pub k: usize,
	/// Columns of the public matrix A (length of s1, y and z).
	pub l: usize,
	/// Coefficient bound for the secret vectors s1 and s2.
	pub eta: u32,
	/// Number of nonzero coefficients in the challenge polynomial.
	pub tau: u32,
	/// Rejection slack, beta = tau * eta.
	pub beta: u32,
	/// Coefficient bound for the signing mask y.
	pub gamma1: u32,
	/// Low-order rounding range; coefficients decompose at 2 * gamma2.
	pub gamma2: u32,
	/// Maximum Hamming weight of the hint vector.
	pub omega: usize,
}

impl ParamSet {
	/// Number of high-bits buckets, m = (q - 1) / (2 * gamma2).
	pub fn high_bits_range(&self) -> u32 {
		(Q - 1) / (2 * self.gamma2)
	}
}

static LEVEL2: ParamSet = ParamSet {
	k: 4,
	l: 4,
	eta: 2,
	tau: 39,
	beta: 78,
	gamma1: 1 << 17,
	gamma2: (Q - 1) / 88,
	omega: 80,
};

static LEVEL3: ParamSet = ParamSet {
	k: 6,
	l: 5,
	eta: 4,
	tau: 49,
	beta: 196,
	gamma1: 1 << 19,
	gamma2: (Q - 1) / 32,
	omega: 55,
};

static LEVEL5: ParamSet = ParamSet {
	k: 8,
	l: 7,
	eta: 2,
	tau: 60,
	beta: 120,
	gamma1: 1 << 19,
	gamma2: (Q - 1) / 32,
	omega: 75,
};
