//! The threshold signature scheme handle.

use zeroize::Zeroize;

use quorum_crystals_dilithium::{
	params::{SecurityLevel, SEED_SIZE},
	sampling, Dilithium, PublicKey, Signature,
};

use crate::{
	config::ThresholdConfig,
	error::ThresholdResult,
	keygen,
	keys::KeyShare,
	signing::{self, PartialSignature},
};

/// Introspection data for a threshold handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdInfo {
	/// Minimum number of cooperating participants.
	pub threshold: u16,
	/// Total number of participants.
	pub participants: u16,
	/// Dilithium security level.
	pub security_level: SecurityLevel,
	/// Matrix rows (length of t, s2 and commitments).
	pub k: usize,
	/// Matrix columns (length of s1, y and z).
	pub l: usize,
}

/// A (t, n) threshold Dilithium signature scheme.
///
/// The handle carries no key material; it binds the threshold parameters to
/// a security level and drives key generation, per-participant signing and
/// combination.
///
/// # Example
///
/// ```
/// use quorum_crystals_dilithium::SecurityLevel;
/// use quorum_crystals_threshold::{ThresholdError, ThresholdSignature};
///
/// let scheme = ThresholdSignature::new(2, 3, SecurityLevel::Two)?;
/// let shares = scheme.distributed_keygen(Some(&[7u8; 32]))?;
/// let public_key = shares[0].public_key().clone();
///
/// // One session per attempt; restart on a bound violation.
/// let mut signature = None;
/// for attempt in 0u8..64 {
/// 	let session = [attempt; 32];
/// 	let partials: Vec<_> = shares[..2]
/// 		.iter()
/// 		.map(|share| scheme.partial_sign(b"hello", share, Some(&session)))
/// 		.collect::<Result<_, _>>()?;
/// 	match scheme.combine_signatures(&partials, &public_key) {
/// 		Ok(sig) => {
/// 			signature = Some(sig);
/// 			break;
/// 		},
/// 		Err(ThresholdError::SigningBoundViolation) => continue,
/// 		Err(err) => return Err(err),
/// 	}
/// }
/// let signature = signature.expect("a session should succeed");
/// assert!(scheme.verify(b"hello", &signature, &public_key));
/// # Ok::<(), quorum_crystals_threshold::ThresholdError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ThresholdSignature {
	config: ThresholdConfig,
	level: SecurityLevel,
}

impl ThresholdSignature {
	/// Create a scheme handle for (t, n) at the given security level.
	///
	/// # Errors
	///
	/// [`crate::ThresholdError::InvalidConfig`] unless 2 <= t <= n <= 255.
	pub fn new(threshold: u16, participants: u16, level: SecurityLevel) -> ThresholdResult<Self> {
		let config = ThresholdConfig::new(threshold, participants)?;
		Ok(Self { config, level })
	}

	/// The threshold configuration.
	pub fn config(&self) -> ThresholdConfig {
		self.config
	}

	/// The Dilithium security level.
	pub fn level(&self) -> SecurityLevel {
		self.level
	}

	/// Generate key shares for all participants.
	///
	/// The reference design runs a trusted dealer: a standard Dilithium key
	/// pair is generated, both secret vectors are split coefficient-wise,
	/// and the transient private key is wiped before this method returns.
	/// Every share carries the same public key. With a seed the output is
	/// fully deterministic.
	pub fn distributed_keygen(
		&self,
		seed: Option<&[u8; SEED_SIZE]>,
	) -> ThresholdResult<Vec<KeyShare>> {
		keygen::dealer_keygen(self.config, self.level, seed)
	}

	/// Produce this participant's partial signature for a session.
	///
	/// All participants of one session must be handed the same message,
	/// public key and session seed; their partials then agree on the
	/// challenge and combine into one signature. Without a seed a fresh one
	/// is drawn, which is only useful for single-orchestrator setups that
	/// pass the same `PartialSignature` set to [`Self::combine_signatures`].
	pub fn partial_sign(
		&self,
		message: &[u8],
		key_share: &KeyShare,
		session_seed: Option<&[u8; SEED_SIZE]>,
	) -> ThresholdResult<PartialSignature> {
		let mut seed = match session_seed {
			Some(seed) => *seed,
			None => sampling::random_seed(),
		};
		let partial = signing::partial_sign(self.config, self.level, message, key_share, &seed);
		seed.zeroize();
		partial
	}

	/// Combine partial signatures into a standard Dilithium signature.
	///
	/// Requires at least t partials with one common challenge and distinct
	/// participant ids; the first t are interpolated, the rest are ignored.
	/// The combined response must satisfy the same bounds a single-party
	/// signer enforces, otherwise the session failed and is restarted with
	/// a fresh seed.
	pub fn combine_signatures(
		&self,
		partials: &[PartialSignature],
		public_key: &PublicKey,
	) -> ThresholdResult<Signature> {
		signing::combine_signatures(self.config, self.level, partials, public_key)
	}

	/// Check one partial signature against the contributor's key share.
	pub fn verify_partial_signature(
		&self,
		message: &[u8],
		partial: &PartialSignature,
		key_share: &KeyShare,
	) -> bool {
		signing::verify_partial_signature(self.level, message, partial, key_share)
	}

	/// Verify a combined signature under the shared public key.
	pub fn verify(&self, message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
		Dilithium::new(self.level).verify(message, signature, public_key)
	}

	/// The scheme's parameters, for introspection.
	pub fn get_threshold_info(&self) -> ThresholdInfo {
		let params = self.level.params();
		ThresholdInfo {
			threshold: self.config.threshold(),
			participants: self.config.participants(),
			security_level: self.level,
			k: params.k,
			l: params.l,
		}
	}
}
