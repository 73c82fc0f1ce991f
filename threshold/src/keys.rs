//! Key material held by a single participant.

use zeroize::{Zeroize, ZeroizeOnDrop};

use quorum_crystals_dilithium::PublicKey;

use crate::{
	error::{ThresholdError, ThresholdResult},
	shamir::{ParticipantId, ShamirShare},
};

/// One participant's long-lived threshold key material.
///
/// **The share halves are secret and must be kept confidential.** The
/// public key is the same for every participant of one key generation. Both
/// share vectors are wiped when the value is dropped, and `Debug` never
/// prints them.
#[derive(Clone)]
pub struct KeyShare {
	participant_id: ParticipantId,
	s1_share: ShamirShare,
	s2_share: ShamirShare,
	public_key: PublicKey,
}

impl KeyShare {
	/// Assemble a key share.
	///
	/// # Errors
	///
	/// [`ThresholdError::InvalidConfig`] if the two shares do not carry the
	/// participant's id or their lengths do not match the public key's
	/// dimensions.
	pub fn new(
		participant_id: ParticipantId,
		s1_share: ShamirShare,
		s2_share: ShamirShare,
		public_key: PublicKey,
	) -> ThresholdResult<Self> {
		if s1_share.participant_id() != participant_id
			|| s2_share.participant_id() != participant_id
		{
			return Err(ThresholdError::InvalidConfig);
		}
		let params = public_key.level().params();
		if s1_share.vector_length() != params.l || s2_share.vector_length() != params.k {
			return Err(ThresholdError::ShareLengthMismatch);
		}
		Ok(Self { participant_id, s1_share, s2_share, public_key })
	}

	/// The participant this key share belongs to.
	pub fn participant_id(&self) -> ParticipantId {
		self.participant_id
	}

	/// Share of the secret vector s1 (length l).
	pub fn s1_share(&self) -> &ShamirShare {
		&self.s1_share
	}

	/// Share of the secret vector s2 (length k).
	pub fn s2_share(&self) -> &ShamirShare {
		&self.s2_share
	}

	/// The shared public key.
	pub fn public_key(&self) -> &PublicKey {
		&self.public_key
	}

	/// Serialise as id || s1 share vector || s2 share vector || public key.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = self.participant_id.to_be_bytes().to_vec();
		out.extend_from_slice(&self.s1_share.share_vector().to_bytes());
		out.extend_from_slice(&self.s2_share.share_vector().to_bytes());
		out.extend_from_slice(&self.public_key.to_bytes());
		out
	}

	/// Parse a key share.
	pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
		if bytes.len() < 2 {
			return Err(ThresholdError::InvalidEncoding);
		}
		let id = u16::from_be_bytes([bytes[0], bytes[1]]);

		let (s1_vector, s1_len) = quorum_crystals_dilithium::encoding::read_vector(&bytes[2..])?;
		let (s2_vector, s2_len) =
			quorum_crystals_dilithium::encoding::read_vector(&bytes[2 + s1_len..])?;
		let public_key = PublicKey::from_bytes(&bytes[2 + s1_len + s2_len..])
			.map_err(|_| ThresholdError::InvalidEncoding)?;

		let s1_share =
			ShamirShare::new(id, s1_vector).map_err(|_| ThresholdError::InvalidEncoding)?;
		let s2_share =
			ShamirShare::new(id, s2_vector).map_err(|_| ThresholdError::InvalidEncoding)?;
		KeyShare::new(id, s1_share, s2_share, public_key)
			.map_err(|_| ThresholdError::InvalidEncoding)
	}
}

impl Zeroize for KeyShare {
	fn zeroize(&mut self) {
		self.participant_id.zeroize();
		self.s1_share.zeroize();
		self.s2_share.zeroize();
	}
}

impl ZeroizeOnDrop for KeyShare {}

impl core::fmt::Debug for KeyShare {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("KeyShare")
			.field("participant_id", &self.participant_id)
			.field("s1_share", &"[REDACTED]")
			.field("s2_share", &"[REDACTED]")
			.finish()
	}
}
