//! Partial signing and signature combination.
//!
//! The session seed fixes a degree-(t-1) Shamir sharing of one low-norm
//! mask vector y: the constant terms stay in (-gamma1, gamma1], the higher
//! sharing coefficients are uniform. Participant u evaluates that sharing
//! at x = u to obtain its mask share y_u, commits to A*y_u and responds
//! with z_u = y_u + c*s1_share_u. Both y_u and s1_share_u are then shares
//! under the same (t, n), so Lagrange interpolation over any t responses
//! yields exactly z = y + c*s1, the response a single-party signer would
//! have produced with the same mask and challenge, and the standard norm
//! bounds apply to it unchanged. The full secret never exists anywhere.
//!
//! The mask sharing must be identical for every participant of a session,
//! so it derives from the session seed and the message digest alone; the
//! seed is therefore session-secret material, shared only among the
//! cooperating signers and discarded afterwards.

use zeroize::Zeroize;

use quorum_crystals_dilithium::{
	params::{ParamSet, SecurityLevel, D, SEED_SIZE},
	poly::Polynomial,
	polyvec::PolynomialVector,
	rounding, sampling, FieldElement, PublicKey, Signature,
};

use crate::{
	config::ThresholdConfig,
	error::{ThresholdError, ThresholdResult},
	keys::KeyShare,
	shamir::{eval_horner, lagrange_coefficients, ParticipantId},
};

/// One participant's contribution to a threshold signing session.
///
/// Ephemeral: it is only meaningful for the (message, session seed, public
/// key) it was produced for and is discarded after combination.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialSignature {
	participant_id: ParticipantId,
	z_partial: PolynomialVector,
	commitment: PolynomialVector,
	challenge: Polynomial,
}

impl PartialSignature {
	/// Assemble a partial signature, e.g. when receiving one from a peer.
	pub fn new(
		participant_id: ParticipantId,
		z_partial: PolynomialVector,
		commitment: PolynomialVector,
		challenge: Polynomial,
	) -> Self {
		Self { participant_id, z_partial, commitment, challenge }
	}

	/// The contributing participant.
	pub fn participant_id(&self) -> ParticipantId {
		self.participant_id
	}

	/// Share of the response vector (length l).
	pub fn z_partial(&self) -> &PolynomialVector {
		&self.z_partial
	}

	/// The participant's commitment A*y_u (length k).
	pub fn commitment(&self) -> &PolynomialVector {
		&self.commitment
	}

	/// The session challenge, identical for every honest contributor.
	pub fn challenge(&self) -> &Polynomial {
		&self.challenge
	}

	/// Serialise as id || z || commitment || challenge.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = self.participant_id.to_be_bytes().to_vec();
		out.extend_from_slice(&self.z_partial.to_bytes());
		out.extend_from_slice(&self.commitment.to_bytes());
		out.extend_from_slice(&self.challenge.to_bytes());
		out
	}

	/// Parse a partial signature.
	pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
		if bytes.len() < 2 {
			return Err(ThresholdError::InvalidEncoding);
		}
		let id = u16::from_be_bytes([bytes[0], bytes[1]]);
		let (z_partial, z_len) = quorum_crystals_dilithium::encoding::read_vector(&bytes[2..])?;
		let (commitment, c_len) =
			quorum_crystals_dilithium::encoding::read_vector(&bytes[2 + z_len..])?;
		let challenge = Polynomial::from_bytes(&bytes[2 + z_len + c_len..])?;
		Ok(Self { participant_id: id, z_partial, commitment, challenge })
	}
}

/// Produce one participant's partial signature.
pub(crate) fn partial_sign(
	config: ThresholdConfig,
	level: SecurityLevel,
	message: &[u8],
	key_share: &KeyShare,
	session_seed: &[u8; SEED_SIZE],
) -> ThresholdResult<PartialSignature> {
	let params = level.params();
	let public_key = key_share.public_key();
	if public_key.level() != level {
		return Err(ThresholdError::InvalidConfig);
	}
	let id = key_share.participant_id();
	if id == 0 || id > config.participants() {
		return Err(ThresholdError::InvalidConfig);
	}

	let tr = public_key.digest();
	let mu = sampling::message_digest(&tr, message);
	let challenge = sampling::derive_challenge(params.tau, &mu);

	let y_share = derive_mask_share(config, params, session_seed, &mu, id);

	let commitment = public_key.a().mul_vector(&y_share);
	let z_partial = y_share.add(&key_share.s1_share().share_vector().mul_poly(&challenge));

	Ok(PartialSignature { participant_id: id, z_partial, commitment, challenge })
}

/// This participant's evaluation of the session's mask sharing.
///
/// The stream is a function of (session seed, message digest) only, so all
/// participants expand one and the same sharing; the participant id enters
/// as the evaluation point. Repeated calls are reproducible, which lets a
/// crashed participant recover its own contribution.
fn derive_mask_share(
	config: ThresholdConfig,
	params: &ParamSet,
	session_seed: &[u8; SEED_SIZE],
	mu: &[u8],
	id: ParticipantId,
) -> PolynomialVector {
	let mut reader = sampling::xof(&[b"mask", session_seed, mu]);
	let x = FieldElement(id as u32);

	let mut y_share = PolynomialVector::zero(params.l);
	let mut sharing_poly = vec![FieldElement::ZERO; config.threshold() as usize];
	for poly_idx in 0..params.l {
		for coeff_idx in 0..quorum_crystals_dilithium::N {
			sharing_poly[0] = sampling::sample_mask_coeff(&mut reader, params.gamma1);
			for coeff in sharing_poly.iter_mut().skip(1) {
				*coeff = sampling::sample_uniform_coeff(&mut reader);
			}
			y_share.get_mut(poly_idx).set(coeff_idx, eval_horner(&sharing_poly, x));
		}
	}
	sharing_poly.zeroize();
	y_share
}

/// Combine at least t partial signatures into a Dilithium signature.
pub(crate) fn combine_signatures(
	config: ThresholdConfig,
	level: SecurityLevel,
	partials: &[PartialSignature],
	public_key: &PublicKey,
) -> ThresholdResult<Signature> {
	let params = level.params();
	if public_key.level() != level {
		return Err(ThresholdError::InvalidConfig);
	}
	if partials.len() < config.threshold() as usize {
		return Err(ThresholdError::InsufficientShares);
	}

	let challenge = &partials[0].challenge;
	if !partials.iter().all(|p| &p.challenge == challenge) {
		return Err(ThresholdError::InconsistentSession);
	}

	// The first t partials carry the session; extras are redundancy.
	let active = &partials[..config.threshold() as usize];
	for partial in active {
		if partial.z_partial.len() != params.l || partial.commitment.len() != params.k {
			return Err(ThresholdError::ShareLengthMismatch);
		}
	}

	let ids: Vec<ParticipantId> = active.iter().map(|p| p.participant_id).collect();
	let lambdas = lagrange_coefficients(&ids)?;

	let mut z = PolynomialVector::zero(params.l);
	let mut w = PolynomialVector::zero(params.k);
	for (partial, lambda) in active.iter().zip(&lambdas) {
		z = z.add(&partial.z_partial.scale(*lambda));
		w = w.add(&partial.commitment.scale(*lambda));
	}

	let signature = finish_signature(params, z, &w, challenge.clone(), public_key)?;
	Ok(signature)
}

/// Bound-check the combined response and attach the hint.
fn finish_signature(
	params: &ParamSet,
	z: PolynomialVector,
	w: &PolynomialVector,
	challenge: Polynomial,
	public_key: &PublicKey,
) -> ThresholdResult<Signature> {
	// What the verifier can recompute: A*z - c*t1*2^d = w - c*s2 + c*t0.
	let (t1, _t0) = rounding::power2round_vector(public_key.t());
	let r = public_key
		.a()
		.mul_vector(&z)
		.sub(&t1.mul_poly(&challenge).scalar_mul(1 << D));

	let (hints, weight) = rounding::make_hint_vector(&r, w, params.gamma2);
	if weight > params.omega {
		return Err(ThresholdError::SigningBoundViolation);
	}
	if !rounding::hint_recovers_high_bits(&hints, &r, w, params.gamma2) {
		return Err(ThresholdError::SigningBoundViolation);
	}

	if z.norm_infinity() >= params.gamma1 - params.beta {
		return Err(ThresholdError::SigningBoundViolation);
	}

	Ok(Signature::new(z, hints, challenge))
}

/// Check a partial signature against the contributor's key share.
///
/// Verifies that the challenge binds this message and public key and that
/// the commitment satisfies A * (z_u - c * s1_share_u) = w_u. Used by the
/// orchestrator to weed out faulty contributions before combining.
pub(crate) fn verify_partial_signature(
	level: SecurityLevel,
	message: &[u8],
	partial: &PartialSignature,
	key_share: &KeyShare,
) -> bool {
	let params = level.params();
	let public_key = key_share.public_key();

	if public_key.level() != level {
		return false;
	}
	if partial.participant_id != key_share.participant_id() {
		return false;
	}
	if partial.z_partial.len() != params.l || partial.commitment.len() != params.k {
		return false;
	}

	let tr = public_key.digest();
	let mu = sampling::message_digest(&tr, message);
	let expected_challenge = sampling::derive_challenge(params.tau, &mu);
	if partial.challenge != expected_challenge {
		return false;
	}

	let recovered_mask = partial
		.z_partial
		.sub(&key_share.s1_share().share_vector().mul_poly(&partial.challenge));
	public_key.a().mul_vector(&recovered_mask) == partial.commitment
}
