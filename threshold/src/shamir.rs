//! Adapted Shamir secret sharing over polynomial vectors.
//!
//! The scheme shares a [`PolynomialVector`] coefficient-wise: for every
//! polynomial in the vector and every one of its 256 coefficients, a fresh
//! degree-(t-1) sharing polynomial over Z_q carries that coefficient as its
//! constant term. Participant u receives the evaluations at x = u, packaged
//! back into a vector of the same shape as the secret. Reconstruction is
//! Lagrange interpolation at zero, and because interpolation is linear, any
//! affine combination of share vectors is a share of the same combination of
//! secrets. The signing protocol leans on exactly that homomorphism to
//! rebuild z = sum(lambda_u * z_u) without ever rebuilding s1.

use zeroize::{Zeroize, ZeroizeOnDrop};

use quorum_crystals_dilithium::{
	field::FieldElement,
	params::{N, SEED_SIZE},
	poly::Polynomial,
	polyvec::PolynomialVector,
	sampling,
};

use crate::error::{
	validate_threshold_params, ThresholdError, ThresholdResult, MAX_PARTICIPANTS,
};

/// Identifier of a participant, nonzero and at most 255.
///
/// Ids double as the Shamir evaluation points, so zero is forbidden (it
/// would evaluate the sharing polynomial at the secret).
pub type ParticipantId = u16;

/// One participant's share of a secret polynomial vector.
#[derive(Clone)]
pub struct ShamirShare {
	participant_id: ParticipantId,
	share_vector: PolynomialVector,
}

impl ShamirShare {
	/// Create a share from its parts.
	///
	/// # Errors
	///
	/// [`ThresholdError::InvalidShareSet`] if the id is zero or exceeds
	/// [`MAX_PARTICIPANTS`].
	pub fn new(participant_id: ParticipantId, share_vector: PolynomialVector) -> ThresholdResult<Self> {
		if participant_id == 0 || participant_id > MAX_PARTICIPANTS {
			return Err(ThresholdError::InvalidShareSet);
		}
		Ok(Self { participant_id, share_vector })
	}

	/// The participant this share belongs to.
	pub fn participant_id(&self) -> ParticipantId {
		self.participant_id
	}

	/// The share vector itself.
	pub fn share_vector(&self) -> &PolynomialVector {
		&self.share_vector
	}

	/// Number of polynomials in the share vector.
	pub fn vector_length(&self) -> usize {
		self.share_vector.len()
	}

	/// Serialise as a u16 BE participant id followed by the share vector.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = self.participant_id.to_be_bytes().to_vec();
		out.extend_from_slice(&self.share_vector.to_bytes());
		out
	}

	/// Parse a share.
	pub fn from_bytes(bytes: &[u8]) -> ThresholdResult<Self> {
		if bytes.len() < 2 {
			return Err(ThresholdError::InvalidEncoding);
		}
		let id = u16::from_be_bytes([bytes[0], bytes[1]]);
		let vector = PolynomialVector::from_bytes(&bytes[2..])?;
		ShamirShare::new(id, vector).map_err(|_| ThresholdError::InvalidEncoding)
	}
}

impl Zeroize for ShamirShare {
	fn zeroize(&mut self) {
		self.participant_id.zeroize();
		self.share_vector.zeroize();
	}
}

impl ZeroizeOnDrop for ShamirShare {}

impl core::fmt::Debug for ShamirShare {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ShamirShare")
			.field("participant_id", &self.participant_id)
			.field("vector_length", &self.vector_length())
			.finish()
	}
}

/// Lagrange coefficients at x = 0 for the given evaluation points.
///
/// lambda_u = prod_{v != u} (-x_v) * (x_u - x_v)^-1 over Z_q, with inverses
/// by Fermat since q is prime.
///
/// # Errors
///
/// [`ThresholdError::InvalidShareSet`] on duplicate or zero ids.
pub fn lagrange_coefficients(ids: &[ParticipantId]) -> ThresholdResult<Vec<FieldElement>> {
	for (i, &id) in ids.iter().enumerate() {
		if id == 0 || ids[..i].contains(&id) {
			return Err(ThresholdError::InvalidShareSet);
		}
	}

	let points: Vec<FieldElement> = ids.iter().map(|&id| FieldElement(id as u32)).collect();
	let mut lambdas = Vec::with_capacity(points.len());
	for (u, &x_u) in points.iter().enumerate() {
		let mut numerator = FieldElement::ONE;
		let mut denominator = FieldElement::ONE;
		for (v, &x_v) in points.iter().enumerate() {
			if u != v {
				numerator *= -x_v;
				denominator *= x_u - x_v;
			}
		}
		lambdas.push(numerator * denominator.inverse());
	}
	Ok(lambdas)
}

/// Shamir secret sharing adapted to polynomial vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptedShamirSSS {
	threshold: u16,
	participants: u16,
}

impl AdaptedShamirSSS {
	/// Create a sharing scheme for the given (t, n).
	///
	/// # Errors
	///
	/// [`ThresholdError::InvalidConfig`] unless 2 <= t <= n <= 255.
	pub fn new(threshold: u16, participants: u16) -> ThresholdResult<Self> {
		validate_threshold_params(threshold, participants)?;
		Ok(Self { threshold, participants })
	}

	/// Minimum number of shares needed for reconstruction.
	pub fn threshold(&self) -> u16 {
		self.threshold
	}

	/// Total number of participants.
	pub fn participants(&self) -> u16 {
		self.participants
	}

	/// Split a secret vector into one share per participant.
	///
	/// Every coefficient of every polynomial is shared independently; the
	/// t - 1 random coefficients of each sharing polynomial are drawn from
	/// SHAKE256 over the seed, so a fixed seed reproduces the split. The
	/// sharing polynomials are wiped as soon as they are evaluated.
	pub fn split(
		&self,
		secret: &PolynomialVector,
		seed: Option<&[u8; SEED_SIZE]>,
	) -> Vec<ShamirShare> {
		let seed = seed.copied().unwrap_or_else(sampling::random_seed);
		let mut reader = sampling::xof(&[b"shamir-split", &seed]);

		let length = secret.len();
		let mut share_vectors = vec![PolynomialVector::zero(length); self.participants as usize];
		let mut sharing_poly = vec![FieldElement::ZERO; self.threshold as usize];

		for poly_idx in 0..length {
			for coeff_idx in 0..N {
				sharing_poly[0] = secret.get(poly_idx).get(coeff_idx);
				for coeff in sharing_poly.iter_mut().skip(1) {
					*coeff = sampling::sample_uniform_coeff(&mut reader);
				}

				for (slot, vector) in share_vectors.iter_mut().enumerate() {
					let x = FieldElement(slot as u32 + 1);
					vector.get_mut(poly_idx).set(coeff_idx, eval_horner(&sharing_poly, x));
				}
			}
		}
		sharing_poly.zeroize();

		share_vectors
			.into_iter()
			.enumerate()
			.map(|(slot, share_vector)| ShamirShare {
				participant_id: slot as u16 + 1,
				share_vector,
			})
			.collect()
	}

	/// Reconstruct the secret from at least t shares.
	///
	/// Only the first t shares are consumed; their ids select the Lagrange
	/// coefficients.
	///
	/// # Errors
	///
	/// [`ThresholdError::InsufficientShares`] below t shares,
	/// [`ThresholdError::InvalidShareSet`] on duplicate or zero ids,
	/// [`ThresholdError::ShareLengthMismatch`] on mixed vector lengths.
	pub fn reconstruct(&self, shares: &[ShamirShare]) -> ThresholdResult<PolynomialVector> {
		let active = self.active_shares(shares)?;
		let lambdas = self.lambdas_for(active)?;

		let mut secret = PolynomialVector::zero(active[0].vector_length());
		for (share, lambda) in active.iter().zip(&lambdas) {
			secret = secret.add(&share.share_vector.scale(*lambda));
		}
		Ok(secret)
	}

	/// Reconstruct only the polynomials at the given indices, in the order
	/// given.
	///
	/// Callers that need a slice of the secret never touch the rest of it.
	///
	/// # Errors
	///
	/// As [`Self::reconstruct`], plus [`ThresholdError::InvalidConfig`] for
	/// an index outside the shared vector.
	pub fn partial_reconstruct(
		&self,
		shares: &[ShamirShare],
		poly_indices: &[usize],
	) -> ThresholdResult<PolynomialVector> {
		let active = self.active_shares(shares)?;
		let lambdas = self.lambdas_for(active)?;

		let length = active[0].vector_length();
		let mut polys = Vec::with_capacity(poly_indices.len());
		for &poly_idx in poly_indices {
			if poly_idx >= length {
				return Err(ThresholdError::InvalidConfig);
			}
			let mut acc = Polynomial::zero();
			for (share, lambda) in active.iter().zip(&lambdas) {
				acc = acc.add(&share.share_vector.get(poly_idx).scale(*lambda));
			}
			polys.push(acc);
		}
		Ok(PolynomialVector::from_polys(polys))
	}

	/// Structural share validation.
	///
	/// Checks id uniqueness, the id range and consistent vector lengths.
	/// This proves nothing about algebraic consistency; a single share is
	/// information-theoretically indistinguishable from random.
	pub fn verify_shares(&self, shares: &[ShamirShare]) -> bool {
		if shares.len() < 2 {
			return false;
		}

		let length = shares[0].vector_length();
		if !shares.iter().all(|s| s.vector_length() == length) {
			return false;
		}

		for (i, share) in shares.iter().enumerate() {
			let id = share.participant_id;
			if id == 0 || id > self.participants {
				return false;
			}
			if shares[..i].iter().any(|other| other.participant_id == id) {
				return false;
			}
		}
		true
	}

	fn active_shares<'a>(&self, shares: &'a [ShamirShare]) -> ThresholdResult<&'a [ShamirShare]> {
		if shares.len() < self.threshold as usize {
			return Err(ThresholdError::InsufficientShares);
		}
		let active = &shares[..self.threshold as usize];

		let length = active[0].vector_length();
		if !active.iter().all(|s| s.vector_length() == length) {
			return Err(ThresholdError::ShareLengthMismatch);
		}
		Ok(active)
	}

	fn lambdas_for(&self, active: &[ShamirShare]) -> ThresholdResult<Vec<FieldElement>> {
		let ids: Vec<ParticipantId> = active.iter().map(|s| s.participant_id).collect();
		lagrange_coefficients(&ids)
	}
}

/// Evaluate a sharing polynomial at x by Horner's rule.
pub(crate) fn eval_horner(coeffs: &[FieldElement], x: FieldElement) -> FieldElement {
	let mut acc = FieldElement::ZERO;
	for &coeff in coeffs.iter().rev() {
		acc = acc * x + coeff;
	}
	acc
}

#[cfg(test)]
mod tests {
	use super::*;
	use quorum_crystals_dilithium::params::Q;
	use rand::{rngs::StdRng, SeedableRng};

	fn scheme(t: u16, n: u16) -> AdaptedShamirSSS {
		AdaptedShamirSSS::new(t, n).unwrap()
	}

	fn random_secret(seed: u64, length: usize) -> PolynomialVector {
		let mut rng = StdRng::seed_from_u64(seed);
		PolynomialVector::random(&mut rng, length)
	}

	#[test]
	fn test_split_reconstruct_identity() {
		for (t, n) in [(2u16, 2u16), (2, 3), (3, 5), (5, 7)] {
			let sss = scheme(t, n);
			let secret = random_secret(t as u64 * 100 + n as u64, 4);
			let shares = sss.split(&secret, Some(&[1u8; 32]));
			assert_eq!(shares.len(), n as usize);

			let recovered = sss.reconstruct(&shares).unwrap();
			assert_eq!(recovered, secret, "({}, {}) reconstruction failed", t, n);
		}
	}

	#[test]
	fn test_any_t_subset_reconstructs() {
		let sss = scheme(3, 5);
		let secret = random_secret(50, 3);
		let shares = sss.split(&secret, Some(&[2u8; 32]));

		let subsets: [[usize; 3]; 4] = [[0, 1, 2], [2, 3, 4], [0, 2, 4], [4, 1, 0]];
		for subset in subsets {
			let picked: Vec<ShamirShare> = subset.iter().map(|&i| shares[i].clone()).collect();
			assert_eq!(sss.reconstruct(&picked).unwrap(), secret, "subset {:?} failed", subset);
		}
	}

	#[test]
	fn test_insufficient_shares() {
		let sss = scheme(3, 5);
		let secret = random_secret(51, 2);
		let shares = sss.split(&secret, Some(&[3u8; 32]));
		assert_eq!(
			sss.reconstruct(&shares[..2]).unwrap_err(),
			ThresholdError::InsufficientShares
		);
	}

	#[test]
	fn test_all_shares_required_when_t_equals_n() {
		let sss = scheme(4, 4);
		let secret = random_secret(52, 2);
		let shares = sss.split(&secret, Some(&[4u8; 32]));
		assert_eq!(sss.reconstruct(&shares).unwrap(), secret);
		assert_eq!(
			sss.reconstruct(&shares[..3]).unwrap_err(),
			ThresholdError::InsufficientShares
		);
	}

	#[test]
	fn test_duplicate_ids_rejected() {
		let sss = scheme(2, 3);
		let secret = random_secret(53, 2);
		let shares = sss.split(&secret, Some(&[5u8; 32]));
		let duplicated = vec![shares[0].clone(), shares[0].clone()];
		assert_eq!(
			sss.reconstruct(&duplicated).unwrap_err(),
			ThresholdError::InvalidShareSet
		);
	}

	#[test]
	fn test_mixed_lengths_rejected() {
		let sss = scheme(2, 3);
		let shares = vec![
			ShamirShare::new(1, PolynomialVector::zero(3)).unwrap(),
			ShamirShare::new(2, PolynomialVector::zero(4)).unwrap(),
		];
		assert_eq!(
			sss.reconstruct(&shares).unwrap_err(),
			ThresholdError::ShareLengthMismatch
		);
	}

	#[test]
	fn test_wrong_subset_does_not_reconstruct() {
		// t - 1 shares extended with a forged share yield a wrong secret.
		let sss = scheme(3, 5);
		let secret = random_secret(54, 2);
		let shares = sss.split(&secret, Some(&[6u8; 32]));

		let mut rng = StdRng::seed_from_u64(55);
		let forged = ShamirShare::new(5, PolynomialVector::random(&mut rng, 2)).unwrap();
		let picked = vec![shares[0].clone(), shares[1].clone(), forged];
		assert_ne!(sss.reconstruct(&picked).unwrap(), secret);
	}

	#[test]
	fn test_partial_reconstruct() {
		let sss = scheme(3, 5);
		let secret = random_secret(56, 5);
		let shares = sss.split(&secret, Some(&[7u8; 32]));

		let partial = sss.partial_reconstruct(&shares, &[4, 0]).unwrap();
		assert_eq!(partial.len(), 2);
		assert_eq!(partial.get(0), secret.get(4));
		assert_eq!(partial.get(1), secret.get(0));

		assert_eq!(
			sss.partial_reconstruct(&shares, &[5]).unwrap_err(),
			ThresholdError::InvalidConfig
		);
	}

	#[test]
	fn test_homomorphism() {
		// a*split(S) + b*split(T) reconstructs to a*S + b*T.
		let sss = scheme(3, 5);
		let s = random_secret(57, 3);
		let t = random_secret(58, 3);
		let s_shares = sss.split(&s, Some(&[8u8; 32]));
		let t_shares = sss.split(&t, Some(&[9u8; 32]));

		let a = FieldElement::new(123456);
		let b = FieldElement::new(7654321);

		let combined: Vec<ShamirShare> = s_shares
			.iter()
			.zip(&t_shares)
			.map(|(su, tu)| {
				let vector = su.share_vector().scale(a).add(&tu.share_vector().scale(b));
				ShamirShare::new(su.participant_id(), vector).unwrap()
			})
			.collect();

		let expected = s.scale(a).add(&t.scale(b));
		assert_eq!(sss.reconstruct(&combined[1..4]).unwrap(), expected);
	}

	#[test]
	fn test_lagrange_coefficients_interpolate_constant() {
		// A degree-0 polynomial shared to any points has lambda summing to 1.
		let lambdas = lagrange_coefficients(&[1, 5, 42, 255]).unwrap();
		let sum = lambdas.into_iter().fold(FieldElement::ZERO, |acc, l| acc + l);
		assert_eq!(sum, FieldElement::ONE);
	}

	#[test]
	fn test_lagrange_rejects_bad_ids() {
		assert_eq!(
			lagrange_coefficients(&[1, 2, 1]).unwrap_err(),
			ThresholdError::InvalidShareSet
		);
		assert_eq!(
			lagrange_coefficients(&[0, 2, 3]).unwrap_err(),
			ThresholdError::InvalidShareSet
		);
	}

	#[test]
	fn test_max_participant_boundary() {
		let sss = scheme(2, 255);
		let secret = random_secret(59, 1);
		let shares = sss.split(&secret, Some(&[10u8; 32]));
		assert_eq!(shares.last().unwrap().participant_id(), 255);

		let picked = vec![shares[253].clone(), shares[254].clone()];
		assert_eq!(sss.reconstruct(&picked).unwrap(), secret);
	}

	#[test]
	fn test_verify_shares() {
		let sss = scheme(3, 5);
		let secret = random_secret(60, 2);
		let shares = sss.split(&secret, Some(&[11u8; 32]));
		assert!(sss.verify_shares(&shares));

		// Duplicated id.
		let mut duplicated: Vec<ShamirShare> = shares.clone();
		duplicated[1] = shares[0].clone();
		assert!(!sss.verify_shares(&duplicated));

		// Id outside this scheme's range.
		let foreign = ShamirShare::new(200, PolynomialVector::zero(2)).unwrap();
		assert!(!sss.verify_shares(&[shares[0].clone(), foreign]));

		// A single share is never enough to judge.
		assert!(!sss.verify_shares(&shares[..1]));
	}

	#[test]
	fn test_single_share_looks_uniform() {
		// Shares of the zero vector still spread over all of Z_q.
		let sss = scheme(2, 3);
		let shares = sss.split(&PolynomialVector::zero(2), Some(&[12u8; 32]));

		let share = shares[0].share_vector();
		let mut below_half = 0usize;
		let mut total = 0usize;
		for i in 0..share.len() {
			for c in share.get(i).coeffs() {
				total += 1;
				if c.value() < Q / 2 {
					below_half += 1;
				}
			}
		}
		let ratio = below_half as f64 / total as f64;
		assert!(ratio > 0.4 && ratio < 0.6, "share badly skewed: {}", ratio);
	}

	#[test]
	fn test_share_encoding_roundtrip() {
		let sss = scheme(2, 3);
		let secret = random_secret(61, 2);
		let shares = sss.split(&secret, Some(&[13u8; 32]));

		let bytes = shares[1].to_bytes();
		let decoded = ShamirShare::from_bytes(&bytes).unwrap();
		assert_eq!(decoded.participant_id(), shares[1].participant_id());
		assert_eq!(decoded.share_vector(), shares[1].share_vector());
	}

	#[test]
	fn test_share_rejects_zero_id() {
		assert!(ShamirShare::new(0, PolynomialVector::zero(1)).is_err());
	}

	#[test]
	fn test_split_is_seed_deterministic() {
		let sss = scheme(2, 3);
		let secret = random_secret(62, 2);
		let a = sss.split(&secret, Some(&[14u8; 32]));
		let b = sss.split(&secret, Some(&[14u8; 32]));
		for (x, y) in a.iter().zip(&b) {
			assert_eq!(x.share_vector(), y.share_vector());
		}

		let c = sss.split(&secret, Some(&[15u8; 32]));
		assert_ne!(a[0].share_vector(), c[0].share_vector());
	}
}
