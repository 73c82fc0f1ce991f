//! SHAKE-256 based samplers.
//!
//! Every deterministic draw in the scheme flows through these helpers, so a
//! fixed seed reproduces keys, masks and challenges byte for byte.

use rand::{rngs::OsRng, RngCore};
use sha3::{
	digest::{ExtendableOutput, Update, XofReader},
	Shake256,
};

use crate::{
	field::FieldElement,
	poly::Polynomial,
	params::{CRH_SIZE, N, Q, SEED_SIZE},
};

/// Absorb the given byte strings in order and return the XOF reader.
pub fn xof(parts: &[&[u8]]) -> impl XofReader {
	let mut shake = Shake256::default();
	for part in parts {
		shake.update(part);
	}
	shake.finalize_xof()
}

/// SHAKE256 of the concatenated parts into `out`.
pub fn shake256(parts: &[&[u8]], out: &mut [u8]) {
	let mut reader = xof(parts);
	reader.read(out);
}

/// Fresh 32-byte seed from the operating system RNG.
pub fn random_seed() -> [u8; SEED_SIZE] {
	let mut seed = [0u8; SEED_SIZE];
	OsRng.fill_bytes(&mut seed);
	seed
}

/// One uniform element of Z_q by 23-bit rejection sampling.
pub fn sample_uniform_coeff<R: XofReader>(reader: &mut R) -> FieldElement {
	let mut buf = [0u8; 3];
	loop {
		reader.read(&mut buf);
		let v = u32::from_le_bytes([buf[0], buf[1], buf[2], 0]) & 0x7FFFFF;
		if v < Q {
			return FieldElement(v);
		}
	}
}

/// Uniform polynomial over Z_q.
pub fn sample_uniform_poly<R: XofReader>(reader: &mut R) -> Polynomial {
	let mut p = Polynomial::zero();
	for i in 0..N {
		p.set(i, sample_uniform_coeff(reader));
	}
	p
}

/// Polynomial with coefficients uniform in [-eta, eta], lifted mod q.
///
/// One byte is drawn per candidate; values that would bias the residue are
/// rejected.
pub fn sample_eta_poly<R: XofReader>(reader: &mut R, eta: u32) -> Polynomial {
	let width = 2 * eta + 1;
	let limit = (256 / width) * width;
	let mut p = Polynomial::zero();
	let mut buf = [0u8; 1];
	for i in 0..N {
		loop {
			reader.read(&mut buf);
			let b = buf[0] as u32;
			if b < limit {
				p.set(i, FieldElement::from_i64((b % width) as i64 - eta as i64));
				break;
			}
		}
	}
	p
}

/// One mask coefficient in (-gamma1, gamma1], lifted mod q.
///
/// gamma1 is a power of two at every security level, so masking 24 drawn
/// bits down to the 2*gamma1 range needs no rejection.
pub fn sample_mask_coeff<R: XofReader>(reader: &mut R, gamma1: u32) -> FieldElement {
	let mask = 2 * gamma1 - 1;
	let mut buf = [0u8; 3];
	reader.read(&mut buf);
	let v = u32::from_le_bytes([buf[0], buf[1], buf[2], 0]) & mask;
	FieldElement::from_i64(gamma1 as i64 - v as i64)
}

/// Mask polynomial with coefficients in (-gamma1, gamma1].
pub fn sample_mask_poly<R: XofReader>(reader: &mut R, gamma1: u32) -> Polynomial {
	let mut p = Polynomial::zero();
	for i in 0..N {
		p.set(i, sample_mask_coeff(reader, gamma1));
	}
	p
}

/// Challenge polynomial with tau coefficients in {-1, +1}, all others zero.
///
/// Fisher-Yates sampling driven by SHAKE256(seed): an 8-byte sign window
/// followed by one rejection-sampled swap index per nonzero position.
pub fn sample_challenge(tau: u32, seed: &[u8]) -> Polynomial {
	let tau = tau as usize;
	let mut reader = xof(&[seed]);

	let mut signs = [0u8; 8];
	reader.read(&mut signs);

	let mut c = Polynomial::zero();
	let mut buf = [0u8; 1];
	for i in (N - tau)..N {
		let j = loop {
			reader.read(&mut buf);
			if buf[0] as usize <= i {
				break buf[0] as usize;
			}
		};

		c.set(i, c.get(j));
		let bit_index = i + tau - N;
		let bit = (signs[bit_index / 8] >> (bit_index % 8)) & 1;
		let value = if bit == 0 { FieldElement::ONE } else { FieldElement(Q - 1) };
		c.set(j, value);
	}
	c
}

/// Message digest mu = SHAKE256(tr || msg).
pub fn message_digest(tr: &[u8], msg: &[u8]) -> [u8; CRH_SIZE] {
	let mut mu = [0u8; CRH_SIZE];
	shake256(&[tr, msg], &mut mu);
	mu
}

/// Challenge shared by the single-party signer and all partial signers of a
/// session: c = SampleInBall(SHAKE256(mu)).
///
/// mu already binds the public key digest and the message, so the verifier
/// can recompute the challenge without any session state.
pub fn derive_challenge(tau: u32, mu: &[u8; CRH_SIZE]) -> Polynomial {
	let mut seed = [0u8; SEED_SIZE];
	shake256(&[mu], &mut seed);
	sample_challenge(tau, &seed)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_uniform_poly_in_range() {
		let mut reader = xof(&[b"uniform test"]);
		let p = sample_uniform_poly(&mut reader);
		assert!(p.coeffs().iter().all(|c| c.value() < Q));
	}

	#[test]
	fn test_eta_poly_bounded() {
		for eta in [2u32, 4] {
			let mut reader = xof(&[b"eta test", &[eta as u8]]);
			let p = sample_eta_poly(&mut reader, eta);
			assert!(p.norm_infinity() <= eta, "eta {} exceeded", eta);
		}
	}

	#[test]
	fn test_eta_poly_hits_extremes() {
		let mut reader = xof(&[b"eta extremes"]);
		let p = sample_eta_poly(&mut reader, 2);
		let centered: Vec<i32> = p.coeffs().iter().map(|c| c.centered()).collect();
		assert!(centered.contains(&2));
		assert!(centered.contains(&-2));
	}

	#[test]
	fn test_mask_poly_in_open_closed_range() {
		let gamma1 = 1u32 << 17;
		let mut reader = xof(&[b"mask test"]);
		let p = sample_mask_poly(&mut reader, gamma1);
		for c in p.coeffs() {
			let v = c.centered();
			assert!(v > -(gamma1 as i32) && v <= gamma1 as i32);
		}
	}

	#[test]
	fn test_challenge_weight_and_signs() {
		for tau in [39u32, 49, 60] {
			let c = sample_challenge(tau, b"challenge test seed");
			assert_eq!(c.hamming_weight(), tau as usize);
			for coeff in c.coeffs() {
				let v = coeff.centered();
				assert!(v == 0 || v == 1 || v == -1);
			}
		}
	}

	#[test]
	fn test_challenge_is_deterministic() {
		let a = sample_challenge(49, b"same seed");
		let b = sample_challenge(49, b"same seed");
		assert_eq!(a, b);

		let c = sample_challenge(49, b"other seed");
		assert_ne!(a, c);
	}

	#[test]
	fn test_message_digest_separates_inputs() {
		let tr = [1u8; 64];
		let a = message_digest(&tr, b"message one");
		let b = message_digest(&tr, b"message two");
		assert_ne!(a, b);

		let other_tr = [2u8; 64];
		let c = message_digest(&other_tr, b"message one");
		assert_ne!(a, c);
	}
}
