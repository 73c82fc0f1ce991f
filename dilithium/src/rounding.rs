//! Coefficient decomposition and hints.
//!
//! Power2Round splits t into (t1, t0) at 2^d; Decompose splits at 2*gamma2
//! into high and low bits with the q - 1 corner case; hints let a verifier
//! recover the high bits of a value it only knows up to a small offset. One
//! generic code path serves both gamma2 values (m = 44 and m = 16 buckets).

use crate::{
	field::FieldElement,
	params::{D, Q},
	polyvec::PolynomialVector,
};

/// Split r into (r1, r0) with r = r1 * 2^d + r0 and r0 in (-2^(d-1), 2^(d-1)].
pub fn power2round(r: FieldElement) -> (i32, i32) {
	let v = r.value() as i32;
	let r1 = (v + (1 << (D - 1)) - 1) >> D;
	let r0 = v - (r1 << D);
	(r1, r0)
}

/// Split r into (r1, r0) with r = r1 * 2 * gamma2 + r0 mod q and r0
/// centered in (-gamma2, gamma2]. The top bucket folds to r1 = 0.
pub fn decompose(r: FieldElement, gamma2: u32) -> (i32, i32) {
	let alpha = (2 * gamma2) as i32;
	let v = r.value() as i32;

	let mut r0 = v % alpha;
	if r0 > alpha / 2 {
		r0 -= alpha;
	}

	if v - r0 == Q as i32 - 1 {
		(0, r0 - 1)
	} else {
		((v - r0) / alpha, r0)
	}
}

/// High bits of r at modulus 2 * gamma2.
pub fn high_bits(r: FieldElement, gamma2: u32) -> i32 {
	decompose(r, gamma2).0
}

/// Low bits of r at modulus 2 * gamma2, centered.
pub fn low_bits(r: FieldElement, gamma2: u32) -> i32 {
	decompose(r, gamma2).1
}

/// Hint bit: does adding z to r change the high bits of r?
pub fn make_hint(z: FieldElement, r: FieldElement, gamma2: u32) -> bool {
	high_bits(r, gamma2) != high_bits(r + z, gamma2)
}

/// Recover adjusted high bits of r from the hint bit.
pub fn use_hint(hint: bool, r: FieldElement, gamma2: u32) -> i32 {
	let m = ((Q - 1) / (2 * gamma2)) as i32;
	let (r1, r0) = decompose(r, gamma2);
	if !hint {
		r1
	} else if r0 > 0 {
		(r1 + 1) % m
	} else {
		(r1 - 1 + m) % m
	}
}

/// Componentwise Power2Round of a vector.
///
/// Returns (t1, t0) as vectors over Z_q; t0 coefficients are the centered
/// low parts lifted into canonical form.
pub fn power2round_vector(v: &PolynomialVector) -> (PolynomialVector, PolynomialVector) {
	let mut t1 = PolynomialVector::zero(v.len());
	let mut t0 = PolynomialVector::zero(v.len());
	for i in 0..v.len() {
		for j in 0..crate::params::N {
			let (high, low) = power2round(v.get(i).get(j));
			t1.get_mut(i).set(j, FieldElement(high as u32));
			t0.get_mut(i).set(j, FieldElement::from_i64(low as i64));
		}
	}
	(t1, t0)
}

/// Maximum |LowBits| over all coefficients of a vector.
pub fn low_bits_norm(v: &PolynomialVector, gamma2: u32) -> u32 {
	let mut max = 0u32;
	for i in 0..v.len() {
		for j in 0..crate::params::N {
			let low = low_bits(v.get(i).get(j), gamma2).unsigned_abs();
			if low > max {
				max = low;
			}
		}
	}
	max
}

/// Hint vector flagging every coefficient where the high bits of `r`
/// disagree with the high bits of `target`, together with its weight.
///
/// `r` is the value the verifier can compute (A*z - c*t1*2^d) and `target`
/// the commitment whose high bits must be recovered.
pub fn make_hint_vector(
	r: &PolynomialVector,
	target: &PolynomialVector,
	gamma2: u32,
) -> (PolynomialVector, usize) {
	let mut hints = PolynomialVector::zero(r.len());
	let mut weight = 0;
	for i in 0..r.len() {
		for j in 0..crate::params::N {
			if high_bits(r.get(i).get(j), gamma2) != high_bits(target.get(i).get(j), gamma2) {
				hints.get_mut(i).set(j, FieldElement::ONE);
				weight += 1;
			}
		}
	}
	(hints, weight)
}

/// Check that applying the hint to `r` recovers the high bits of `target`
/// in every coefficient.
pub fn hint_recovers_high_bits(
	hints: &PolynomialVector,
	r: &PolynomialVector,
	target: &PolynomialVector,
	gamma2: u32,
) -> bool {
	for i in 0..r.len() {
		for j in 0..crate::params::N {
			let hint = hints.get(i).get(j) == FieldElement::ONE;
			if use_hint(hint, r.get(i).get(j), gamma2) != high_bits(target.get(i).get(j), gamma2) {
				return false;
			}
		}
	}
	true
}

/// Number of set hint bits.
pub fn hint_weight(hints: &PolynomialVector) -> usize {
	let mut weight = 0;
	for i in 0..hints.len() {
		weight += hints.get(i).hamming_weight();
	}
	weight
}

/// True if every hint coefficient is 0 or 1.
pub fn hint_is_binary(hints: &PolynomialVector) -> bool {
	for i in 0..hints.len() {
		for j in 0..crate::params::N {
			if hints.get(i).get(j).value() > 1 {
				return false;
			}
		}
	}
	true
}

/// Recover the high-bit vector of the commitment from a hint vector.
pub fn use_hint_vector(
	hints: &PolynomialVector,
	r: &PolynomialVector,
	gamma2: u32,
) -> PolynomialVector {
	let mut out = PolynomialVector::zero(r.len());
	for i in 0..r.len() {
		for j in 0..crate::params::N {
			let hint = hints.get(i).get(j) == FieldElement::ONE;
			let high = use_hint(hint, r.get(i).get(j), gamma2);
			out.get_mut(i).set(j, FieldElement(high as u32));
		}
	}
	out
}
