//! Elements of the ring R_q = Z_q[X]/(X^256 + 1).

use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
	field::FieldElement,
	ntt,
	params::{N, Q},
};

/// Polynomial with N coefficients in Z_q.
///
/// The coefficient array always holds exactly N canonical representatives;
/// every operation reduces back into [0, q).
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Polynomial([FieldElement; N]);

impl Default for Polynomial {
	fn default() -> Self {
		Self([FieldElement::ZERO; N])
	}
}

impl Polynomial {
	/// Zero polynomial.
	pub fn zero() -> Self {
		Self::default()
	}

	/// The constant polynomial 1.
	pub fn one() -> Self {
		let mut p = Self::zero();
		p.0[0] = FieldElement::ONE;
		p
	}

	/// Coefficient at index i.
	pub fn get(&self, i: usize) -> FieldElement {
		self.0[i]
	}

	/// Set coefficient at index i.
	pub fn set(&mut self, i: usize, val: FieldElement) {
		self.0[i] = val;
	}

	/// All coefficients in order.
	pub fn coeffs(&self) -> &[FieldElement; N] {
		&self.0
	}

	/// Uniformly random polynomial over Z_q.
	pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
		let mut p = Self::zero();
		for i in 0..N {
			// 23-bit rejection sampling keeps the draw uniform.
			loop {
				let v = rng.next_u32() & 0x7FFFFF;
				if v < Q {
					p.0[i] = FieldElement(v);
					break;
				}
			}
		}
		p
	}

	/// Random polynomial with coefficients in [-bound, bound], lifted mod q.
	pub fn random_bounded<R: RngCore + CryptoRng>(rng: &mut R, bound: u32) -> Self {
		let width = 2 * bound + 1;
		let mut p = Self::zero();
		for i in 0..N {
			let v = rng.next_u32() % width;
			p.0[i] = FieldElement::from_i64(v as i64 - bound as i64);
		}
		p
	}

	/// Componentwise sum.
	pub fn add(&self, other: &Self) -> Self {
		let mut out = Self::zero();
		for i in 0..N {
			out.0[i] = self.0[i] + other.0[i];
		}
		out
	}

	/// Componentwise difference.
	pub fn sub(&self, other: &Self) -> Self {
		let mut out = Self::zero();
		for i in 0..N {
			out.0[i] = self.0[i] - other.0[i];
		}
		out
	}

	/// Negation.
	pub fn neg(&self) -> Self {
		let mut out = Self::zero();
		for i in 0..N {
			out.0[i] = -self.0[i];
		}
		out
	}

	/// Multiply every coefficient by a field element.
	pub fn scale(&self, s: FieldElement) -> Self {
		let mut out = Self::zero();
		for i in 0..N {
			out.0[i] = self.0[i] * s;
		}
		out
	}

	/// Multiply every coefficient by an integer scalar.
	pub fn scalar_mul(&self, s: i64) -> Self {
		self.scale(FieldElement::from_i64(s))
	}

	/// Ring product modulo X^N + 1 via the NTT.
	pub fn mul(&self, other: &Self) -> Self {
		let mut a = self.raw();
		let mut b = other.raw();
		ntt::ntt(&mut a);
		ntt::ntt(&mut b);
		let mut c = [0u32; N];
		ntt::pointwise(&mut c, &a, &b);
		ntt::inv_ntt(&mut c);

		let mut out = Self::zero();
		for i in 0..N {
			out.0[i] = FieldElement(ntt::le2q_mod_q(c[i]));
		}
		out
	}

	/// Schoolbook negacyclic product, the reference semantics for `mul`.
	///
	/// c_k = sum_{i+j=k} a_i b_j - sum_{i+j=k+N} a_i b_j over Z_q.
	pub(crate) fn mul_schoolbook(&self, other: &Self) -> Self {
		let mut pos = [0u64; N];
		let mut neg = [0u64; N];
		for i in 0..N {
			let a = self.0[i].value() as u64;
			if a == 0 {
				continue;
			}
			for j in 0..N {
				let prod = a * other.0[j].value() as u64;
				let idx = i + j;
				if idx < N {
					pos[idx] += prod % Q as u64;
				} else {
					neg[idx - N] += prod % Q as u64;
				}
			}
		}

		let q = Q as u64;
		let mut out = Self::zero();
		for k in 0..N {
			let v = (pos[k] % q + q - neg[k] % q) % q;
			out.0[k] = FieldElement(v as u32);
		}
		out
	}

	/// Infinity norm over the centered representatives.
	pub fn norm_infinity(&self) -> u32 {
		self.0.iter().map(|c| c.centered().unsigned_abs()).max().unwrap_or(0)
	}

	/// Euclidean norm over the centered representatives.
	pub fn norm_l2(&self) -> f64 {
		let sum: f64 = self
			.0
			.iter()
			.map(|c| {
				let v = c.centered() as f64;
				v * v
			})
			.sum();
		sum.sqrt()
	}

	/// True if every coefficient is zero.
	pub fn is_zero(&self) -> bool {
		self.0.iter().all(|c| *c == FieldElement::ZERO)
	}

	/// Degree of the polynomial, or `None` for the zero polynomial.
	pub fn degree(&self) -> Option<usize> {
		self.0.iter().rposition(|c| *c != FieldElement::ZERO)
	}

	/// Number of nonzero coefficients.
	pub fn hamming_weight(&self) -> usize {
		self.0.iter().filter(|c| **c != FieldElement::ZERO).count()
	}

	fn raw(&self) -> [u32; N] {
		core::array::from_fn(|i| self.0[i].value())
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for Polynomial {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let coeffs: Vec<u32> = self.0.iter().map(|c| c.value()).collect();
		coeffs.serialize(serializer)
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Polynomial {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		let coeffs: Vec<u32> = Vec::deserialize(deserializer)?;
		if coeffs.len() != N {
			return Err(serde::de::Error::custom(format!(
				"expected {} coefficients, got {}",
				N,
				coeffs.len()
			)));
		}
		let mut p = Polynomial::zero();
		for (i, &c) in coeffs.iter().enumerate() {
			if c >= Q {
				return Err(serde::de::Error::custom("coefficient out of range"));
			}
			p.set(i, FieldElement(c));
		}
		Ok(p)
	}
}
