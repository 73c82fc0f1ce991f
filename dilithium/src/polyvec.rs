//! Vectors of ring elements.
//!
//! The security level fixes the vector lengths (k and l) only at runtime, so
//! the length is carried by the value rather than the type. Mixing lengths
//! in arithmetic is a programming error and panics.

use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{field::FieldElement, poly::Polynomial};

/// Fixed-length vector of polynomials in R_q.
#[derive(Debug, Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolynomialVector {
	polys: Vec<Polynomial>,
}

impl PolynomialVector {
	/// Zero vector of the given length.
	pub fn zero(len: usize) -> Self {
		Self { polys: vec![Polynomial::zero(); len] }
	}

	/// Build a vector from its component polynomials.
	pub fn from_polys(polys: Vec<Polynomial>) -> Self {
		Self { polys }
	}

	/// Uniformly random vector of the given length.
	pub fn random<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Self {
		Self { polys: (0..len).map(|_| Polynomial::random(rng)).collect() }
	}

	/// Random vector with coefficients in [-bound, bound].
	pub fn random_bounded<R: RngCore + CryptoRng>(rng: &mut R, len: usize, bound: u32) -> Self {
		Self { polys: (0..len).map(|_| Polynomial::random_bounded(rng, bound)).collect() }
	}

	/// Number of polynomials in the vector.
	pub fn len(&self) -> usize {
		self.polys.len()
	}

	/// True if the vector has no components.
	pub fn is_empty(&self) -> bool {
		self.polys.is_empty()
	}

	/// Component at index i.
	pub fn get(&self, i: usize) -> &Polynomial {
		&self.polys[i]
	}

	/// Mutable component at index i.
	pub fn get_mut(&mut self, i: usize) -> &mut Polynomial {
		&mut self.polys[i]
	}

	/// Iterate over the components.
	pub fn iter(&self) -> impl Iterator<Item = &Polynomial> {
		self.polys.iter()
	}

	/// Componentwise sum. Panics on mismatched lengths.
	pub fn add(&self, other: &Self) -> Self {
		assert_eq!(self.len(), other.len(), "vector length mismatch in add");
		Self {
			polys: self.polys.iter().zip(&other.polys).map(|(a, b)| a.add(b)).collect(),
		}
	}

	/// Componentwise difference. Panics on mismatched lengths.
	pub fn sub(&self, other: &Self) -> Self {
		assert_eq!(self.len(), other.len(), "vector length mismatch in sub");
		Self {
			polys: self.polys.iter().zip(&other.polys).map(|(a, b)| a.sub(b)).collect(),
		}
	}

	/// Multiply every coefficient by a field element.
	pub fn scale(&self, s: FieldElement) -> Self {
		Self { polys: self.polys.iter().map(|p| p.scale(s)).collect() }
	}

	/// Multiply every coefficient by an integer scalar.
	pub fn scalar_mul(&self, s: i64) -> Self {
		self.scale(FieldElement::from_i64(s))
	}

	/// Multiply every component by a single polynomial.
	pub fn mul_poly(&self, p: &Polynomial) -> Self {
		Self { polys: self.polys.iter().map(|q| q.mul(p)).collect() }
	}

	/// Maximum infinity norm over the components.
	pub fn norm_infinity(&self) -> u32 {
		self.polys.iter().map(|p| p.norm_infinity()).max().unwrap_or(0)
	}
}
