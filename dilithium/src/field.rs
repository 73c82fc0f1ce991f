//! Arithmetic in the field Z_q with q = 8380417.
//!
//! Every element is kept as its canonical representative in [0, q). The
//! centered representative in (-q/2, q/2] exists only transiently for norm
//! computation.

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use zeroize::Zeroize;

use crate::params::Q;

/// Element of Z_q where q = 8380417.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldElement(pub u32);

impl Zeroize for FieldElement {
	fn zeroize(&mut self) {
		self.0.zeroize();
	}
}

impl FieldElement {
	/// Zero element.
	pub const ZERO: Self = Self(0);

	/// One element.
	pub const ONE: Self = Self(1);

	/// Create a new field element, reducing modulo q if necessary.
	pub fn new(val: u32) -> Self {
		Self(val % Q)
	}

	/// Create a field element from a signed integer by Euclidean reduction.
	pub fn from_i64(val: i64) -> Self {
		Self(val.rem_euclid(Q as i64) as u32)
	}

	/// Canonical value in [0, q).
	pub fn value(&self) -> u32 {
		self.0
	}

	/// Centered representative in (-q/2, q/2].
	pub fn centered(&self) -> i32 {
		if self.0 > Q / 2 {
			self.0 as i32 - Q as i32
		} else {
			self.0 as i32
		}
	}

	/// Raise to a power by square-and-multiply.
	pub fn pow(self, mut exp: u32) -> Self {
		let mut base = self;
		let mut acc = Self::ONE;
		while exp > 0 {
			if exp & 1 == 1 {
				acc *= base;
			}
			base *= base;
			exp >>= 1;
		}
		acc
	}

	/// Multiplicative inverse by Fermat, a^(q-2) mod q.
	///
	/// The inverse of zero is zero; callers are expected to never invert
	/// zero (Lagrange denominators are products of nonzero differences).
	pub fn inverse(self) -> Self {
		self.pow(Q - 2)
	}
}

impl Add for FieldElement {
	type Output = Self;

	fn add(self, other: Self) -> Self {
		let sum = (self.0 + other.0) % Q;
		Self(sum)
	}
}

impl AddAssign for FieldElement {
	fn add_assign(&mut self, other: Self) {
		*self = *self + other;
	}
}

impl Sub for FieldElement {
	type Output = Self;

	fn sub(self, other: Self) -> Self {
		let diff = if self.0 >= other.0 { self.0 - other.0 } else { Q - (other.0 - self.0) };
		Self(diff)
	}
}

impl SubAssign for FieldElement {
	fn sub_assign(&mut self, other: Self) {
		*self = *self - other;
	}
}

impl Mul for FieldElement {
	type Output = Self;

	fn mul(self, other: Self) -> Self {
		let product = ((self.0 as u64) * (other.0 as u64)) % (Q as u64);
		Self(product as u32)
	}
}

impl MulAssign for FieldElement {
	fn mul_assign(&mut self, other: Self) {
		*self = *self * other;
	}
}

impl Neg for FieldElement {
	type Output = Self;

	fn neg(self) -> Self {
		if self.0 == 0 {
			Self::ZERO
		} else {
			Self(Q - self.0)
		}
	}
}
