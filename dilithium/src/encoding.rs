//! Wire formats.
//!
//! The serialised forms are unambiguous rather than bit-packed: coefficient
//! arrays are little-endian u32 words reduced mod q, vectors carry a u16
//! big-endian polynomial-count prefix, and identifiers travel as u16 big
//! endian. The FIPS 204 packed encodings are an integration concern behind
//! these functions.

use crate::{
	errors::DilithiumError,
	field::FieldElement,
	matrix::Matrix,
	params::{SecurityLevel, N, Q},
	poly::Polynomial,
	polyvec::PolynomialVector,
	sign::{PublicKey, Signature},
};

/// Serialised size of one polynomial in bytes.
pub const POLYNOMIAL_BYTES: usize = N * 4;

impl Polynomial {
	/// Serialise as 256 little-endian u32 words.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(POLYNOMIAL_BYTES);
		for c in self.coeffs() {
			out.extend_from_slice(&c.value().to_le_bytes());
		}
		out
	}

	/// Parse a polynomial, rejecting non-canonical coefficients.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, DilithiumError> {
		if bytes.len() != POLYNOMIAL_BYTES {
			return Err(DilithiumError::InvalidEncoding);
		}
		let mut p = Polynomial::zero();
		for i in 0..N {
			let word = u32::from_le_bytes(bytes[i * 4..i * 4 + 4].try_into().unwrap());
			if word >= Q {
				return Err(DilithiumError::InvalidEncoding);
			}
			p.set(i, FieldElement(word));
		}
		Ok(p)
	}
}

impl PolynomialVector {
	/// Serialise as a u16 BE count followed by the component polynomials.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(2 + self.len() * POLYNOMIAL_BYTES);
		out.extend_from_slice(&(self.len() as u16).to_be_bytes());
		for p in self.iter() {
			out.extend_from_slice(&p.to_bytes());
		}
		out
	}

	/// Parse a vector; the input must contain exactly the prefixed count.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, DilithiumError> {
		let (vector, consumed) = read_vector(bytes)?;
		if consumed != bytes.len() {
			return Err(DilithiumError::InvalidEncoding);
		}
		Ok(vector)
	}
}

/// Parse one count-prefixed vector from the front of `bytes`, returning it
/// with the number of bytes consumed. For decoders of composite types that
/// embed vectors.
pub fn read_vector(bytes: &[u8]) -> Result<(PolynomialVector, usize), DilithiumError> {
	if bytes.len() < 2 {
		return Err(DilithiumError::InvalidEncoding);
	}
	let count = u16::from_be_bytes([bytes[0], bytes[1]]) as usize;
	let total = 2 + count * POLYNOMIAL_BYTES;
	if bytes.len() < total {
		return Err(DilithiumError::InvalidEncoding);
	}
	let mut polys = Vec::with_capacity(count);
	for i in 0..count {
		let start = 2 + i * POLYNOMIAL_BYTES;
		polys.push(Polynomial::from_bytes(&bytes[start..start + POLYNOMIAL_BYTES])?);
	}
	Ok((PolynomialVector::from_polys(polys), total))
}

impl Signature {
	/// Serialise as z || h || c.
	pub fn to_bytes(&self) -> Vec<u8> {
		let mut out = self.z().to_bytes();
		out.extend_from_slice(&self.h().to_bytes());
		out.extend_from_slice(&self.c().to_bytes());
		out
	}

	/// Parse a signature.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, DilithiumError> {
		let (z, z_len) = read_vector(bytes)?;
		let (h, h_len) = read_vector(&bytes[z_len..])?;
		let rest = &bytes[z_len + h_len..];
		let c = Polynomial::from_bytes(rest)?;
		Ok(Signature::new(z, h, c))
	}
}

impl PublicKey {
	/// Serialise as level || k || l || A (row-major) || t.
	pub fn to_bytes(&self) -> Vec<u8> {
		let a = self.a();
		let mut out = Vec::with_capacity(3 + a.polys().len() * POLYNOMIAL_BYTES);
		out.push(self.level().as_int());
		out.push(a.rows() as u8);
		out.push(a.cols() as u8);
		for p in a.polys() {
			out.extend_from_slice(&p.to_bytes());
		}
		out.extend_from_slice(&self.t().to_bytes());
		out
	}

	/// Parse a public key, checking the dimensions against the level.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self, DilithiumError> {
		if bytes.len() < 3 {
			return Err(DilithiumError::InvalidEncoding);
		}
		let level = SecurityLevel::from_int(bytes[0])
			.map_err(|_| DilithiumError::InvalidEncoding)?;
		let p = level.params();
		if bytes[1] as usize != p.k || bytes[2] as usize != p.l {
			return Err(DilithiumError::InvalidEncoding);
		}

		let matrix_bytes = p.k * p.l * POLYNOMIAL_BYTES;
		if bytes.len() < 3 + matrix_bytes {
			return Err(DilithiumError::InvalidEncoding);
		}
		let mut polys = Vec::with_capacity(p.k * p.l);
		for i in 0..p.k * p.l {
			let start = 3 + i * POLYNOMIAL_BYTES;
			polys.push(Polynomial::from_bytes(&bytes[start..start + POLYNOMIAL_BYTES])?);
		}
		let a = Matrix::from_polys(p.k, p.l, polys);

		let t = PolynomialVector::from_bytes(&bytes[3 + matrix_bytes..])?;
		if t.len() != p.k {
			return Err(DilithiumError::InvalidEncoding);
		}

		Ok(PublicKey::new(a, t, level))
	}
}
