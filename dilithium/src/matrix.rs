//! The public k x l matrix A and its expansion from a seed.

use sha3::{
	digest::{ExtendableOutput, Update},
	Shake256,
};

use crate::{polyvec::PolynomialVector, poly::Polynomial, sampling};

/// Row-major k x l matrix of polynomials.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matrix {
	rows: usize,
	cols: usize,
	polys: Vec<Polynomial>,
}

impl Matrix {
	/// Zero matrix of the given dimensions.
	pub fn zero(rows: usize, cols: usize) -> Self {
		Self { rows, cols, polys: vec![Polynomial::zero(); rows * cols] }
	}

	/// Build a matrix from row-major polynomials. Panics if the count does
	/// not match the dimensions.
	pub fn from_polys(rows: usize, cols: usize, polys: Vec<Polynomial>) -> Self {
		assert_eq!(polys.len(), rows * cols, "matrix dimension mismatch");
		Self { rows, cols, polys }
	}

	/// Expand the matrix from a 32-byte seed.
	///
	/// Entry (i, j) is sampled uniformly from SHAKE256(rho || [i, j]), so
	/// all parties derive the same matrix from the shared seed.
	pub fn expand_from_seed(rho: &[u8; 32], rows: usize, cols: usize) -> Self {
		let mut polys = Vec::with_capacity(rows * cols);
		for i in 0..rows {
			for j in 0..cols {
				let mut shake = Shake256::default();
				shake.update(rho);
				shake.update(&[i as u8, j as u8]);
				let mut reader = shake.finalize_xof();
				polys.push(sampling::sample_uniform_poly(&mut reader));
			}
		}
		Self { rows, cols, polys }
	}

	/// Number of rows (k).
	pub fn rows(&self) -> usize {
		self.rows
	}

	/// Number of columns (l).
	pub fn cols(&self) -> usize {
		self.cols
	}

	/// Entry at row i, column j.
	pub fn get(&self, i: usize, j: usize) -> &Polynomial {
		&self.polys[i * self.cols + j]
	}

	/// Set the entry at row i, column j.
	pub fn set(&mut self, i: usize, j: usize, p: Polynomial) {
		self.polys[i * self.cols + j] = p;
	}

	/// Row-major entries.
	pub fn polys(&self) -> &[Polynomial] {
		&self.polys
	}

	/// Matrix-vector product A * v; input length cols, output length rows.
	pub fn mul_vector(&self, v: &PolynomialVector) -> PolynomialVector {
		assert_eq!(v.len(), self.cols, "vector length mismatch in matrix multiply");
		let mut out = PolynomialVector::zero(self.rows);
		for i in 0..self.rows {
			let mut acc = Polynomial::zero();
			for j in 0..self.cols {
				acc = acc.add(&self.get(i, j).mul(v.get(j)));
			}
			*out.get_mut(i) = acc;
		}
		out
	}
}
