//! Trusted-dealer key generation.
//!
//! A dealer runs standard Dilithium key generation locally, splits both
//! secret vectors with the adapted Shamir scheme and hands every participant
//! their key share together with the shared public key. The dealer must be
//! trusted to distribute shares over secure channels and to retain nothing:
//! all transient secret material is wiped before this module returns. The
//! downstream types do not depend on the dealer, so a dealerless DKG can
//! replace this step without touching the signing path.

use sha3::digest::XofReader;
use zeroize::Zeroize;

use quorum_crystals_dilithium::{params::SEED_SIZE, sampling, Dilithium, SecurityLevel};

use crate::{
	config::ThresholdConfig,
	error::ThresholdResult,
	keys::KeyShare,
	shamir::AdaptedShamirSSS,
};

/// Generate one [`KeyShare`] per participant from a single dealer seed.
///
/// The seed (or a fresh one from the operating system RNG) expands through
/// SHAKE-256 into independent seeds for key generation and for the two
/// secret splits, so a fixed seed reproduces every share byte for byte.
pub(crate) fn dealer_keygen(
	config: ThresholdConfig,
	level: SecurityLevel,
	seed: Option<&[u8; SEED_SIZE]>,
) -> ThresholdResult<Vec<KeyShare>> {
	let mut seed = seed.copied().unwrap_or_else(sampling::random_seed);

	let mut reader = sampling::xof(&[b"dealer", &seed]);
	let mut keygen_seed = [0u8; SEED_SIZE];
	reader.read(&mut keygen_seed);
	let mut s1_seed = [0u8; SEED_SIZE];
	reader.read(&mut s1_seed);
	let mut s2_seed = [0u8; SEED_SIZE];
	reader.read(&mut s2_seed);

	let keypair = Dilithium::new(level).keygen(Some(&keygen_seed));
	let public_key = keypair.public;
	let mut secret = keypair.secret;

	let sss = AdaptedShamirSSS::new(config.threshold(), config.participants())?;
	let s1_shares = sss.split(secret.s1(), Some(&s1_seed));
	let s2_shares = sss.split(secret.s2(), Some(&s2_seed));

	// The full secret and everything that can re-derive it stop existing
	// here; only the shares leave this function.
	secret.zeroize();
	seed.zeroize();
	keygen_seed.zeroize();
	s1_seed.zeroize();
	s2_seed.zeroize();

	s1_shares
		.into_iter()
		.zip(s2_shares)
		.map(|(s1_share, s2_share)| {
			let id = s1_share.participant_id();
			KeyShare::new(id, s1_share, s2_share, public_key.clone())
		})
		.collect()
}
