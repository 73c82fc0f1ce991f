//! Threshold configuration.

use crate::error::{validate_threshold_params, ThresholdResult};

/// Configuration for a (t, n) threshold scheme.
///
/// At least t of the n participants must cooperate to produce a signature;
/// fewer than t learn nothing about the key.
///
/// # Example
///
/// ```
/// use quorum_crystals_threshold::ThresholdConfig;
///
/// let config = ThresholdConfig::new(3, 5).expect("valid parameters");
/// assert_eq!(config.threshold(), 3);
/// assert_eq!(config.participants(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdConfig {
	t: u16,
	n: u16,
}

impl ThresholdConfig {
	/// Create a new threshold configuration.
	///
	/// # Errors
	///
	/// Returns [`crate::ThresholdError::InvalidConfig`] unless
	/// 2 <= t <= n <= 255.
	pub fn new(t: u16, n: u16) -> ThresholdResult<Self> {
		validate_threshold_params(t, n)?;
		Ok(Self { t, n })
	}

	/// Minimum number of participants required to sign.
	#[inline]
	pub fn threshold(&self) -> u16 {
		self.t
	}

	/// Total number of participants.
	#[inline]
	pub fn participants(&self) -> u16 {
		self.n
	}

	/// Participant ids 1..=n; all nonzero mod q.
	pub fn participant_ids(&self) -> impl Iterator<Item = u16> {
		1..=self.n
	}
}

#[cfg(feature = "serde")]
impl serde::Serialize for ThresholdConfig {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		use serde::ser::SerializeStruct;
		let mut state = serializer.serialize_struct("ThresholdConfig", 2)?;
		state.serialize_field("threshold", &self.t)?;
		state.serialize_field("participants", &self.n)?;
		state.end()
	}
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ThresholdConfig {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		#[derive(serde::Deserialize)]
		struct ConfigData {
			threshold: u16,
			participants: u16,
		}

		let data = ConfigData::deserialize(deserializer)?;
		ThresholdConfig::new(data.threshold, data.participants).map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_config_creation() {
		let config = ThresholdConfig::new(2, 3).unwrap();
		assert_eq!(config.threshold(), 2);
		assert_eq!(config.participants(), 3);
	}

	#[test]
	fn test_boundary_configs() {
		assert!(ThresholdConfig::new(2, 2).is_ok());
		assert!(ThresholdConfig::new(255, 255).is_ok());
		assert!(ThresholdConfig::new(1, 2).is_err());
		assert!(ThresholdConfig::new(4, 3).is_err());
		assert!(ThresholdConfig::new(2, 300).is_err());
	}

	#[test]
	fn test_participant_ids() {
		let config = ThresholdConfig::new(2, 4).unwrap();
		let ids: Vec<u16> = config.participant_ids().collect();
		assert_eq!(ids, vec![1, 2, 3, 4]);
	}
}
