//! Configuration of an FGLM run.

/// Options for [`crate::fglm_compute`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FglmConfig {
    /// Seed of the random generator drawing the probe vector and the
    /// verification shifts.
    pub seed: u64,
    /// Whether non-radical outputs are checked with a second random
    /// functional.
    pub verify_radical: bool,
}

impl Default for FglmConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            verify_radical: true,
        }
    }
}

impl FglmConfig {
    /// Returns a copy with another seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns a copy with the radical check switched on or off.
    #[must_use]
    pub fn with_verification(mut self, verify_radical: bool) -> Self {
        self.verify_radical = verify_radical;
        self
    }
}
