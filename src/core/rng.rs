//! Deterministic random source for session codes and identities.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same codes and ids
//! - **Entropy fallback**: Production registries seed from the OS
//!
//! ```
//! use battlechip::core::SessionRng;
//!
//! let mut a = SessionRng::new(42);
//! let mut b = SessionRng::new(42);
//! assert_eq!(a.session_code(6), b.session_code(6));
//! ```

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::{Builder, Uuid};

use super::ids::{ObserverId, PlayerId, SessionId};

/// Characters a session code is drawn from.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Seedable RNG owned by a session registry.
///
/// Uses ChaCha8 for speed while keeping codes hard to guess.
#[derive(Clone, Debug)]
pub struct SessionRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl SessionRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw an upper-case alphanumeric session code of `len` characters.
    pub fn session_code(&mut self, len: usize) -> SessionId {
        let code: String = (0..len)
            .map(|_| {
                let idx = self.inner.gen_range(0..CODE_ALPHABET.len());
                CODE_ALPHABET[idx] as char
            })
            .collect();
        SessionId::new(code)
    }

    /// Mint a random (version 4) UUID from this stream.
    pub fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.inner.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes).into_uuid()
    }

    /// Mint a fresh player identity.
    pub fn player_id(&mut self) -> PlayerId {
        PlayerId(self.uuid())
    }

    /// Mint a fresh observer identity.
    pub fn observer_id(&mut self) -> ObserverId {
        ObserverId(self.uuid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = SessionRng::new(42);
        let mut rng2 = SessionRng::new(42);

        for _ in 0..20 {
            assert_eq!(rng1.session_code(6), rng2.session_code(6));
            assert_eq!(rng1.player_id(), rng2.player_id());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SessionRng::new(1);
        let mut rng2 = SessionRng::new(2);

        let seq1: Vec<_> = (0..5).map(|_| rng1.session_code(6)).collect();
        let seq2: Vec<_> = (0..5).map(|_| rng2.session_code(6)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_session_code_shape() {
        let mut rng = SessionRng::new(7);
        for _ in 0..50 {
            let code = rng.session_code(6);
            assert_eq!(code.as_str().len(), 6);
            assert!(code
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit()));
        }
    }

    #[test]
    fn test_uuid_is_v4() {
        let mut rng = SessionRng::new(3);
        let id = rng.uuid();
        assert_eq!(id.get_version_num(), 4);
    }
}
