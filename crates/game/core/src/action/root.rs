//! SHA-256 commitments over committed actions and game states.
//!
//! The journal uses these to check that redo reproduces history exactly and
//! the runtime stores them alongside snapshots. Both hash the bincode
//! encoding, which is deterministic for a given value.

#[cfg(feature = "serde")]
use super::GameAction;
#[cfg(feature = "serde")]
use crate::state::GameState;

/// Hashes `actions` in commit order. Order matters.
#[cfg(feature = "serde")]
pub fn compute_actions_root(actions: &[GameAction]) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for action in actions {
        if let Ok(bytes) = bincode::serialize(action) {
            hasher.update(&bytes);
        }
    }
    hasher.finalize().into()
}

/// Hashes a full game state, nonce included.
#[cfg(feature = "serde")]
pub fn compute_state_root(state: &GameState) -> [u8; 32] {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    if let Ok(bytes) = bincode::serialize(state) {
        hasher.update(&bytes);
    }
    hasher.finalize().into()
}
