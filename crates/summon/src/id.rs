//! Modal identifier generation.
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::Str;

/// Counter making generated ids unique within this process.
static MODAL_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh modal id.
///
/// Ids look like `modal-3-k2x9q0ab`: a process-local sequence number followed
/// by eight random base-36 characters, so ids from separate page loads or
/// separate registries do not collide either.
pub fn generate() -> Str {
    let n = MODAL_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut rng = rand::thread_rng();
    let suffix: String = (0..8)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("modal-{n}-{suffix}").into()
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let ids = (0..1000).map(|_| generate()).collect::<HashSet<_>>();
        assert_eq!(1000, ids.len());
        assert!(ids.iter().all(|id| id.starts_with("modal-") && !id.is_empty()));
    }
}
