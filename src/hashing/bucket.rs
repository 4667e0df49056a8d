//! Stable token-to-bucket scoring.
//!
//! # Responsibilities
//! - Turn an identity token into an integer score in [0,100)
//! - Guarantee the mapping is identical on every call, on every host
//!
//! # Design Decisions
//! - FNV-1a for the byte walk (cheap, stable across platforms)
//! - SplitMix64 finalizer to spread FNV's weak low bits before the
//!   modulo reduction
//! - No randomly seeded hasher anywhere in this path; a per-process
//!   seed would silently reshuffle every user on restart

/// Number of buckets scores are reduced into. Weights for one route must
/// sum to exactly this value.
pub const SCORE_SPAN: u32 = 100;

/// Deterministic score in `[0, SCORE_SPAN)` for an identity token.
///
/// Pure and seedless: the same token yields the same score in every
/// process. Callers with no token at hand keep the `Option` at their own
/// level; this function only ever sees a present token.
#[must_use]
pub fn bucket_score(token: &str) -> u32 {
    (splitmix64(fnv1a64(token.as_bytes())) % u64::from(SCORE_SPAN)) as u32
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut h: u64 = 14695981039346656037;
    for b in bytes {
        h ^= u64::from(*b);
        h = h.wrapping_mul(1099511628211);
    }
    h
}

#[inline]
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_are_pinned() {
        // Fixed expected values: these must never change, or every user
        // would be reassigned on the next deploy.
        assert_eq!(bucket_score("alice"), 41);
        assert_eq!(bucket_score("bob"), 56);
        assert_eq!(bucket_score("carol"), 13);
        assert_eq!(bucket_score("session-abc123"), 55);
    }

    #[test]
    fn test_score_is_deterministic() {
        for token in ["alice", "", "user-12345", "日本語トークン"] {
            assert_eq!(bucket_score(token), bucket_score(token));
        }
    }

    #[test]
    fn test_score_in_range() {
        for i in 0..1000 {
            let token = format!("user-{}", i);
            assert!(bucket_score(&token) < SCORE_SPAN);
        }
    }

    #[test]
    fn test_distribution_is_roughly_uniform() {
        let mut buckets = [0u32; SCORE_SPAN as usize];
        let samples = 10_000;
        for i in 0..samples {
            let token = format!("token-{}", i);
            buckets[bucket_score(&token) as usize] += 1;
        }

        // Expected ~100 per bucket; allow generous variance but catch
        // clustering or dead buckets.
        for (score, count) in buckets.iter().enumerate() {
            assert!(
                *count > 40 && *count < 200,
                "bucket {} holds {} of {} samples",
                score,
                count,
                samples
            );
        }
    }
}
