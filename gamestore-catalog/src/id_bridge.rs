//! Deterministic mapping between legacy integer ids and primary-store UUIDs.
//!
//! The 32-bit legacy id is stored big-endian in the low four bytes of an
//! otherwise zeroed UUID, so `1` becomes `00000000-0000-0000-0000-000000000001`.
//! There is no state and no allocation; the same integer always maps to the
//! same identifier.

use uuid::Uuid;

/// Re-encode a legacy integer id as a primary-store identifier.
pub fn to_primary(legacy_id: i32) -> Uuid {
    Uuid::from_u128(u128::from(legacy_id as u32))
}

/// Recover the legacy integer id from a bridged identifier.
///
/// Only meaningful for ids produced by [`to_primary`]. A natively generated
/// UUID yields its low 32 bits, which is not an error here.
pub fn to_legacy(id: Uuid) -> i32 {
    id.as_u128() as u32 as i32
}

/// True when the upper 96 bits are zero, i.e. the id looks bridged.
pub fn is_bridged(id: Uuid) -> bool {
    id.as_u128() >> 32 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_edge_values() {
        for n in [0, 1, -1, 42, i32::MIN, i32::MAX, 77_000, -123_456] {
            assert_eq!(to_legacy(to_primary(n)), n, "value {n}");
        }
    }

    #[test]
    fn round_trips_a_sweep() {
        let mut n: i64 = i32::MIN as i64;
        while n <= i32::MAX as i64 {
            let v = n as i32;
            assert_eq!(to_legacy(to_primary(v)), v);
            n += 65_521;
        }
    }

    #[test]
    fn low_bytes_hold_the_integer() {
        let id = to_primary(0x0102_0304);
        let bytes = id.as_bytes();
        assert_eq!(&bytes[..12], &[0u8; 12]);
        assert_eq!(&bytes[12..], &[1, 2, 3, 4]);
        assert_eq!(id.to_string(), "00000000-0000-0000-0000-000001020304");
    }

    #[test]
    fn stable_across_calls() {
        assert_eq!(to_primary(7), to_primary(7));
        assert_ne!(to_primary(7), to_primary(8));
    }

    #[test]
    fn native_ids_are_not_bridged() {
        let native = Uuid::new_v4();
        assert!(!is_bridged(native));
        assert!(is_bridged(to_primary(5)));
        // Unguarded: still produces some integer.
        let _ = to_legacy(native);
    }
}
