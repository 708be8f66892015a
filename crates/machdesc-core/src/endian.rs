//! Host byte-order probe.

/// Pattern written in native order by [`query_is_little_endian`].
const PROBE_WORD: u32 = 0x0A0B_0C0D;

/// Low 16 bits of [`PROBE_WORD`].
const PROBE_LOW_HALF: u16 = 0x0C0D;

/// Returns `true` if the running host stores multi-byte integers little-endian.
///
/// Stores a 32-bit pattern in native order and reads the leading two bytes back
/// as a native-order 16-bit integer. On a little-endian host those bytes hold the
/// low half of the word; on a big-endian host they hold the high half.
pub fn query_is_little_endian() -> bool {
    leading_half_is_low(PROBE_WORD.to_ne_bytes(), u16::from_ne_bytes)
}

/// Decodes the leading two bytes of an encoded probe word with `decode` and
/// reports whether they hold the word's low 16 bits.
///
/// `buf` and `decode` must use the same byte order, as they do on a real host.
pub fn leading_half_is_low(buf: [u8; 4], decode: impl Fn([u8; 2]) -> u16) -> bool {
    decode([buf[0], buf[1]]) == PROBE_LOW_HALF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_matches_target_endian() {
        assert_eq!(query_is_little_endian(), cfg!(target_endian = "little"));
    }

    #[test]
    fn little_endian_host_detected() {
        assert!(leading_half_is_low(
            PROBE_WORD.to_le_bytes(),
            u16::from_le_bytes
        ));
    }

    #[test]
    fn big_endian_host_rejected() {
        assert!(!leading_half_is_low(
            PROBE_WORD.to_be_bytes(),
            u16::from_be_bytes
        ));
    }

    #[test]
    fn big_endian_leading_half_is_high_word() {
        let buf = PROBE_WORD.to_be_bytes();
        assert_eq!(u16::from_be_bytes([buf[0], buf[1]]), 0x0A0B);
    }
}
