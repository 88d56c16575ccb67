//! In-band control command recognition.
//!
//! A chunk of the exact form `AESDCHAR_IOCSEEKTO:<u32>,<u32>\n` repositions
//! the connection's read cursor instead of being written to the history.
//! Recognition is strictly per-chunk: a control command split across reads,
//! or any deviation from the exact form, is treated as ordinary data.

/// Literal prefix of the seek control command.
pub const SEEK_PREFIX: &[u8] = b"AESDCHAR_IOCSEEKTO:";

/// Parses a received chunk as a seek control command.
///
/// Returns `(command_index, command_offset)` when the chunk is exactly
/// `AESDCHAR_IOCSEEKTO:<u32>,<u32>\n`, otherwise `None`. Leading zeros are
/// accepted; signs, spaces, out-of-range values, and trailing bytes after
/// the newline are not.
pub fn parse_seek(chunk: &[u8]) -> Option<(u32, u32)> {
    let args = chunk.strip_prefix(SEEK_PREFIX)?.strip_suffix(b"\n")?;
    let args = std::str::from_utf8(args).ok()?;
    let (cmd, offset) = args.split_once(',')?;
    Some((cmd.parse().ok()?, offset.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_exact_form() {
        assert_eq!(parse_seek(b"AESDCHAR_IOCSEEKTO:1,2\n"), Some((1, 2)));
        assert_eq!(parse_seek(b"AESDCHAR_IOCSEEKTO:0,0\n"), Some((0, 0)));
        assert_eq!(
            parse_seek(b"AESDCHAR_IOCSEEKTO:4294967295,7\n"),
            Some((u32::MAX, 7))
        );
    }

    #[test]
    fn test_rejects_missing_pieces() {
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:1,2").is_none()); // no newline
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:1\n").is_none()); // no comma
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:,2\n").is_none()); // empty field
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:\n").is_none());
        assert!(parse_seek(b"hello\n").is_none());
        assert!(parse_seek(b"").is_none());
    }

    #[test]
    fn test_rejects_malformed_integers() {
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:-1,2\n").is_none());
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:1, 2\n").is_none());
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:a,2\n").is_none());
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:4294967296,0\n").is_none()); // u32 overflow
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:1,2\nx").is_none());
        assert!(parse_seek(b"AESDCHAR_IOCSEEKTO:1,2\n\n").is_none());
        assert!(parse_seek(b"xAESDCHAR_IOCSEEKTO:1,2\n").is_none());
    }
}
