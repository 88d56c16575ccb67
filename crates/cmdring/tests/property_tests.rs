//! Property-based tests for the history engine and the device contract.
//!
//! Each block verifies one of the named behavioral properties: bounded
//! count, last-N retention under eviction, the find/linear-offset law,
//! write coalescing across arbitrary chunk partitions, and seek round-trips.

use cmdring::{CommandHistory, Device, HISTORY_CAPACITY};
use proptest::prelude::*;
use std::io::SeekFrom;
use std::sync::Arc;

/// Arbitrary command payloads, zero-length included.
fn blobs(max_len: usize, max_count: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..max_len), 0..max_count)
}

// =============================================================================
// PROP-RING-01: Bounded Count & Contiguity
// "count <= N; full <=> count == N; live slots are contiguous from out"
// =============================================================================

proptest! {
    /// Count stays bounded and full tracks it exactly after any insert sequence.
    #[test]
    fn prop_bounded_count(payloads in blobs(16, 40)) {
        let mut history = CommandHistory::new();

        for payload in payloads {
            history.push(payload.into_boxed_slice());

            prop_assert!(history.len() <= HISTORY_CAPACITY,
                "count {} exceeds capacity", history.len());
            prop_assert_eq!(history.is_full(), history.len() == HISTORY_CAPACITY);

            // Contiguity: every logical index below len resolves, none above.
            for i in 0..history.len() {
                prop_assert!(history.get(i).is_some(), "hole at logical index {}", i);
            }
            prop_assert!(history.get(history.len()).is_none());
        }
    }
}

// =============================================================================
// PROP-RING-02: Eviction Exactness
// "after N + k inserts the ring holds exactly the last N, in order"
// =============================================================================

proptest! {
    /// The live window is always the most recent N inserts, oldest first.
    #[test]
    fn prop_last_n_retained(payloads in blobs(12, 50)) {
        let mut history = CommandHistory::new();
        let mut evicted_count = 0usize;

        for payload in &payloads {
            if history.push(payload.clone().into_boxed_slice()).is_some() {
                evicted_count += 1;
            }
        }

        let live: Vec<&[u8]> = history.iter().collect();
        let window_start = payloads.len().saturating_sub(HISTORY_CAPACITY);

        prop_assert_eq!(evicted_count, window_start,
            "every insert past capacity must evict exactly once");
        prop_assert_eq!(live.len(), payloads.len() - window_start);
        for (got, want) in live.iter().zip(&payloads[window_start..]) {
            prop_assert_eq!(*got, &want[..]);
        }
    }
}

// =============================================================================
// PROP-RING-03: Find / Linear-Offset Law
// "find(p) = (slot, r) => p = sum(preceding lengths) + r and r < slot.len;
//  find(total_size) = None"
// =============================================================================

proptest! {
    /// Every valid offset resolves consistently with the concatenation.
    #[test]
    fn prop_find_linear_offset_law(payloads in blobs(10, 30)) {
        let mut history = CommandHistory::new();
        for payload in &payloads {
            history.push(payload.clone().into_boxed_slice());
        }

        let concatenated: Vec<u8> = history.iter().flatten().copied().collect();
        let total = history.total_size();
        prop_assert_eq!(concatenated.len(), total);

        for p in 0..total {
            let found = history.find(p);
            prop_assert!(found.is_some(), "find({}) returned None", p);
            let (entry, r) = found.expect("asserted above");
            prop_assert!(r < entry.len(), "residual {} not inside entry", r);
            // The byte at the translated coordinates is the byte of the
            // virtual concatenation.
            prop_assert_eq!(entry[r], concatenated[p]);
        }

        prop_assert!(history.find(total).is_none(), "find(total_size) must be end-of-data");
    }
}

// =============================================================================
// PROP-DEV-01: Write Coalescing
// "any chunk partition of a newline-terminated sequence produces the same
//  stored command as the sequence written whole"
// =============================================================================

proptest! {
    /// Chunk boundaries are invisible: the stored history only depends on
    /// the byte sequence.
    #[test]
    fn prop_write_coalescing(
        body in prop::collection::vec(any::<u8>().prop_filter("no newline", |b| *b != b'\n'), 0..64),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
    ) {
        let mut sequence = body;
        sequence.push(b'\n');

        // Reference: the sequence written as one chunk.
        let whole = Arc::new(Device::new());
        let mut handle = whole.open();
        handle.write(&sequence).expect("write");
        let mut expected = Vec::new();
        let mut buf = [0u8; 128];
        loop {
            let n = handle.read(&mut buf).expect("read");
            if n == 0 { break; }
            expected.extend_from_slice(&buf[..n]);
        }

        // Same sequence split at arbitrary points.
        let mut points: Vec<usize> = cuts.iter().map(|ix| ix.index(sequence.len())).collect();
        points.sort_unstable();
        points.dedup();

        let split = Arc::new(Device::new());
        let mut handle = split.open();
        let mut start = 0usize;
        for point in points.into_iter().chain(std::iter::once(sequence.len())) {
            if point > start {
                let consumed = handle.write(&sequence[start..point]).expect("write");
                prop_assert_eq!(consumed, point - start);
                start = point;
            }
        }

        handle.seek(SeekFrom::Start(0)).expect("seek");
        let mut got = Vec::new();
        loop {
            let n = handle.read(&mut buf).expect("read");
            if n == 0 { break; }
            got.extend_from_slice(&buf[..n]);
        }

        prop_assert_eq!(got, expected);
    }
}

// =============================================================================
// PROP-DEV-02: Seek Round-Trip
// "seek(SET, p) then seek(CUR, 0) returns p; EOF reads stay at EOF"
// =============================================================================

proptest! {
    /// Absolute seeks are observable through relative seeks and reads.
    #[test]
    fn prop_seek_round_trip(
        payloads in blobs(8, 12),
        probe in any::<prop::sample::Index>(),
    ) {
        let device = Arc::new(Device::new());
        let mut handle = device.open();
        for payload in &payloads {
            let mut line = payload.clone();
            line.retain(|b| *b != b'\n');
            line.push(b'\n');
            handle.write(&line).expect("write");
        }

        let total = handle.seek(SeekFrom::End(0)).expect("seek end");
        let p = probe.index(total as usize + 1) as u64;

        prop_assert_eq!(handle.seek(SeekFrom::Start(p)).expect("seek set"), p);
        prop_assert_eq!(handle.seek(SeekFrom::Current(0)).expect("seek cur"), p);

        // At end-of-data, reads return 0 and keep doing so.
        if p == total {
            let mut buf = [0u8; 4];
            prop_assert_eq!(handle.read(&mut buf).expect("read"), 0);
            prop_assert_eq!(handle.read(&mut buf).expect("read"), 0);
        }
    }
}
