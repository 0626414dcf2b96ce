//! Test utilities for the IR receiver core

pub mod frames {
    //! Synthetic frame construction
    //!
    //! Builds 17-edge packets whose intervals sit exactly on the
    //! protocol grid: an interval of timing level `l` spans
    //! `(l + 7) * UNIT_TICKS` clock ticks, and the header min/max spans
    //! differ by 15 levels so the decoder infers a bit time of
    //! `8 * UNIT_TICKS` after its fixed-point scale-up.

    use crate::capture::Packet;
    use crate::decoder::{FRAME_EDGES, FRAME_INTERVALS, PAYLOAD_LEVELS};
    use heapless::Vec;

    /// Bit time of the synthetic protocol, in raw clock ticks
    pub const UNIT_TICKS: u64 = 75;

    /// Timestamp of the first edge of a synthetic frame
    pub const FIRST_EDGE_TICK: u64 = 1_000;

    /// Header timing levels satisfying both consistency checks:
    /// levels [2] and [3] span 15 units, [3] = [4] + [5] and
    /// [7] = [6] + [5] hold exactly
    pub const HEADER_LEVELS: [i8; 8] = [0, 1, -4, 11, 2, 2, -3, 6];

    /// Interval ticks for one timing level
    pub const fn level_ticks(level: i8) -> u64 {
        (level as i64 + 7) as u64 * UNIT_TICKS
    }

    /// Build a packet from absolute edge timestamps
    pub fn packet_from_edges(edges: &[u64]) -> Packet {
        let mut packet = Packet::EMPTY;
        packet.samples = edges.len();
        packet.edge_ticks[..edges.len()].copy_from_slice(edges);
        packet
    }

    /// Build a packet from inter-edge intervals (edge count is one more
    /// than the interval count)
    pub fn packet_from_intervals(intervals: &[u64]) -> Packet {
        let mut edges: Vec<u64, 32> = Vec::new();
        let mut t = FIRST_EDGE_TICK;
        edges.push(t).unwrap();
        for &interval in intervals {
            t += interval;
            edges.push(t).unwrap();
        }
        packet_from_edges(&edges)
    }

    /// Build a well-formed 17-edge frame carrying the given payload
    /// timing levels
    pub fn well_formed(payload: [i8; PAYLOAD_LEVELS]) -> Packet {
        let mut intervals: Vec<u64, FRAME_INTERVALS> = Vec::new();
        for level in HEADER_LEVELS {
            intervals.push(level_ticks(level)).unwrap();
        }
        for level in payload {
            intervals.push(level_ticks(level)).unwrap();
        }
        let packet = packet_from_intervals(&intervals);
        debug_assert_eq!(packet.samples, FRAME_EDGES);
        packet
    }

    /// Payload levels for a digit key, checksum balanced to 16
    pub fn digit_payload(digit: u8) -> [i8; PAYLOAD_LEVELS] {
        assert!(digit <= 9);
        [6, 0, 0, 0, 0, digit as i8, 0, 10 - digit as i8]
    }

    /// Payload levels for the enter key (special-code escape)
    pub const ENTER_PAYLOAD: [i8; PAYLOAD_LEVELS] = [6, 0, 0, 0, 1, 5, 0, 4];

    /// Well-formed frame for a digit key
    pub fn digit_frame(digit: u8) -> Packet {
        well_formed(digit_payload(digit))
    }

    /// Well-formed frame for the enter key
    pub fn enter_frame() -> Packet {
        well_formed(ENTER_PAYLOAD)
    }
}
