#[cfg(test)]
mod telemetry_snapshot_tests {
    use std::time::Duration;

    use yenc_core::telemetry::{Stage, StageTimes, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};

    fn make_counters() -> TelemetryCounters {
        TelemetryCounters {
            articles_encoded: 3,
            articles_decoded: 0,
            bytes_raw: 1000,
            bytes_encoded: 1030,
            bytes_overhead: 180,
        }
    }

    fn make_timer() -> TelemetryTimer {
        let mut timer = TelemetryTimer::new();
        std::thread::sleep(Duration::from_millis(20)); // elapsed must exceed stage times
        timer.add_stage_time(Stage::Encode, Duration::from_millis(5));
        timer.add_stage_time(Stage::Checksum, Duration::from_millis(2));
        timer.finish();
        timer
    }

    #[test]
    fn snapshot_ratios() {
        let snap = TelemetrySnapshot::from(&make_counters(), &make_timer());
        assert!((snap.expansion_ratio - 1.03).abs() < 1e-9);
        assert!(snap.throughput_raw_bytes_per_sec > 0.0);
        assert_eq!(snap.output_bytes(), 1210);
        assert_eq!(snap.total_stage_time(), Duration::from_millis(7));
        assert!(snap.sanity_check());
    }

    #[test]
    fn empty_counters_give_zero_ratio() {
        let snap = TelemetrySnapshot::from(&TelemetryCounters::default(), &TelemetryTimer::new());
        assert_eq!(snap.expansion_ratio, 0.0);
        assert!(snap.sanity_check());
    }

    #[test]
    fn sanity_check_catches_inverted_counters() {
        let mut c = make_counters();
        c.bytes_encoded = 10;
        let snap = TelemetrySnapshot::from(&c, &make_timer());
        assert!(!snap.sanity_check());
    }

    #[test]
    fn stage_times_accumulate() {
        let mut t = StageTimes::default();
        t.add(Stage::Decode, Duration::from_micros(300));
        t.add(Stage::Decode, Duration::from_micros(200));
        assert_eq!(t.get(Stage::Decode), Duration::from_micros(500));
        t.add(Stage::Checksum, Duration::from_micros(25));
        assert_eq!(t.total(), Duration::from_micros(525));
        assert_eq!(t.get(Stage::Parse), Duration::ZERO);
        assert!(t.has_all(&[Stage::Decode]));
        assert!(!t.has_all(&[Stage::Decode, Stage::Frame]));
        assert_eq!(Stage::Checksum.to_string(), "checksum");
    }

    #[test]
    fn counters_merge_and_add_assign() {
        let mut a = make_counters();
        let b = TelemetryCounters { articles_decoded: 2, bytes_raw: 10, ..Default::default() };
        a.merge(&b);
        assert_eq!(a.articles_decoded, 2);
        assert_eq!(a.bytes_raw, 1010);

        let mut c = TelemetryCounters::default();
        c += make_counters();
        c += make_counters();
        assert_eq!(c.articles_encoded, 6);
        assert_eq!(c.framing_overhead_bytes(), 360);
    }

    #[test]
    fn counters_bincode_roundtrip() {
        let c = make_counters();
        let bytes = bincode::encode_to_vec(&c, bincode::config::standard()).unwrap();
        let (back, _): (TelemetryCounters, usize) =
            bincode::decode_from_slice(&bytes, bincode::config::standard()).unwrap();
        assert_eq!(back, c);
    }
}
