// CRC-32 engine and algebra: reference values, combine/zeros laws,
// backend agreement and multi-part verification.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use yenc_core::crc::{self, combine, multiply, two_fifty_six_pow, two_pow, unzero, zeros};
    use yenc_core::crc::{CrcEngine, CrcError, FileCrcVerifier};
    use yenc_core::kernel::{CpuFeatures, KernelContext};

    fn reference(data: &[u8]) -> u32 {
        let mut h = crc32fast::Hasher::new();
        h.update(data);
        h.finalize()
    }

    #[test]
    fn known_vectors() {
        assert_eq!(crc::crc32(b"123456789", 0), 0xcbf4_3926);
        assert_eq!(crc::crc32(b"Hello, world!", 0), 0xebe6_c6e6);
        assert_eq!(crc::to_hex(0xebe6_c6e6), "ebe6c6e6");
        assert_eq!(crc::to_hex(0x0000_00ff), "000000ff");
    }

    #[test]
    fn empty_input_returns_seed() {
        let engine = CrcEngine::new(&KernelContext::generic());
        for seed in [0u32, 1, 0xdead_beef, u32::MAX] {
            assert_eq!(engine.crc(&[], seed), seed);
            assert_eq!(crc::crc32(&[], seed), seed);
        }
    }

    #[test]
    fn continuation_matches_one_shot() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i.wrapping_mul(2654435761) >> 24) as u8).collect();
        let engine = CrcEngine::new(&KernelContext::generic());
        let mut acc = 0;
        for chunk in data.chunks(333) {
            acc = engine.crc(chunk, acc);
        }
        assert_eq!(acc, reference(&data));
    }

    #[test]
    fn table_and_accelerated_backends_agree() {
        let data: Vec<u8> = (0..4099u32).map(|i| (i * 7 + 3) as u8).collect();
        let table = CrcEngine::new(&KernelContext::generic());
        let fast = CrcEngine::new(&KernelContext::for_features(CpuFeatures::PCLMULQDQ | CpuFeatures::SSE41));
        assert_ne!(table.kernel(), fast.kernel());
        assert_eq!(table.crc(&data, 0), fast.crc(&data, 0));
        assert_eq!(table.crc(&data, 0x1234_5678), fast.crc(&data, 0x1234_5678));
    }

    #[test]
    fn combine_with_empty_second_range() {
        let a = crc::crc32(b"abc", 0);
        assert_eq!(combine(a, 0, 0), a);
        assert_eq!(combine(0, a, 3), a);
    }

    #[test]
    fn zeros_matches_real_zero_bytes() {
        let base = crc::crc32(b"payload", 0);
        for n in [0usize, 1, 4, 17, 1000] {
            let padded = crc::crc32(&vec![0u8; n], base);
            assert_eq!(zeros(base, n as u64), padded, "n={n}");
            assert_eq!(unzero(padded, n as u64), base, "n={n}");
        }
    }

    #[test]
    fn power_helpers_are_consistent() {
        let one = 0x8000_0000u32;
        assert_eq!(two_pow(0), one);
        assert_eq!(two_fifty_six_pow(0), one);
        assert_eq!(two_fifty_six_pow(1), two_pow(8));
        assert_eq!(multiply(two_pow(5), two_pow(7)), two_pow(12));
        assert_eq!(multiply(two_pow(-3), two_pow(3)), one);
        assert_eq!(multiply(two_fifty_six_pow(-2), two_fifty_six_pow(2)), one);
    }

    #[test]
    fn verifier_reports_mismatch_and_gaps() {
        let data = vec![0x5au8; 900];
        let parts: Vec<(u64, u64, u32)> = data
            .chunks(300)
            .enumerate()
            .map(|(i, c)| ((i * 300) as u64, c.len() as u64, reference(c)))
            .collect();

        let mut v = FileCrcVerifier::new(900, Some(reference(&data) ^ 1));
        for &(off, len, c) in &parts {
            v.add_part(off, len, c).unwrap();
        }
        assert!(matches!(v.finalize(), Err(CrcError::Mismatch { .. })));

        let mut v = FileCrcVerifier::new(900, None);
        v.add_part(parts[0].0, parts[0].1, parts[0].2).unwrap();
        v.add_part(parts[2].0, parts[2].1, parts[2].2).unwrap();
        assert_eq!(v.combined(), Err(CrcError::Incomplete { covered: 600, total: 900 }));
        assert_eq!(v.add_part(250, 100, 0), Err(CrcError::Overlap { offset: 250, length: 100 }));
        assert!(matches!(v.add_part(800, 200, 0), Err(CrcError::OutOfRange { .. })));
    }

    proptest! {
        #[test]
        fn combine_law(a in proptest::collection::vec(any::<u8>(), 0..512),
                       b in proptest::collection::vec(any::<u8>(), 0..512)) {
            let whole = [a.as_slice(), b.as_slice()].concat();
            prop_assert_eq!(
                combine(crc::crc32(&a, 0), crc::crc32(&b, 0), b.len() as u64),
                crc::crc32(&whole, 0)
            );
        }

        #[test]
        fn zero_unzero_inverse(c in any::<u32>(), n in any::<u64>()) {
            prop_assert_eq!(unzero(zeros(c, n), n), c);
            prop_assert_eq!(zeros(unzero(c, n), n), c);
        }

        #[test]
        fn engine_matches_crc32fast(data in proptest::collection::vec(any::<u8>(), 0..2048), seed in any::<u32>()) {
            let engine = CrcEngine::new(&KernelContext::generic());
            let mut h = crc32fast::Hasher::new_with_initial(seed);
            h.update(&data);
            prop_assert_eq!(engine.crc(&data, seed), h.finalize());
        }
    }
}
