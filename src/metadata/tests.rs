mod metadata_tests {
    mod piece_math_tests {
        use crate::metadata::metadata::{metadata_piece, piece_count, piece_length};

        #[test]
        fn test_piece_arithmetic() {
            assert_eq!(piece_count(1), 1);
            assert_eq!(piece_count(16384), 1);
            assert_eq!(piece_count(16385), 2);
            assert_eq!(piece_count(32768), 2);
            assert_eq!(piece_length(20_000, 0), Some(16384));
            assert_eq!(piece_length(20_000, 1), Some(3616));
            assert_eq!(piece_length(20_000, 2), None);
            assert_eq!(piece_length(32768, 1), Some(16384));
        }

        #[test]
        fn test_metadata_piece_slices() {
            let metadata = vec![9u8; 20_000];
            assert_eq!(metadata_piece(&metadata, 0).map(|piece| piece.len()), Some(16384));
            assert_eq!(metadata_piece(&metadata, 1).map(|piece| piece.len()), Some(3616));
            assert!(metadata_piece(&metadata, 2).is_none());
            assert!(metadata_piece(&metadata, u32::MAX).is_none());
        }
    }

    mod assembler_tests {
        use std::time::Duration;
        use tokio::time::Instant;
        use crate::config::enums::validation_strictness::ValidationStrictness;
        use crate::metadata::enums::assembly_outcome::AssemblyOutcome;
        use crate::metadata::enums::metadata_error::MetadataError;
        use crate::metadata::metadata::hash_metadata;
        use crate::metadata::structs::metadata_assembler::MetadataAssembler;
        use crate::metadata::structs::metadata_assembler_config::MetadataAssemblerConfig;

        fn config(validation: ValidationStrictness) -> MetadataAssemblerConfig {
            MetadataAssemblerConfig {
                max_requests_per_peer: 2,
                max_bad_contributions: 3,
                max_metadata_size: 1 << 20,
                request_timeout: Duration::from_secs(10),
                validation,
            }
        }

        fn sample(size: usize) -> Vec<u8> {
            (0..size).map(|index| (index % 251) as u8).collect()
        }

        fn piece(metadata: &[u8], index: u32) -> Vec<u8> {
            crate::metadata::metadata::metadata_piece(metadata, index).unwrap().to_vec()
        }

        #[test]
        fn test_first_declared_size_wins() {
            let metadata = sample(32768);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assert!(assembler.add_peer(1, Some(32768)).is_ok());
            assert_eq!(
                assembler.add_peer(2, Some(40000)),
                Err(MetadataError::SizeMismatch { declared: 32768, reported: 40000 })
            );
            assert_eq!(assembler.declared_total_size(), Some(32768));
            assert!(assembler.is_eligible(1));
            assert!(!assembler.is_eligible(2));
        }

        #[test]
        fn test_lenient_keeps_mismatching_peers() {
            let mut assembler = MetadataAssembler::new(hash_metadata(b"x"), config(ValidationStrictness::lenient));
            assembler.add_peer(1, Some(32768)).unwrap();
            assert!(assembler.add_peer(2, Some(40000)).is_err());
            assert!(assembler.is_eligible(2));
        }

        #[test]
        fn test_oversized_declaration_is_refused() {
            let mut assembler = MetadataAssembler::new(hash_metadata(b"x"), config(ValidationStrictness::standard));
            assert!(matches!(assembler.add_peer(1, Some(u32::MAX)), Err(MetadataError::TooLarge { .. })));
            assert_eq!(assembler.declared_total_size(), None);
            assert!(assembler.schedule(Instant::now()).is_empty());
        }

        #[test]
        fn test_schedule_round_robin_with_cap() {
            let metadata = sample(16384 * 6);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assembler.add_peer(1, Some(metadata.len() as u32)).unwrap();
            assembler.add_peer(2, None).unwrap();
            let requests = assembler.schedule(Instant::now());
            assert_eq!(requests, vec![(1, 0), (2, 1), (1, 2), (2, 3)]);
            assert!(assembler.schedule(Instant::now()).is_empty());

            assert_eq!(assembler.receive_piece(1, 0, Some(metadata.len() as u32), piece(&metadata, 0)), AssemblyOutcome::Pending);
            assert_eq!(assembler.schedule(Instant::now()), vec![(1, 4)]);
        }

        #[test]
        fn test_complete_assembly_verifies_hash() {
            let metadata = sample(20_000);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assembler.add_peer(1, Some(20_000)).unwrap();
            assert_eq!(assembler.schedule(Instant::now()), vec![(1, 0), (1, 1)]);
            assert_eq!(assembler.receive_piece(1, 1, None, piece(&metadata, 1)), AssemblyOutcome::Pending);
            assert_eq!(assembler.receive_piece(1, 0, None, piece(&metadata, 0)), AssemblyOutcome::Complete(metadata));
        }

        #[test]
        fn test_corrupted_piece_discards_assembly_and_retries_single_source() {
            let metadata = sample(32768);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assembler.add_peer(2, Some(32768)).unwrap();
            assembler.add_peer(1, Some(32768)).unwrap();
            assert_eq!(assembler.schedule(Instant::now()), vec![(2, 0), (1, 1)]);

            let mut corrupt = piece(&metadata, 0);
            corrupt[0] ^= 0xff;
            assert_eq!(assembler.receive_piece(2, 0, None, corrupt.clone()), AssemblyOutcome::Pending);
            assert_eq!(
                assembler.receive_piece(1, 1, None, piece(&metadata, 1)),
                AssemblyOutcome::Rejected { offenders: vec![1, 2] }
            );
            assert!(assembler.assembly.pieces.is_empty());
            assert_eq!(assembler.failed_attempts, 1);

            // Both have one strike; peer 2 negotiated first and gets the retry alone.
            assert_eq!(assembler.schedule(Instant::now()), vec![(2, 0), (2, 1)]);
            assembler.receive_piece(2, 0, None, corrupt);
            assert_eq!(assembler.receive_piece(2, 1, None, piece(&metadata, 1)), AssemblyOutcome::Rejected { offenders: vec![2] });
            assert_eq!(assembler.strikes(2), Some(2));
            assert_eq!(assembler.strikes(1), Some(1));

            assert_eq!(assembler.schedule(Instant::now()), vec![(1, 0), (1, 1)]);
            assembler.receive_piece(1, 0, None, piece(&metadata, 0));
            assert_eq!(assembler.receive_piece(1, 1, None, piece(&metadata, 1)), AssemblyOutcome::Complete(metadata));
        }

        #[test]
        fn test_peer_excluded_after_max_bad_contributions() {
            let metadata = sample(100);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assembler.add_peer(1, Some(100)).unwrap();
            for attempt in 1..=3 {
                assert_eq!(assembler.schedule(Instant::now()), vec![(1, 0)]);
                assert_eq!(assembler.receive_piece(1, 0, None, vec![0u8; 100]), AssemblyOutcome::Rejected { offenders: vec![1] });
                assert_eq!(assembler.strikes(1), Some(attempt));
            }
            assert!(!assembler.is_eligible(1));
            assert!(!assembler.has_eligible_peer());
            assert!(assembler.schedule(Instant::now()).is_empty());
        }

        #[test]
        fn test_unrequested_and_malformed_pieces_are_ignored() {
            let metadata = sample(20_000);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assembler.add_peer(1, Some(20_000)).unwrap();
            assembler.add_peer(2, Some(20_000)).unwrap();
            assert_eq!(assembler.receive_piece(1, 0, None, piece(&metadata, 0)), AssemblyOutcome::Ignored(MetadataError::UnexpectedPiece(0)));
            assembler.schedule(Instant::now());
            assert_eq!(assembler.receive_piece(2, 0, None, piece(&metadata, 0)), AssemblyOutcome::Ignored(MetadataError::UnexpectedPiece(0)));
            assert_eq!(
                assembler.receive_piece(1, 0, None, vec![0u8; 10]),
                AssemblyOutcome::Ignored(MetadataError::PieceLength { piece: 0, expected: 16384, actual: 10 })
            );
            assert_eq!(assembler.strikes(1), Some(1));
        }

        #[test]
        fn test_reject_and_removal_release_requests() {
            let metadata = sample(16384 * 4);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assembler.add_peer(1, Some(metadata.len() as u32)).unwrap();
            assembler.add_peer(2, None).unwrap();
            assert_eq!(assembler.schedule(Instant::now()).len(), 4);

            assembler.reject_piece(1, 0, Instant::now());
            assert!(!assembler.is_eligible(1));
            assert!(assembler.schedule(Instant::now()).is_empty());
            assembler.remove_peer(2);
            assert!(assembler.assembly.requested.is_empty());
            assert!(!assembler.has_eligible_peer());
        }

        #[test]
        fn test_refusing_peer_is_asked_again_after_timeout() {
            let metadata = sample(20_000);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assembler.add_peer(1, Some(20_000)).unwrap();
            let start = Instant::now();
            assert_eq!(assembler.schedule(start), vec![(1, 0), (1, 1)]);

            assembler.reject_piece(1, 0, start);
            assert!(assembler.schedule(start).is_empty());
            assembler.expire_requests(start + Duration::from_secs(5));
            assert!(!assembler.has_eligible_peer());

            let later = start + Duration::from_secs(3600);
            assembler.expire_requests(later);
            assert!(assembler.has_eligible_peer());
            assert_eq!(assembler.schedule(later), vec![(1, 0), (1, 1)]);
            assert_eq!(assembler.receive_piece(1, 0, Some(20_000), piece(&metadata, 0)), AssemblyOutcome::Pending);
            assert_eq!(assembler.receive_piece(1, 1, Some(20_000), piece(&metadata, 1)), AssemblyOutcome::Complete(metadata));
            assert_eq!(assembler.strikes(1), Some(0));
        }

        #[test]
        fn test_released_request_keeps_peer_eligible() {
            let metadata = sample(100);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assembler.add_peer(1, Some(100)).unwrap();
            assert_eq!(assembler.schedule(Instant::now()), vec![(1, 0)]);
            assembler.release_request(1, 0);
            assert!(assembler.is_eligible(1));
            assert_eq!(assembler.schedule(Instant::now()), vec![(1, 0)]);
        }

        #[test]
        fn test_timed_out_requests_are_released() {
            let metadata = sample(100);
            let mut assembler = MetadataAssembler::new(hash_metadata(&metadata), config(ValidationStrictness::standard));
            assembler.add_peer(1, Some(100)).unwrap();
            let start = Instant::now();
            assembler.schedule(start);
            assert_eq!(assembler.expire_requests(start + Duration::from_secs(5)), 0);
            assert_eq!(assembler.expire_requests(start + Duration::from_secs(11)), 1);
            assert_eq!(assembler.schedule(start), vec![(1, 0)]);
        }
    }

    mod torrent_info_tests {
        use bip_bencode::{ben_bytes, ben_int, ben_list, ben_map};
        use crate::metadata::enums::metadata_error::MetadataError;
        use crate::metadata::structs::torrent_info::TorrentInfo;

        #[test]
        fn test_parse_single_file() {
            let info = ben_map! {
                "length" => ben_int!(1234),
                "name" => ben_bytes!("movie.mkv"),
                "piece length" => ben_int!(16384),
                "pieces" => ben_bytes!(vec![0u8; 20])
            }.encode();
            let parsed = TorrentInfo::parse(&info).unwrap();
            assert_eq!(parsed.name, "movie.mkv");
            assert_eq!(parsed.total_size, 1234);
            assert_eq!(parsed.files.len(), 1);
            assert_eq!(parsed.files[0].path, "movie.mkv");
        }

        #[test]
        fn test_parse_multi_file() {
            let info = ben_map! {
                "files" => ben_list!(
                    ben_map! { "length" => ben_int!(10), "path" => ben_list!(ben_bytes!("a.txt")) },
                    ben_map! { "length" => ben_int!(20), "path" => ben_list!(ben_bytes!("sub"), ben_bytes!("b.txt")) }
                ),
                "name" => ben_bytes!("album"),
                "piece length" => ben_int!(32768)
            }.encode();
            let parsed = TorrentInfo::parse(&info).unwrap();
            assert_eq!(parsed.total_size, 30);
            assert_eq!(parsed.files[1].path, "album/sub/b.txt");
            assert_eq!(parsed.files[1].name, "b.txt");
            assert_eq!(parsed.find_file("a.txt").map(|file| file.size), Some(10));
            assert_eq!(parsed.find_file("album/sub/b.txt").map(|file| file.size), Some(20));
        }

        #[test]
        fn test_parse_rejects_traversal_and_garbage() {
            let info = ben_map! {
                "files" => ben_list!(
                    ben_map! { "length" => ben_int!(10), "path" => ben_list!(ben_bytes!(".."), ben_bytes!("passwd")) }
                ),
                "name" => ben_bytes!("evil"),
                "piece length" => ben_int!(16384)
            }.encode();
            assert!(matches!(TorrentInfo::parse(&info), Err(MetadataError::InvalidInfo(_))));
            assert!(TorrentInfo::parse(b"not bencode").is_err());
            assert!(TorrentInfo::parse(b"i42e").is_err());
        }

        #[test]
        fn test_parse_rejects_overflowing_total_length() {
            let info = ben_map! {
                "files" => ben_list!(
                    ben_map! { "length" => ben_int!(i64::MAX), "path" => ben_list!(ben_bytes!("a.bin")) },
                    ben_map! { "length" => ben_int!(i64::MAX), "path" => ben_list!(ben_bytes!("b.bin")) },
                    ben_map! { "length" => ben_int!(i64::MAX), "path" => ben_list!(ben_bytes!("c.bin")) }
                ),
                "name" => ben_bytes!("huge"),
                "piece length" => ben_int!(16384)
            }.encode();
            assert_eq!(TorrentInfo::parse(&info), Err(MetadataError::InvalidInfo("total length overflows".to_string())));
        }
    }
}
