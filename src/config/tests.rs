mod config_tests {
    mod configuration_tests {
        use crate::config::enums::catalog_engine::CatalogEngine;
        use crate::config::enums::configuration_error::ConfigurationError;
        use crate::config::enums::validation_strictness::ValidationStrictness;
        use crate::config::structs::configuration::Configuration;

        #[test]
        fn test_default_configuration_is_valid() {
            let config = Configuration::init();
            assert!(config.validate().is_ok());
            assert_eq!(config.swarm.handshake_timeout, 15);
            assert_eq!(config.swarm.extension_timeout, 10);
            assert_eq!(config.swarm.max_requests_per_peer, 2);
            assert_eq!(config.swarm.max_bad_contributions, 3);
        }

        #[test]
        fn test_configuration_toml_roundtrip() {
            let config = Configuration::init();
            let serialized = toml::to_string(&config).unwrap();
            let parsed = Configuration::load(serialized.as_bytes()).unwrap();
            assert_eq!(parsed.swarm.listen_address, config.swarm.listen_address);
            assert_eq!(parsed.announce.trackers, config.announce.trackers);
            assert_eq!(parsed.catalog.engine, CatalogEngine::json);
            assert_eq!(parsed.swarm.validation, ValidationStrictness::standard);
        }

        #[test]
        fn test_invalid_tracker_url_is_rejected() {
            let mut config = Configuration::init();
            config.announce.trackers.push(String::from("ftp://tracker.example/announce"));
            assert!(matches!(config.validate(), Err(ConfigurationError::ValidationError(_))));
        }

        #[test]
        fn test_invalid_values_are_rejected() {
            let mut config = Configuration::init();
            config.log_level = String::from("loud");
            assert!(config.validate().is_err());

            let mut config = Configuration::init();
            config.swarm.listen_address = String::from("not-an-address");
            assert!(config.validate().is_err());

            let mut config = Configuration::init();
            config.swarm.handshake_timeout = 0;
            assert!(config.validate().is_err());

            let mut config = Configuration::init();
            config.announce.backoff_max = 1;
            assert!(config.validate().is_err());

            let mut config = Configuration::init();
            config.swarm.peer_id_prefix = String::from("-short");
            assert!(config.validate().is_err());
        }

        #[test]
        fn test_load_file_missing_is_io_error() {
            let result = Configuration::load_file("/nonexistent/magnet-swarm/config.toml");
            assert!(matches!(result, Err(ConfigurationError::IOError(_))));
        }

        #[test]
        fn test_load_from_file_creates_default() {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("config.toml");
            let path_str = path.to_str().unwrap();
            assert!(Configuration::load_from_file(path_str, true).is_err());
            assert!(path.exists());
            let config = Configuration::load_from_file(path_str, false).unwrap();
            assert_eq!(config.log_level, "info");
        }
    }

    mod strictness_tests {
        use crate::config::enums::validation_strictness::ValidationStrictness;

        #[test]
        fn test_strictness_policies() {
            assert!(ValidationStrictness::lenient.tolerates_size_mismatch());
            assert!(!ValidationStrictness::standard.tolerates_size_mismatch());
            assert!(!ValidationStrictness::standard.requires_parsable_info());
            assert!(ValidationStrictness::strict.requires_parsable_info());
        }

        #[test]
        fn test_strictness_serialization() {
            assert_eq!(serde_json::to_string(&ValidationStrictness::strict).unwrap(), "\"strict\"");
            let parsed: ValidationStrictness = serde_json::from_str("\"lenient\"").unwrap();
            assert_eq!(parsed, ValidationStrictness::lenient);
            assert_eq!(format!("{}", ValidationStrictness::standard), "standard");
        }
    }
}
