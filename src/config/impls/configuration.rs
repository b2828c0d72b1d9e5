use std::fs::File;
use std::io::Write;
use std::net::SocketAddr;
use regex::Regex;
use crate::common::structs::custom_error::CustomError;
use crate::config::enums::catalog_engine::CatalogEngine;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::enums::validation_strictness::ValidationStrictness;
use crate::config::structs::announce_config::AnnounceConfig;
use crate::config::structs::catalog_config::CatalogConfig;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::storage_config::StorageConfig;
use crate::config::structs::swarm_config::SwarmConfig;

const TRACKER_URL_REGEX: &str = r"^(udp|https?|wss?)://[^\s/:]+(:[0-9]{1,5})?(/\S*)?$";
const PEER_ID_PREFIX_REGEX: &str = r"^[\x21-\x7e]{8}$";
const LOG_LEVELS: [&str; 6] = ["off", "trace", "debug", "info", "warn", "error"];

impl Configuration {
    pub fn init() -> Configuration {
        Configuration {
            log_level: String::from("info"),
            log_console_interval: 60,
            swarm: SwarmConfig {
                listen_address: String::from("0.0.0.0:6881"),
                peer_id_prefix: String::from("-MS0100-"),
                max_peers_per_session: 50,
                connect_timeout: 10,
                handshake_timeout: 15,
                extension_timeout: 10,
                metadata_request_timeout: 10,
                max_requests_per_peer: 2,
                max_bad_contributions: 3,
                max_metadata_size: 16 * 1024 * 1024,
                keep_alive_interval: 120,
                validation: ValidationStrictness::standard,
            },
            announce: AnnounceConfig {
                trackers: vec![
                    String::from("udp://tracker.opentrackr.org:1337/announce"),
                    String::from("udp://open.demonii.com:1337/announce"),
                ],
                discovery_enabled: true,
                bootstrap_peers: vec![],
                interval: 30,
                interval_jitter: 10,
                backoff_max: 900,
                timeout: 15,
            },
            storage: StorageConfig {
                root: String::from("data"),
            },
            catalog: CatalogConfig {
                engine: CatalogEngine::json,
                path: String::from("data/catalog.json"),
                retry_interval: 30,
                repair_interval: 300,
            },
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        match std::fs::read(path) {
            Err(e) => Err(ConfigurationError::IOError(e)),
            Ok(data) => {
                match Self::load(data.as_slice()) {
                    Ok(cfg) => Ok(cfg),
                    Err(e) => Err(ConfigurationError::ParseError(e)),
                }
            }
        }
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        match File::create(path) {
            Ok(mut file) => {
                match file.write_all(data.as_ref()) {
                    Ok(_) => Ok(()),
                    Err(e) => Err(ConfigurationError::IOError(e))
                }
            }
            Err(e) => Err(ConfigurationError::IOError(e))
        }
    }

    pub fn load_from_file(path: &str, create: bool) -> Result<Configuration, CustomError> {
        let config = match Configuration::load_file(path) {
            Ok(c) => c,
            Err(error) => {
                eprintln!("No config file found or corrupt.");
                eprintln!("[ERROR] {error}");

                if !create {
                    eprintln!("You can either create your own {path} file, or start this app using '--create-config' as parameter.");
                    return Err(CustomError::new("will not create automatically the config file"));
                }
                eprintln!("Creating config file..");

                let config_toml = toml::to_string(&Configuration::init())
                    .map_err(|e| CustomError::new(&format!("could not serialize default configuration: {e}")))?;
                return match Configuration::save_file(path, config_toml) {
                    Ok(_) => {
                        eprintln!("Please edit {path} and start again, exiting now...");
                        Err(CustomError::new("created config file"))
                    }
                    Err(e) => {
                        eprintln!("{path} could not be created, check permissions...");
                        eprintln!("{e}");
                        Err(CustomError::new("could not create config file"))
                    }
                };
            }
        };

        println!("[VALIDATE] Validating configuration...");
        if let Err(error) = config.validate() {
            eprintln!("[VALIDATE] {error}");
            return Err(CustomError::new(&error.to_string()));
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigurationError::ValidationError(format!("unknown log level '{}'", self.log_level)));
        }

        let mut check_map = vec![
            ("[SWARM] peer_id_prefix", self.swarm.peer_id_prefix.clone(), PEER_ID_PREFIX_REGEX),
        ];
        for tracker in &self.announce.trackers {
            check_map.push(("[ANNOUNCE] trackers", tracker.clone(), TRACKER_URL_REGEX));
        }
        for (name, value, regex) in check_map {
            Self::validate_value(name, &value, regex)?;
        }

        if self.swarm.listen_address.parse::<SocketAddr>().is_err() {
            return Err(ConfigurationError::ValidationError(format!("[SWARM] listen_address '{}' is not a socket address", self.swarm.listen_address)));
        }
        for peer in &self.announce.bootstrap_peers {
            if peer.parse::<SocketAddr>().is_err() {
                return Err(ConfigurationError::ValidationError(format!("[ANNOUNCE] bootstrap peer '{peer}' is not a socket address")));
            }
        }

        let positive = [
            ("[SWARM] max_peers_per_session", self.swarm.max_peers_per_session as u64),
            ("[SWARM] connect_timeout", self.swarm.connect_timeout),
            ("[SWARM] handshake_timeout", self.swarm.handshake_timeout),
            ("[SWARM] extension_timeout", self.swarm.extension_timeout),
            ("[SWARM] metadata_request_timeout", self.swarm.metadata_request_timeout),
            ("[SWARM] max_requests_per_peer", self.swarm.max_requests_per_peer as u64),
            ("[SWARM] max_bad_contributions", self.swarm.max_bad_contributions as u64),
            ("[SWARM] max_metadata_size", self.swarm.max_metadata_size as u64),
            ("[SWARM] keep_alive_interval", self.swarm.keep_alive_interval),
            ("[ANNOUNCE] interval", self.announce.interval),
            ("[ANNOUNCE] timeout", self.announce.timeout),
            ("[CATALOG] retry_interval", self.catalog.retry_interval),
            ("[CATALOG] repair_interval", self.catalog.repair_interval),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigurationError::ValidationError(format!("{name} must be greater than zero")));
            }
        }

        if self.announce.backoff_max < self.announce.interval {
            return Err(ConfigurationError::ValidationError(String::from("[ANNOUNCE] backoff_max must not be lower than interval")));
        }
        if self.storage.root.is_empty() {
            return Err(ConfigurationError::ValidationError(String::from("[STORAGE] root must not be empty")));
        }
        if self.catalog.engine == CatalogEngine::json && self.catalog.path.is_empty() {
            return Err(ConfigurationError::ValidationError(String::from("[CATALOG] path must be set for the json engine")));
        }
        Ok(())
    }

    pub fn validate_value(name: &str, value: &str, regex: &str) -> Result<(), ConfigurationError>
    {
        let regex_check = Regex::new(regex)
            .map_err(|e| ConfigurationError::ValidationError(format!("{name}: {e}")))?;
        if !regex_check.is_match(value) {
            return Err(ConfigurationError::ValidationError(format!("Error checking {name} [:] Value: \"{value}\" [:] Regex: \"{regex_check}\"")));
        }
        Ok(())
    }
}
