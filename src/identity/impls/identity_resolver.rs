use std::net::SocketAddr;
use log::debug;
use percent_encoding::percent_decode_str;
use crate::config::enums::validation_strictness::ValidationStrictness;
use crate::identity::enums::parse_error::ParseError;
use crate::identity::structs::identity_resolver::IdentityResolver;
use crate::identity::structs::info_hash::InfoHash;
use crate::identity::structs::resolved_identity::ResolvedIdentity;

pub const PLACEHOLDER_NAME: &str = "Unnamed torrent";
const MAGNET_PREFIX: &str = "magnet:";
const BTIH_PREFIX: &str = "urn:btih:";

impl IdentityResolver {
    pub fn resolve(identifier: &str) -> Result<ResolvedIdentity, ParseError> {
        Self::resolve_with(identifier, ValidationStrictness::standard)
    }

    #[tracing::instrument(level = "debug")]
    pub fn resolve_with(identifier: &str, strictness: ValidationStrictness) -> Result<ResolvedIdentity, ParseError> {
        let trimmed = identifier.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        if has_prefix(trimmed, MAGNET_PREFIX) {
            return Self::resolve_magnet(trimmed, strictness);
        }

        if let Some((scheme, _)) = trimmed.split_once(':') {
            return Err(ParseError::UnsupportedScheme(scheme.to_string()));
        }

        let info_hash = Self::parse_hash(trimmed, strictness)?;
        Ok(ResolvedIdentity {
            info_hash,
            display_name: PLACEHOLDER_NAME.to_string(),
            source_uri: Self::canonical_uri(&info_hash),
            trackers: Vec::new(),
            peers: Vec::new(),
        })
    }

    pub fn canonical_uri(info_hash: &InfoHash) -> String {
        format!("{MAGNET_PREFIX}?xt={BTIH_PREFIX}{}", info_hash.to_hex())
    }

    fn parse_hash(value: &str, strictness: ValidationStrictness) -> Result<InfoHash, ParseError> {
        if value.len() == 32 && strictness == ValidationStrictness::strict {
            return Err(ParseError::InvalidHash("base32 hashes are rejected in strict mode".to_string()));
        }
        value.parse::<InfoHash>()
    }

    fn resolve_magnet(uri: &str, strictness: ValidationStrictness) -> Result<ResolvedIdentity, ParseError> {
        let query = match uri.split_once('?') {
            None => return Err(ParseError::MissingHash),
            Some((_, query)) => query,
        };

        let mut info_hash: Option<InfoHash> = None;
        let mut hash_error: Option<ParseError> = None;
        let mut display_name: Option<String> = None;
        let mut trackers: Vec<String> = Vec::new();
        let mut peers: Vec<SocketAddr> = Vec::new();

        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = percent_decode_str(raw_key).decode_utf8_lossy().to_lowercase();
            match key.as_str() {
                "xt" => {
                    if info_hash.is_some() {
                        continue;
                    }
                    let value = percent_decode_str(raw_value).decode_utf8_lossy().to_string();
                    if has_prefix(&value, BTIH_PREFIX) {
                        match Self::parse_hash(&value[BTIH_PREFIX.len()..], strictness) {
                            Ok(hash) => info_hash = Some(hash),
                            Err(e) => hash_error = Some(e),
                        }
                    }
                }
                "dn" => {
                    let plus_decoded = raw_value.replace('+', " ");
                    match percent_decode_str(&plus_decoded).decode_utf8() {
                        Ok(name) if !name.trim().is_empty() => display_name = Some(name.trim().to_string()),
                        _ => debug!("[IDENTITY] Ignoring malformed display name parameter"),
                    }
                }
                "tr" => {
                    if let Ok(tracker) = percent_decode_str(raw_value).decode_utf8() {
                        if !tracker.is_empty() && !trackers.iter().any(|t| t == tracker.as_ref()) {
                            trackers.push(tracker.to_string());
                        }
                    }
                }
                "x.pe" => {
                    let value = percent_decode_str(raw_value).decode_utf8_lossy();
                    match value.parse::<SocketAddr>() {
                        Ok(addr) => peers.push(addr),
                        Err(_) => debug!("[IDENTITY] Ignoring malformed peer hint {value}"),
                    }
                }
                _ => {}
            }
        }

        let info_hash = match (info_hash, hash_error) {
            (Some(hash), _) => hash,
            (None, Some(error)) => return Err(error),
            (None, None) => return Err(ParseError::MissingHash),
        };

        Ok(ResolvedIdentity {
            info_hash,
            display_name: display_name.unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            source_uri: uri.to_string(),
            trackers,
            peers,
        })
    }
}

fn has_prefix(value: &str, prefix: &str) -> bool {
    value.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
