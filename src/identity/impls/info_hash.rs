use std::fmt;
use std::fmt::Formatter;
use crate::identity::enums::parse_error::ParseError;
use crate::identity::structs::info_hash::InfoHash;

impl InfoHash {
    pub fn from_hex(value: &str) -> Result<InfoHash, ParseError> {
        if value.len() != 40 {
            return Err(ParseError::InvalidHash(format!("expected 40 hex characters, got {}", value.len())));
        }
        let mut result = InfoHash([0u8; 20]);
        hex::decode_to_slice(value, &mut result.0)
            .map_err(|e| ParseError::InvalidHash(e.to_string()))?;
        Ok(result)
    }

    pub fn from_base32(value: &str) -> Result<InfoHash, ParseError> {
        if value.len() != 32 {
            return Err(ParseError::InvalidHash(format!("expected 32 base32 characters, got {}", value.len())));
        }
        let mut out = Vec::with_capacity(20);
        let mut buffer: u32 = 0;
        let mut bits: u8 = 0;
        for ch in value.chars() {
            let val = base32_value(ch)
                .ok_or_else(|| ParseError::InvalidHash(format!("invalid base32 character '{ch}'")))?;
            buffer = (buffer << 5) | val as u32;
            bits += 5;
            if bits >= 8 {
                bits -= 8;
                out.push(((buffer >> bits) & 0xff) as u8);
            }
        }
        let mut result = InfoHash([0u8; 20]);
        result.0.copy_from_slice(&out);
        Ok(result)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn short(&self) -> String {
        self.to_hex()[..8].to_string()
    }
}

fn base32_value(ch: char) -> Option<u8> {
    let ch = ch.to_ascii_uppercase();
    match ch {
        'A'..='Z' => Some(ch as u8 - b'A'),
        '2'..='7' => Some(ch as u8 - b'2' + 26),
        _ => None,
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl std::str::FromStr for InfoHash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.len() {
            40 => InfoHash::from_hex(s),
            32 => InfoHash::from_base32(s),
            other => Err(ParseError::InvalidHash(format!("unexpected hash length {other}"))),
        }
    }
}

impl From<[u8; 20]> for InfoHash {
    fn from(data: [u8; 20]) -> Self {
        InfoHash(data)
    }
}

impl serde::ser::Serialize for InfoHash {
    fn serialize<S: serde::ser::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::de::Deserialize<'de> for InfoHash {
    fn deserialize<D: serde::de::Deserializer<'de>>(des: D) -> Result<Self, D::Error> {
        struct InfoHashVisitor;

        impl<'de> serde::de::Visitor<'de> for InfoHashVisitor {
            type Value = InfoHash;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 40 character hex string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                InfoHash::from_hex(v).map_err(|e| E::custom(e.to_string()))
            }
        }
        des.deserialize_str(InfoHashVisitor)
    }
}
