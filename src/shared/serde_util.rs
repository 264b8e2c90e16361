//! Custom serde helpers for configuration files.

/// (De)serializes a `Pubkey` as its base58 string.
pub mod pubkey_str {
    use serde::{Deserialize, Deserializer, Serializer};
    use solana_pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(value: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pubkey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s)
            .map_err(|e| serde::de::Error::custom(format!("Invalid pubkey {}: {}", s, e)))
    }
}

/// Deserializes a timestamp given either as Unix millis or an RFC 3339 string.
/// Serializes as Unix millis.
pub mod timestamp_ms {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.timestamp_millis())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(millis) => DateTime::<Utc>::from_timestamp_millis(millis)
                .ok_or_else(|| serde::de::Error::custom(format!("Invalid timestamp: {}", millis))),
            Raw::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| serde::de::Error::custom(format!("Invalid timestamp {}: {}", text, e))),
        }
    }
}
