use std::str::FromStr;

/// Control bytes observed as field separators in sample payloads.
pub const DEFAULT_STRIPPED_BYTES: [u8; 5] = [0x00, 0x08, 0x10, 0x01, 0x12];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid byte {0:?} in strip list (expected hex like `08` or `0x08`)")]
    InvalidByte(String),
}

/// Decoder settings.
///
/// The strip list is empirical. Captures from other client builds may carry
/// separators that are not in the default set, so it can be replaced from
/// configuration (see [`DecoderConfig::from_str`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    pub stripped_bytes: Vec<u8>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            stripped_bytes: DEFAULT_STRIPPED_BYTES.to_vec(),
        }
    }
}

impl FromStr for DecoderConfig {
    type Err = ConfigError;

    /// Parses a comma separated hex list, e.g. `00,08,0x10`. An empty string
    /// disables stripping.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut stripped_bytes = Vec::new();
        for token in s.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let digits = token
                .strip_prefix("0x")
                .or_else(|| token.strip_prefix("0X"))
                .unwrap_or(token);
            let byte = u8::from_str_radix(digits, 16)
                .map_err(|_| ConfigError::InvalidByte(token.to_string()))?;
            if !stripped_bytes.contains(&byte) {
                stripped_bytes.push(byte);
            }
        }
        Ok(Self { stripped_bytes })
    }
}
