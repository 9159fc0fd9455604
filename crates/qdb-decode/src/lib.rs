//! QDB payload and date decoding.
//!
//! Message blobs in a `.qdb` container wrap an HTML fragment between the
//! `DataRawText` and `MimeType` markers, surrounded by binary field
//! separators. Dates are OLE Automation day counts.
//!
//! Neither decoder can fail: corrupt payloads degrade to sentinel text and
//! any float maps to some calendar value.
pub mod config;
pub mod payload;
pub mod timestamp;

pub use config::{ConfigError, DecoderConfig};
pub use payload::{BINARY_DATA_SENTINEL, NO_MESSAGE_SENTINEL, PayloadDecoder, decode};
pub use timestamp::{format_timestamp, normalize};
