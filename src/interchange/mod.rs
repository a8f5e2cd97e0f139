//! Text interchange with external tools
//!
//! - `csv`: encoding and line-oriented decoding of the delimited format
//! - `merge`: identity-based merge of decoded records into a snapshot

pub mod csv;
pub mod merge;

pub use self::csv::{decode, from_text, to_text, write_text, Decoded, DroppedRow, HEADER};
pub use self::merge::{merge, Merged};
