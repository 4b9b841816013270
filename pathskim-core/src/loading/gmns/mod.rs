//! Raw GMNS table records and CSV deserialization

mod parser;
mod raw_types;

pub use parser::deserialize_csv_file;
pub use raw_types::{RawDemand, RawLink, RawNode};
