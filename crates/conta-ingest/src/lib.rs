//! Input side of the converter: raw file readers and the pattern-checked
//! normalizer that turns untyped rows into canonical records.

pub mod normalize;
pub mod parse;
pub mod read;

pub use normalize::{normalize_borderou, normalize_payments, verify_columns};
pub use read::{read_csv_bytes, read_csv_path, read_xlsx_bytes, read_xlsx_path};
