//! Writers for the produced import files.

pub mod csv_out;
pub mod xlsx_out;

pub use csv_out::{write_csv_bytes, write_csv_path};
pub use xlsx_out::{write_xlsx_bytes, write_xlsx_path};
