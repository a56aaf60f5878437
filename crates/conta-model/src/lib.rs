//! Core data model for the accounting conversion pipeline.
//!
//! This crate defines the types shared by every stage of the converter:
//! errors, payment types, canonical records, raw and output tables, and the
//! request/response contract consumed by the local HTTP layer.

pub mod error;
pub mod payment;
pub mod processing;
pub mod record;
pub mod table;

pub use error::{ConvError, Result};
pub use payment::PaymentType;
pub use processing::{
    InputFile, MIME_CSV, MIME_XLSX, OutputFile, ProcessMode, ProcessRequest, ProcessResponse,
};
pub use record::{BorderouRecord, CanonicalRecord};
pub use table::{ColumnKind, ColumnSpec, OutputSchema, OutputTable, RawTable, RowBuilder};
