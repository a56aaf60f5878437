//! Transformation patterns: recognition rules, column mappings, VAT
//! configuration and output profiles for every supported file family.

pub mod builtin;
pub mod pattern;
pub mod registry;
pub mod schemas;

pub use pattern::{
    BorderouColumns, NumberStyle, OutputProfile, Pattern, PatternFamily, PaymentColumns,
    SourceColumns, SplitConfig, SplitUnit, TargetFormat, VatConfig, VatMethod,
};
pub use registry::PatternRegistry;
pub use schemas::{CLEANED_SCHEMA, IMPORT_SCHEMA, SALES_SCHEMA};
