//! Business transforms: grouping, VAT back-calculation and row generation
//! for the fixed accounting import schemas.

pub mod group;
pub mod import_rows;
pub mod money;
pub mod sales;
pub mod vat;

pub use group::{TransactionGroup, group_by_date};
pub use import_rows::{borderou_rows, cardcec_rows};
pub use money::{format_money, round_money};
pub use sales::sales_rows;
pub use vat::{RatePortion, VatSplit, allocate_rates, standard_split};
