//! Row types shared by the normalizer and the loader.
//!
//! Every table in the pipeline is a flat set of rows with string-typed
//! attributes; the only non-string column is the surrogate `shortage_id`
//! assigned by the database on insert. The key-cleaning rules that gate
//! which rows survive normalization live in [`code`].

pub mod code;
pub mod ndc;
pub mod shortage;

pub use code::{clean_code, clean_soft_code};
pub use ndc::{NdcPackaging, NdcProduct};
pub use shortage::{RekeyedContact, ShortageContact, ShortageRecord};
