//! Invoice domain model, builders, and construction-time validation.
//!
//! Every type here corresponds to a block of the FA (1) invoice schema.
//! Instances are validated when built and expose no setters, so a value
//! that exists is a value the encoder can serialize.

mod annotations;
mod builder;
mod countries;
mod currencies;
mod error;
pub mod nip;
mod types;
mod validation;

pub use annotations::*;
pub use builder::*;
pub use countries::is_known_country_code;
pub use currencies::is_known_currency_code;
pub use error::*;
pub use nip::{NipError, is_valid_nip, validate_nip};
pub use types::*;
pub use validation::{
    MAX_AMOUNT_SCALE, MAX_BUILDING_NUMBER_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, MAX_POSTAL_CODE_LEN,
    MAX_ROWS, MAX_TAX_RATE, MAX_TEXT_LEN, validate_invoice,
};
