//! # ksef
//!
//! Client library for KSeF, the Polish national e-invoicing system: a typed
//! FA (1) invoice model, its XML encoding, and an async client for the
//! session handshake and invoice metadata queries.
//!
//! Amounts use [`rust_decimal::Decimal`] and are written with the scale they
//! were given. Model types are validated when built, so any [`Invoice`]
//! value can be encoded.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use ksef::core::*;
//! use rust_decimal_macros::dec;
//!
//! let issuer = IssuerBuilder::new(
//!     IssuerIdentificationData::new("1111111111", "Example Company 1 Sp z o. o.").unwrap(),
//!     AddressBuilder::new("PL", "Warszawa", "Kwiatowa", "1", "00-001")
//!         .apartment_number("2")
//!         .build()
//!         .unwrap(),
//! )
//! .email("example@example.com")
//! .phone("+48 111111111")
//! .build()
//! .unwrap();
//!
//! let data = InvoiceDataBuilder::new("FA/1/2024", NaiveDate::from_ymd_opt(2024, 1, 22).unwrap())
//!     .sell_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
//!     .total_amount(dec!(450.00))
//!     .annotations(InvoiceAnnotations::regular())
//!     .invoice_type(InvoiceType::RegularVat)
//!     .add_row(InvoiceRow::new("Example service 1", 23).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let invoice = InvoiceBuilder::new()
//!     .issuer(issuer)
//!     .recipient(Subject::from_nip("2222222222").unwrap())
//!     .invoice_data(data)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(invoice.invoice_data().invoice_rows().len(), 1);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice model, builders, validation, NIP checks |
//! | `xml` | FA (1) encoder and session request document |
//! | `client` | Async KSeF API client |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "xml")]
pub mod xml;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "core")]
pub use crate::core::*;
