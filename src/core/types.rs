use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::annotations::InvoiceAnnotations;
use super::error::{KsefError, ValidationError};
use super::validation;

/// TAdres: postal address of the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AddressParts")]
pub struct Address {
    pub(crate) country_code: String,
    pub(crate) city: String,
    pub(crate) street: String,
    pub(crate) house_number: String,
    pub(crate) apartment_number: Option<String>,
    pub(crate) postal_code: String,
}

impl Address {
    /// KodKraju: ISO 3166-1 alpha-2 country code.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Miejscowosc.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Ulica.
    pub fn street(&self) -> &str {
        &self.street
    }

    /// NrDomu.
    pub fn house_number(&self) -> &str {
        &self.house_number
    }

    /// NrLokalu, absent for single-unit buildings.
    pub fn apartment_number(&self) -> Option<&str> {
        self.apartment_number.as_deref()
    }

    /// KodPocztowy.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }
}

/// Identification data of the issuer (TPodmiot1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IssuerIdentificationDataParts")]
pub struct IssuerIdentificationData {
    pub(crate) nip: String,
    pub(crate) full_name: String,
}

impl IssuerIdentificationData {
    pub fn new(nip: impl Into<String>, full_name: impl Into<String>) -> Result<Self, KsefError> {
        let data = Self {
            nip: nip.into(),
            full_name: full_name.into(),
        };
        let mut errors = Vec::new();
        validation::validate_issuer_identification(&data, "issuer.identification_data", &mut errors);
        validation::into_result(data, errors)
    }

    pub fn nip(&self) -> &str {
        &self.nip
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

/// Identification data of the recipient (TPodmiot2). The recipient is identified by NIP only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubjectIdentificationDataParts")]
pub struct SubjectIdentificationData {
    pub(crate) nip: String,
}

impl SubjectIdentificationData {
    pub fn new(nip: impl Into<String>) -> Result<Self, KsefError> {
        let data = Self { nip: nip.into() };
        let mut errors = Vec::new();
        validation::validate_nip_field(&data.nip, "recipient.identification_data.nip", &mut errors);
        validation::into_result(data, errors)
    }

    pub fn nip(&self) -> &str {
        &self.nip
    }
}

/// Podmiot1: the party issuing the invoice.
///
/// Built with [`IssuerBuilder`](super::IssuerBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IssuerParts")]
pub struct Issuer {
    pub(crate) identification_data: IssuerIdentificationData,
    pub(crate) address: Address,
    pub(crate) email: String,
    pub(crate) phone: String,
}

impl Issuer {
    pub fn identification_data(&self) -> &IssuerIdentificationData {
        &self.identification_data
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Podmiot2: the invoice recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subject {
    pub(crate) identification_data: SubjectIdentificationData,
}

impl Subject {
    pub fn new(identification_data: SubjectIdentificationData) -> Self {
        Self {
            identification_data,
        }
    }

    /// Shorthand for a recipient identified by `nip`.
    pub fn from_nip(nip: impl Into<String>) -> Result<Self, KsefError> {
        SubjectIdentificationData::new(nip).map(Self::new)
    }

    pub fn identification_data(&self) -> &SubjectIdentificationData {
        &self.identification_data
    }
}

/// TRodzajFaktury: the seven regulatory invoice categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvoiceType {
    /// VAT: regular VAT invoice.
    #[serde(rename = "VAT")]
    RegularVat,
    /// KOR: correction invoice.
    #[serde(rename = "KOR")]
    Correction,
    /// ZAL: advance payment invoice.
    #[serde(rename = "ZAL")]
    Advance,
    /// ROZ: settlement invoice.
    #[serde(rename = "ROZ")]
    Settlement,
    /// UPR: simplified invoice.
    #[serde(rename = "UPR")]
    Simplified,
    /// KOR_ZAL: correction of an advance payment invoice.
    #[serde(rename = "KOR_ZAL")]
    CorrectionAdvance,
    /// KOR_ROZ: correction of a settlement invoice.
    #[serde(rename = "KOR_ROZ")]
    CorrectionSettlement,
}

impl InvoiceType {
    /// Code written to `RodzajFaktury`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::RegularVat => "VAT",
            Self::Correction => "KOR",
            Self::Advance => "ZAL",
            Self::Settlement => "ROZ",
            Self::Simplified => "UPR",
            Self::CorrectionAdvance => "KOR_ZAL",
            Self::CorrectionSettlement => "KOR_ROZ",
        }
    }

    /// Parse from the `RodzajFaktury` code.
    pub fn from_code(code: &str) -> Result<Self, KsefError> {
        match code {
            "VAT" => Ok(Self::RegularVat),
            "KOR" => Ok(Self::Correction),
            "ZAL" => Ok(Self::Advance),
            "ROZ" => Ok(Self::Settlement),
            "UPR" => Ok(Self::Simplified),
            "KOR_ZAL" => Ok(Self::CorrectionAdvance),
            "KOR_ROZ" => Ok(Self::CorrectionSettlement),
            other => Err(KsefError::InvalidFieldValue(vec![
                ValidationError::with_element(
                    "invoice_data.invoice_type",
                    format!("unknown invoice type code '{other}'"),
                    "RodzajFaktury",
                ),
            ])),
        }
    }

    /// Whether this type corrects a previously issued invoice.
    pub fn is_correction(&self) -> bool {
        matches!(
            self,
            Self::Correction | Self::CorrectionAdvance | Self::CorrectionSettlement
        )
    }
}

impl FromStr for InvoiceType {
    type Err = KsefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

impl fmt::Display for InvoiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// FaWiersz: a single invoice position.
///
/// Carries no row number; numbering follows the position in [`InvoiceRows`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceRowParts")]
pub struct InvoiceRow {
    /// P_7: name (kind) of the goods or service.
    pub(crate) name: String,
    /// P_12: tax rate percentage.
    pub(crate) tax: u32,
}

impl InvoiceRow {
    pub fn new(name: impl Into<String>, tax: u32) -> Result<Self, KsefError> {
        let row = Self {
            name: name.into(),
            tax,
        };
        let mut errors = Vec::new();
        validation::validate_row(&row, "invoice_row", &mut errors);
        validation::into_result(row, errors)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tax(&self) -> u32 {
        self.tax
    }
}

/// FaWiersze: ordered invoice positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceRowsParts")]
pub struct InvoiceRows {
    pub(crate) rows: Vec<InvoiceRow>,
}

impl InvoiceRows {
    pub fn new(rows: Vec<InvoiceRow>) -> Result<Self, KsefError> {
        let rows = Self { rows };
        let mut errors = Vec::new();
        validation::validate_rows(&rows, "invoice_data.invoice_rows", &mut errors);
        validation::into_result(rows, errors)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InvoiceRow> {
        self.rows.iter()
    }

    /// Rows paired with their 1-based position (NrWierszaFa).
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &InvoiceRow)> {
        self.rows.iter().enumerate().map(|(i, row)| (i + 1, row))
    }
}

impl<'a> IntoIterator for &'a InvoiceRows {
    type Item = &'a InvoiceRow;
    type IntoIter = std::slice::Iter<'a, InvoiceRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Fa: invoice data block.
///
/// Built with [`InvoiceDataBuilder`](super::InvoiceDataBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceDataParts")]
pub struct InvoiceData {
    pub(crate) currency_code: String,
    pub(crate) issue_date: NaiveDate,
    pub(crate) issue_number: String,
    pub(crate) sell_date: NaiveDate,
    pub(crate) total_amount: Decimal,
    pub(crate) invoice_annotations: InvoiceAnnotations,
    pub(crate) invoice_type: InvoiceType,
    pub(crate) invoice_rows: InvoiceRows,
}

impl InvoiceData {
    /// KodWaluty: ISO 4217 currency code.
    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    /// P_1: issue date.
    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    /// P_2: invoice number.
    pub fn issue_number(&self) -> &str {
        &self.issue_number
    }

    /// P_6: date of sale or service completion.
    pub fn sell_date(&self) -> NaiveDate {
        self.sell_date
    }

    /// P_15: total amount due, exactly as entered.
    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn invoice_annotations(&self) -> &InvoiceAnnotations {
        &self.invoice_annotations
    }

    pub fn invoice_type(&self) -> InvoiceType {
        self.invoice_type
    }

    pub fn invoice_rows(&self) -> &InvoiceRows {
        &self.invoice_rows
    }
}

/// Faktura: the invoice aggregate.
///
/// Only obtainable through [`InvoiceBuilder`](super::InvoiceBuilder) or
/// deserialization, both of which run the full validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceParts")]
pub struct Invoice {
    pub(crate) issuer: Issuer,
    pub(crate) recipient: Subject,
    pub(crate) invoice_data: InvoiceData,
}

impl Invoice {
    pub fn builder() -> super::InvoiceBuilder {
        super::InvoiceBuilder::new()
    }

    pub fn issuer(&self) -> &Issuer {
        &self.issuer
    }

    pub fn recipient(&self) -> &Subject {
        &self.recipient
    }

    pub fn invoice_data(&self) -> &InvoiceData {
        &self.invoice_data
    }
}

// Unchecked shapes as they arrive from external data. Each converts into its
// model type only through the same validation the constructors run.

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InvoiceParts {
    issuer: Issuer,
    recipient: Subject,
    invoice_data: InvoiceData,
}

impl TryFrom<InvoiceParts> for Invoice {
    type Error = KsefError;

    fn try_from(parts: InvoiceParts) -> Result<Self, Self::Error> {
        let invoice = Invoice {
            issuer: parts.issuer,
            recipient: parts.recipient,
            invoice_data: parts.invoice_data,
        };
        let errors = validation::validate_invoice(&invoice);
        validation::into_result(invoice, errors)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AddressParts {
    country_code: String,
    city: String,
    street: String,
    house_number: String,
    apartment_number: Option<String>,
    postal_code: String,
}

impl TryFrom<AddressParts> for Address {
    type Error = KsefError;

    fn try_from(parts: AddressParts) -> Result<Self, Self::Error> {
        let address = Address {
            country_code: parts.country_code,
            city: parts.city,
            street: parts.street,
            house_number: parts.house_number,
            apartment_number: parts.apartment_number,
            postal_code: parts.postal_code,
        };
        let mut errors = Vec::new();
        validation::validate_address(&address, "issuer.address", &mut errors);
        validation::into_result(address, errors)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct IssuerIdentificationDataParts {
    nip: String,
    full_name: String,
}

impl TryFrom<IssuerIdentificationDataParts> for IssuerIdentificationData {
    type Error = KsefError;

    fn try_from(parts: IssuerIdentificationDataParts) -> Result<Self, Self::Error> {
        Self::new(parts.nip, parts.full_name)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SubjectIdentificationDataParts {
    nip: String,
}

impl TryFrom<SubjectIdentificationDataParts> for SubjectIdentificationData {
    type Error = KsefError;

    fn try_from(parts: SubjectIdentificationDataParts) -> Result<Self, Self::Error> {
        Self::new(parts.nip)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct IssuerParts {
    identification_data: IssuerIdentificationData,
    address: Address,
    email: String,
    phone: String,
}

impl TryFrom<IssuerParts> for Issuer {
    type Error = KsefError;

    fn try_from(parts: IssuerParts) -> Result<Self, Self::Error> {
        let issuer = Issuer {
            identification_data: parts.identification_data,
            address: parts.address,
            email: parts.email,
            phone: parts.phone,
        };
        let mut errors = Vec::new();
        validation::validate_issuer(&issuer, "issuer", &mut errors);
        validation::into_result(issuer, errors)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InvoiceRowParts {
    name: String,
    tax: u32,
}

impl TryFrom<InvoiceRowParts> for InvoiceRow {
    type Error = KsefError;

    fn try_from(parts: InvoiceRowParts) -> Result<Self, Self::Error> {
        Self::new(parts.name, parts.tax)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InvoiceRowsParts {
    rows: Vec<InvoiceRow>,
}

impl TryFrom<InvoiceRowsParts> for InvoiceRows {
    type Error = KsefError;

    fn try_from(parts: InvoiceRowsParts) -> Result<Self, Self::Error> {
        Self::new(parts.rows)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InvoiceDataParts {
    currency_code: String,
    issue_date: NaiveDate,
    issue_number: String,
    sell_date: NaiveDate,
    total_amount: Decimal,
    invoice_annotations: InvoiceAnnotations,
    invoice_type: InvoiceType,
    invoice_rows: InvoiceRows,
}

impl TryFrom<InvoiceDataParts> for InvoiceData {
    type Error = KsefError;

    fn try_from(parts: InvoiceDataParts) -> Result<Self, Self::Error> {
        let data = InvoiceData {
            currency_code: parts.currency_code,
            issue_date: parts.issue_date,
            issue_number: parts.issue_number,
            sell_date: parts.sell_date,
            total_amount: parts.total_amount,
            invoice_annotations: parts.invoice_annotations,
            invoice_type: parts.invoice_type,
            invoice_rows: parts.invoice_rows,
        };
        let mut errors = Vec::new();
        validation::validate_invoice_data(&data, "invoice_data", &mut errors);
        validation::into_result(data, errors)
    }
}
