use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::annotations::InvoiceAnnotations;
use super::error::{KsefError, ValidationError};
use super::types::*;
use super::validation;

/// Builder for constructing valid invoices.
///
/// ```
/// use chrono::NaiveDate;
/// use ksef::core::*;
/// use rust_decimal::Decimal;
///
/// let issuer = IssuerBuilder::new(
///     IssuerIdentificationData::new("1111111111", "Example Company 1 Sp. z o.o.").unwrap(),
///     AddressBuilder::new("PL", "Warszawa", "Kwiatowa", "1", "00-001").build().unwrap(),
/// )
/// .email("example@example.com")
/// .phone("+48 111111111")
/// .build()
/// .unwrap();
///
/// let data = InvoiceDataBuilder::new("FA/1/2024", NaiveDate::from_ymd_opt(2024, 1, 22).unwrap())
///     .sell_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
///     .total_amount(Decimal::new(45000, 2))
///     .annotations(InvoiceAnnotations::regular())
///     .invoice_type(InvoiceType::RegularVat)
///     .add_row(InvoiceRow::new("Example service 1", 23).unwrap())
///     .build()
///     .unwrap();
///
/// let invoice = InvoiceBuilder::new()
///     .issuer(issuer)
///     .recipient(Subject::from_nip("2222222222").unwrap())
///     .invoice_data(data)
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.invoice_data().total_amount().to_string(), "450.00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoiceBuilder {
    issuer: Option<Issuer>,
    recipient: Option<Subject>,
    invoice_data: Option<InvoiceData>,
}

impl InvoiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issuer(mut self, issuer: Issuer) -> Self {
        self.issuer = Some(issuer);
        self
    }

    pub fn recipient(mut self, recipient: Subject) -> Self {
        self.recipient = Some(recipient);
        self
    }

    pub fn invoice_data(mut self, data: InvoiceData) -> Self {
        self.invoice_data = Some(data);
        self
    }

    /// Build the invoice, running the full validation.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, KsefError> {
        let mut missing = Vec::new();
        require(&self.issuer, "issuer", Some("Podmiot1"), &mut missing);
        require(&self.recipient, "recipient", Some("Podmiot2"), &mut missing);
        require(&self.invoice_data, "invoice_data", Some("Fa"), &mut missing);

        let (Some(issuer), Some(recipient), Some(invoice_data)) =
            (self.issuer, self.recipient, self.invoice_data)
        else {
            return Err(KsefError::InvalidFieldValue(missing));
        };

        let invoice = Invoice {
            issuer,
            recipient,
            invoice_data,
        };
        let errors = validation::validate_invoice(&invoice);
        validation::into_result(invoice, errors)
    }
}

/// Builder for the issuer (Podmiot1).
#[derive(Debug, Clone)]
pub struct IssuerBuilder {
    identification_data: IssuerIdentificationData,
    address: Address,
    email: Option<String>,
    phone: Option<String>,
}

impl IssuerBuilder {
    pub fn new(identification_data: IssuerIdentificationData, address: Address) -> Self {
        Self {
            identification_data,
            address,
            email: None,
            phone: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Email and phone are required.
    pub fn build(self) -> Result<Issuer, KsefError> {
        let mut missing = Vec::new();
        require(&self.email, "issuer.email", None, &mut missing);
        require(&self.phone, "issuer.phone", None, &mut missing);

        let (Some(email), Some(phone)) = (self.email, self.phone) else {
            return Err(KsefError::InvalidFieldValue(missing));
        };

        let issuer = Issuer {
            identification_data: self.identification_data,
            address: self.address,
            email,
            phone,
        };
        let mut errors = Vec::new();
        validation::validate_issuer(&issuer, "issuer", &mut errors);
        validation::into_result(issuer, errors)
    }
}

/// Builder for a Polish address (TAdresPolski).
#[derive(Debug, Clone)]
pub struct AddressBuilder {
    country_code: String,
    city: String,
    street: String,
    house_number: String,
    apartment_number: Option<String>,
    postal_code: String,
}

impl AddressBuilder {
    pub fn new(
        country_code: impl Into<String>,
        city: impl Into<String>,
        street: impl Into<String>,
        house_number: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Self {
        Self {
            country_code: country_code.into(),
            city: city.into(),
            street: street.into(),
            house_number: house_number.into(),
            apartment_number: None,
            postal_code: postal_code.into(),
        }
    }

    pub fn apartment_number(mut self, number: impl Into<String>) -> Self {
        self.apartment_number = Some(number.into());
        self
    }

    pub fn build(self) -> Result<Address, KsefError> {
        let address = Address {
            country_code: self.country_code,
            city: self.city,
            street: self.street,
            house_number: self.house_number,
            apartment_number: self.apartment_number,
            postal_code: self.postal_code,
        };
        let mut errors = Vec::new();
        validation::validate_address(&address, "issuer.address", &mut errors);
        validation::into_result(address, errors)
    }
}

/// Builder for the invoice data block (Fa).
///
/// Currency defaults to PLN. Every other field is required; annotations
/// have no default.
#[derive(Debug, Clone)]
pub struct InvoiceDataBuilder {
    currency_code: String,
    issue_date: NaiveDate,
    issue_number: String,
    sell_date: Option<NaiveDate>,
    total_amount: Option<Decimal>,
    invoice_annotations: Option<InvoiceAnnotations>,
    invoice_type: Option<InvoiceType>,
    rows: Vec<InvoiceRow>,
}

impl InvoiceDataBuilder {
    pub fn new(issue_number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            currency_code: "PLN".to_string(),
            issue_date,
            issue_number: issue_number.into(),
            sell_date: None,
            total_amount: None,
            invoice_annotations: None,
            invoice_type: None,
            rows: Vec::new(),
        }
    }

    pub fn currency(mut self, code: impl Into<String>) -> Self {
        self.currency_code = code.into();
        self
    }

    pub fn sell_date(mut self, date: NaiveDate) -> Self {
        self.sell_date = Some(date);
        self
    }

    pub fn total_amount(mut self, amount: Decimal) -> Self {
        self.total_amount = Some(amount);
        self
    }

    pub fn annotations(mut self, annotations: InvoiceAnnotations) -> Self {
        self.invoice_annotations = Some(annotations);
        self
    }

    pub fn invoice_type(mut self, invoice_type: InvoiceType) -> Self {
        self.invoice_type = Some(invoice_type);
        self
    }

    pub fn add_row(mut self, row: InvoiceRow) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = InvoiceRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(self) -> Result<InvoiceData, KsefError> {
        let mut missing = Vec::new();
        require(&self.sell_date, "invoice_data.sell_date", Some("P_6"), &mut missing);
        require(&self.total_amount, "invoice_data.total_amount", Some("P_15"), &mut missing);
        require(
            &self.invoice_annotations,
            "invoice_data.invoice_annotations",
            Some("Adnotacje"),
            &mut missing,
        );
        require(
            &self.invoice_type,
            "invoice_data.invoice_type",
            Some("RodzajFaktury"),
            &mut missing,
        );

        let (Some(sell_date), Some(total_amount), Some(invoice_annotations), Some(invoice_type)) = (
            self.sell_date,
            self.total_amount,
            self.invoice_annotations,
            self.invoice_type,
        ) else {
            return Err(KsefError::InvalidFieldValue(missing));
        };

        let data = InvoiceData {
            currency_code: self.currency_code,
            issue_date: self.issue_date,
            issue_number: self.issue_number,
            sell_date,
            total_amount,
            invoice_annotations,
            invoice_type,
            invoice_rows: InvoiceRows { rows: self.rows },
        };
        let mut errors = Vec::new();
        validation::validate_invoice_data(&data, "invoice_data", &mut errors);
        validation::into_result(data, errors)
    }
}

fn require<T>(
    value: &Option<T>,
    field: &str,
    element: Option<&str>,
    errors: &mut Vec<ValidationError>,
) {
    if value.is_none() {
        errors.push(match element {
            Some(element) => ValidationError::with_element(field, "is required", element),
            None => ValidationError::new(field, "is required"),
        });
    }
}
