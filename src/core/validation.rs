use super::countries::is_known_country_code;
use super::currencies::is_known_currency_code;
use super::error::{KsefError, ValidationError};
use super::nip::validate_nip;
use super::types::*;

/// TZnakowy512: full names and row names.
pub const MAX_NAME_LEN: usize = 512;
/// TZnakowy: invoice number, city, street, email.
pub const MAX_TEXT_LEN: usize = 256;
/// NrDomu / NrLokalu.
pub const MAX_BUILDING_NUMBER_LEN: usize = 9;
/// KodPocztowy.
pub const MAX_POSTAL_CODE_LEN: usize = 8;
/// Phone number.
pub const MAX_PHONE_LEN: usize = 16;
/// Upper bound on invoice rows.
pub const MAX_ROWS: usize = 10_000;
/// Tax rates are whole percentages.
pub const MAX_TAX_RATE: u32 = 100;
/// TKwotowy allows at most two fraction digits.
pub const MAX_AMOUNT_SCALE: u32 = 2;

/// Validate a complete invoice.
/// Returns all validation errors found (not just the first).
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    validate_issuer(&invoice.issuer, "issuer", &mut errors);
    validate_nip_field(
        &invoice.recipient.identification_data.nip,
        "recipient.identification_data.nip",
        &mut errors,
    );
    validate_invoice_data(&invoice.invoice_data, "invoice_data", &mut errors);
    errors
}

pub(crate) fn into_result<T>(value: T, errors: Vec<ValidationError>) -> Result<T, KsefError> {
    if errors.is_empty() {
        Ok(value)
    } else {
        Err(KsefError::InvalidFieldValue(errors))
    }
}

pub(crate) fn validate_nip_field(nip: &str, field: &str, errors: &mut Vec<ValidationError>) {
    if let Err(e) = validate_nip(nip) {
        errors.push(ValidationError::with_element(
            field,
            format!("invalid NIP '{nip}': {e}"),
            "NIP",
        ));
    }
}

pub(crate) fn validate_issuer_identification(
    data: &IssuerIdentificationData,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    validate_nip_field(&data.nip, &format!("{path}.nip"), errors);
    require_text(
        &data.full_name,
        &format!("{path}.full_name"),
        Some("PelnaNazwa"),
        MAX_NAME_LEN,
        errors,
    );
}

pub(crate) fn validate_address(address: &Address, path: &str, errors: &mut Vec<ValidationError>) {
    let field = |name: &str| format!("{path}.{name}");

    if address.country_code.trim().is_empty() {
        errors.push(ValidationError::with_element(
            field("country_code"),
            "country code must not be empty",
            "KodKraju",
        ));
    } else if !is_known_country_code(&address.country_code) {
        errors.push(ValidationError::with_element(
            field("country_code"),
            format!(
                "'{}' is not an ISO 3166-1 alpha-2 country code",
                address.country_code
            ),
            "KodKraju",
        ));
    }

    require_text(&address.city, &field("city"), Some("Miejscowosc"), MAX_TEXT_LEN, errors);
    require_text(&address.street, &field("street"), Some("Ulica"), MAX_TEXT_LEN, errors);
    require_text(
        &address.house_number,
        &field("house_number"),
        Some("NrDomu"),
        MAX_BUILDING_NUMBER_LEN,
        errors,
    );
    if let Some(apartment) = &address.apartment_number {
        require_text(
            apartment,
            &field("apartment_number"),
            Some("NrLokalu"),
            MAX_BUILDING_NUMBER_LEN,
            errors,
        );
    }
    require_text(
        &address.postal_code,
        &field("postal_code"),
        Some("KodPocztowy"),
        MAX_POSTAL_CODE_LEN,
        errors,
    );
}

pub(crate) fn validate_issuer(issuer: &Issuer, path: &str, errors: &mut Vec<ValidationError>) {
    validate_issuer_identification(
        &issuer.identification_data,
        &format!("{path}.identification_data"),
        errors,
    );
    validate_address(&issuer.address, &format!("{path}.address"), errors);

    let email_field = format!("{path}.email");
    let before = errors.len();
    require_text(&issuer.email, &email_field, None, MAX_TEXT_LEN, errors);
    if errors.len() == before && !looks_like_email(&issuer.email) {
        errors.push(ValidationError::new(
            email_field,
            format!("'{}' is not an email address", issuer.email),
        ));
    }

    require_text(&issuer.phone, &format!("{path}.phone"), None, MAX_PHONE_LEN, errors);
}

pub(crate) fn validate_row(row: &InvoiceRow, path: &str, errors: &mut Vec<ValidationError>) {
    require_text(&row.name, &format!("{path}.name"), Some("P_7"), MAX_NAME_LEN, errors);
    if row.tax > MAX_TAX_RATE {
        errors.push(ValidationError::with_element(
            format!("{path}.tax"),
            format!("tax rate {}% exceeds {MAX_TAX_RATE}%", row.tax),
            "P_12",
        ));
    }
}

pub(crate) fn validate_rows(rows: &InvoiceRows, path: &str, errors: &mut Vec<ValidationError>) {
    if rows.rows.is_empty() {
        errors.push(ValidationError::with_element(
            format!("{path}.rows"),
            "invoice must have at least one row",
            "FaWiersze",
        ));
    }
    if rows.rows.len() > MAX_ROWS {
        errors.push(ValidationError::with_element(
            format!("{path}.rows"),
            format!("invoice cannot have more than {MAX_ROWS} rows"),
            "FaWiersze",
        ));
    }
    for (i, row) in rows.rows.iter().enumerate() {
        validate_row(row, &format!("{path}.rows[{i}]"), errors);
    }
}

pub(crate) fn validate_invoice_data(
    data: &InvoiceData,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    let currency_field = format!("{path}.currency_code");
    if data.currency_code.len() != 3 {
        errors.push(ValidationError::with_element(
            currency_field,
            "currency code must be 3 characters (ISO 4217)",
            "KodWaluty",
        ));
    } else if !is_known_currency_code(&data.currency_code) {
        errors.push(ValidationError::with_element(
            currency_field,
            format!(
                "currency code '{}' is not a known ISO 4217 code",
                data.currency_code
            ),
            "KodWaluty",
        ));
    }

    require_text(
        &data.issue_number,
        &format!("{path}.issue_number"),
        Some("P_2"),
        MAX_TEXT_LEN,
        errors,
    );

    if data.total_amount.scale() > MAX_AMOUNT_SCALE {
        errors.push(ValidationError::with_element(
            format!("{path}.total_amount"),
            format!(
                "amount {} has more than {MAX_AMOUNT_SCALE} decimal places",
                data.total_amount
            ),
            "P_15",
        ));
    }

    validate_rows(&data.invoice_rows, &format!("{path}.invoice_rows"), errors);
}

fn require_text(
    value: &str,
    field: &str,
    element: Option<&str>,
    max_len: usize,
    errors: &mut Vec<ValidationError>,
) {
    let message = if value.trim().is_empty() {
        "must not be empty".to_string()
    } else if value.chars().count() > max_len {
        format!("must not exceed {max_len} characters")
    } else if let Some(c) = value.chars().find(|c| !is_xml_char(*c)) {
        format!("contains U+{:04X}, which XML does not allow", u32::from(c))
    } else {
        return;
    };

    errors.push(match element {
        Some(element) => ValidationError::with_element(field, message, element),
        None => ValidationError::new(field, message),
    });
}

/// The XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !value.contains(' ')
        }
        None => false,
    }
}
