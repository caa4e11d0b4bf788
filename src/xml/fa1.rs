use super::xml_utils::{XmlResult, XmlWriter};
use super::{FORM_CODE, FORM_SCHEMA_VERSION, FORM_SYSTEM_CODE, FORM_VARIANT, fa1_ns};
use crate::core::*;

/// `SystemInfo` written when the caller does not name its software.
pub const DEFAULT_SYSTEM_INFO: &str = "ksef-rs";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Generate an FA (1) invoice document, identifying the software as
/// [`DEFAULT_SYSTEM_INFO`].
pub fn to_fa1_xml(invoice: &Invoice) -> XmlResult {
    to_fa1_xml_with_system_info(invoice, DEFAULT_SYSTEM_INFO)
}

/// Generate an FA (1) invoice document with a custom `SystemInfo`.
///
/// Output is deterministic: the same invoice always yields the same bytes.
/// Rows are numbered 1..N in sequence order.
pub fn to_fa1_xml_with_system_info(invoice: &Invoice, system_info: &str) -> XmlResult {
    let mut w = XmlWriter::new()?;

    w.start_element_with_attrs(
        "Faktura",
        &[
            ("xmlns", fa1_ns::FA),
            ("xmlns:xsi", fa1_ns::XSI),
            ("xmlns:tns", fa1_ns::FA),
            ("xsi:schemaLocation", fa1_ns::SCHEMA_LOCATION),
        ],
    )?;

    write_header(&mut w, system_info)?;
    write_issuer(&mut w, invoice.issuer())?;
    write_recipient(&mut w, invoice.recipient())?;
    write_invoice_data(&mut w, invoice.invoice_data())?;

    w.end_element("Faktura")?;

    let bytes = w.into_bytes();
    tracing::debug!(
        invoice_number = invoice.invoice_data().issue_number(),
        rows = invoice.invoice_data().invoice_rows().len(),
        bytes = bytes.len(),
        "encoded FA (1) invoice"
    );
    Ok(bytes)
}

fn write_header(w: &mut XmlWriter, system_info: &str) -> Result<(), KsefError> {
    w.start_element("Naglowek")?;
    w.text_element_with_attrs(
        "KodFormularza",
        FORM_CODE,
        &[
            ("kodSystemowy", FORM_SYSTEM_CODE),
            ("wersjaSchemy", FORM_SCHEMA_VERSION),
        ],
    )?;
    w.text_element("WariantFormularza", FORM_VARIANT)?;
    w.text_element("SystemInfo", system_info)?;
    w.end_element("Naglowek")?;
    Ok(())
}

fn write_issuer(w: &mut XmlWriter, issuer: &Issuer) -> Result<(), KsefError> {
    let id = issuer.identification_data();
    let address = issuer.address();

    w.start_element("Podmiot1")?;

    w.start_element("DaneIdentyfikacyjne")?;
    w.text_element("NIP", id.nip())?;
    w.text_element("PelnaNazwa", id.full_name())?;
    w.end_element("DaneIdentyfikacyjne")?;

    w.start_element_with_attrs("Adres", &[("xsi:type", "tns:TAdresPolski")])?;
    w.text_element("KodKraju", address.country_code())?;
    w.text_element("Miejscowosc", address.city())?;
    w.text_element("Ulica", address.street())?;
    w.text_element("NrDomu", address.house_number())?;
    // The receiving side expects the element even without an apartment.
    w.optional_text_element("NrLokalu", address.apartment_number())?;
    w.text_element("KodPocztowy", address.postal_code())?;
    w.end_element("Adres")?;

    w.end_element("Podmiot1")?;
    Ok(())
}

fn write_recipient(w: &mut XmlWriter, recipient: &Subject) -> Result<(), KsefError> {
    w.start_element("Podmiot2")?;
    w.start_element("DaneIdentyfikacyjne")?;
    w.text_element("NIP", recipient.identification_data().nip())?;
    w.end_element("DaneIdentyfikacyjne")?;
    w.end_element("Podmiot2")?;
    Ok(())
}

fn write_invoice_data(w: &mut XmlWriter, data: &InvoiceData) -> Result<(), KsefError> {
    w.start_element("Fa")?;

    w.text_element("KodWaluty", data.currency_code())?;
    w.text_element("P_1", &data.issue_date().format(DATE_FORMAT).to_string())?;
    w.text_element("P_2", data.issue_number())?;
    w.text_element("P_6", &data.sell_date().format(DATE_FORMAT).to_string())?;
    // Decimal's Display keeps the scale as entered: 450.00 stays "450.00".
    w.text_element("P_15", &data.total_amount().to_string())?;

    w.start_element("Adnotacje")?;
    for (element, code) in data.invoice_annotations().elements() {
        w.text_element(element, code)?;
    }
    w.end_element("Adnotacje")?;

    w.text_element("RodzajFaktury", data.invoice_type().code())?;

    write_rows(w, data.invoice_rows())?;

    w.end_element("Fa")?;
    Ok(())
}

fn write_rows(w: &mut XmlWriter, rows: &InvoiceRows) -> Result<(), KsefError> {
    w.start_element("FaWiersze")?;
    w.text_element("LiczbaWierszyFaktury", &rows.len().to_string())?;
    for (number, row) in rows.numbered() {
        w.start_element("FaWiersz")?;
        w.text_element("NrWierszaFa", &number.to_string())?;
        w.text_element("P_7", row.name())?;
        w.text_element("P_12", &row.tax().to_string())?;
        w.end_element("FaWiersz")?;
    }
    w.end_element("FaWiersze")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn invoice(apartment: Option<&str>, rows: &[(&str, u32)]) -> Invoice {
        let mut address = AddressBuilder::new("PL", "Warszawa", "Kwiatowa", "1", "00-001");
        if let Some(a) = apartment {
            address = address.apartment_number(a);
        }
        let issuer = IssuerBuilder::new(
            IssuerIdentificationData::new("1111111111", "Example Company 1 Sp z o. o.").unwrap(),
            address.build().unwrap(),
        )
        .email("example@example.com")
        .phone("+48 111111111")
        .build()
        .unwrap();

        let data = InvoiceDataBuilder::new("FA/1/2024", NaiveDate::from_ymd_opt(2024, 1, 22).unwrap())
            .sell_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .total_amount(dec!(450.00))
            .annotations(InvoiceAnnotations::regular())
            .invoice_type(InvoiceType::RegularVat)
            .rows(rows.iter().map(|(name, tax)| InvoiceRow::new(*name, *tax).unwrap()))
            .build()
            .unwrap();

        InvoiceBuilder::new()
            .issuer(issuer)
            .recipient(Subject::from_nip("2222222222").unwrap())
            .invoice_data(data)
            .build()
            .unwrap()
    }

    fn xml_string(inv: &Invoice) -> String {
        String::from_utf8(to_fa1_xml(inv).unwrap()).unwrap()
    }

    #[test]
    fn header_fixed_fields() {
        let xml = xml_string(&invoice(Some("2"), &[("A", 23)]));
        assert!(xml.contains(
            "<KodFormularza kodSystemowy=\"FA (1)\" wersjaSchemy=\"1-0E\">FA</KodFormularza>"
        ));
        assert!(xml.contains("<WariantFormularza>1</WariantFormularza>"));
        assert!(xml.contains("<SystemInfo>ksef-rs</SystemInfo>"));
    }

    #[test]
    fn custom_system_info() {
        let inv = invoice(Some("2"), &[("A", 23)]);
        let xml = String::from_utf8(to_fa1_xml_with_system_info(&inv, "Billing 3000").unwrap())
            .unwrap();
        assert!(xml.contains("<SystemInfo>Billing 3000</SystemInfo>"));
    }

    #[test]
    fn missing_apartment_number_is_empty_element() {
        let xml = xml_string(&invoice(None, &[("A", 23)]));
        assert!(xml.contains("<NrLokalu/>"));
        let xml = xml_string(&invoice(Some("2"), &[("A", 23)]));
        assert!(xml.contains("<NrLokalu>2</NrLokalu>"));
    }

    #[test]
    fn address_is_typed_polish_address() {
        let xml = xml_string(&invoice(Some("2"), &[("A", 23)]));
        assert!(xml.contains("<Adres xsi:type=\"tns:TAdresPolski\">"));
    }

    #[test]
    fn rows_numbered_by_position() {
        let xml = xml_string(&invoice(None, &[("A", 23), ("B", 8), ("C", 0)]));
        assert!(xml.contains("<LiczbaWierszyFaktury>3</LiczbaWierszyFaktury>"));
        let a = xml.find("<NrWierszaFa>1</NrWierszaFa>").unwrap();
        let b = xml.find("<NrWierszaFa>2</NrWierszaFa>").unwrap();
        let c = xml.find("<NrWierszaFa>3</NrWierszaFa>").unwrap();
        assert!(a < b && b < c);
        assert!(xml.contains("<P_12>0</P_12>"));
    }

    #[test]
    fn dates_and_amount_format() {
        let xml = xml_string(&invoice(None, &[("A", 23)]));
        assert!(xml.contains("<P_1>2024-01-22</P_1>"));
        assert!(xml.contains("<P_6>2024-01-01</P_6>"));
        assert!(xml.contains("<P_15>450.00</P_15>"));
    }
}
