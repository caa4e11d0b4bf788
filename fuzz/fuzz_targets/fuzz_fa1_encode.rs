#![no_main]

use chrono::NaiveDate;
use ksef::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut parts = s.split('\u{1f}');
    let name = parts.next().unwrap_or_default();
    let city = parts.next().unwrap_or_default();
    let number = parts.next().unwrap_or_default();
    let tax = data.first().copied().map(u32::from).unwrap_or_default();

    let Ok(row) = InvoiceRow::new(name, tax) else {
        return;
    };
    let Ok(address) = AddressBuilder::new("PL", city, "Kwiatowa", "1", "00-001").build() else {
        return;
    };
    let Ok(identification) = IssuerIdentificationData::new("1111111111", name) else {
        return;
    };
    let Ok(issuer) = IssuerBuilder::new(identification, address)
        .email("fuzz@example.com")
        .phone("+48 111111111")
        .build()
    else {
        return;
    };
    let date = NaiveDate::from_ymd_opt(2024, 1, 22).unwrap();
    let Ok(invoice_data) = InvoiceDataBuilder::new(number, date)
        .sell_date(date)
        .total_amount(rust_decimal::Decimal::new(45000, 2))
        .annotations(InvoiceAnnotations::regular())
        .invoice_type(InvoiceType::RegularVat)
        .add_row(row)
        .build()
    else {
        return;
    };
    let Ok(invoice) = InvoiceBuilder::new()
        .issuer(issuer)
        .recipient(Subject::from_nip("2222222222").unwrap())
        .invoice_data(invoice_data)
        .build()
    else {
        return;
    };

    // A validated invoice always encodes to well-formed XML.
    let document = ksef::xml::to_fa1_xml(&invoice).unwrap();
    // The reader below does not check characters.
    assert!(
        document
            .iter()
            .all(|b| *b >= 0x20 || matches!(b, b'\t' | b'\n' | b'\r')),
        "control byte in encoded document"
    );
    let mut reader = quick_xml::Reader::from_reader(document.as_slice());
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Eof) => break,
            Ok(_) => buf.clear(),
            Err(e) => panic!("encoder produced malformed XML: {e}"),
        }
    }
});
