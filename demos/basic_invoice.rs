use chrono::NaiveDate;
use ksef::core::*;
use rust_decimal_macros::dec;

fn main() {
    let issuer = IssuerBuilder::new(
        IssuerIdentificationData::new("1111111111", "Example Company 1 Sp z o. o.")
            .expect("issuer NIP should be valid"),
        AddressBuilder::new("PL", "Warszawa", "Kwiatowa", "1", "00-001")
            .apartment_number("2")
            .build()
            .expect("address should be valid"),
    )
    .email("example@example.com")
    .phone("+48 111111111")
    .build()
    .expect("issuer should be valid");

    let data = InvoiceDataBuilder::new("FA/1/2024", NaiveDate::from_ymd_opt(2024, 1, 22).unwrap())
        .sell_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        .total_amount(dec!(450.00))
        .annotations(InvoiceAnnotations::regular())
        .invoice_type(InvoiceType::RegularVat)
        .add_row(InvoiceRow::new("Example service 1", 23).unwrap())
        .add_row(InvoiceRow::new("Example service 2", 8).unwrap())
        .build()
        .expect("invoice data should be valid");

    let invoice = InvoiceBuilder::new()
        .issuer(issuer)
        .recipient(Subject::from_nip("2222222222").unwrap())
        .invoice_data(data)
        .build()
        .expect("invoice should be valid");

    // Invalid input is rejected with every problem listed
    let err = InvoiceRow::new("", 123).unwrap_err();
    for e in err.validation_errors() {
        eprintln!("rejected: {e}");
    }

    let document = ksef::xml::to_fa1_xml(&invoice).expect("a valid invoice always encodes");
    println!("{}", String::from_utf8_lossy(&document));
}
