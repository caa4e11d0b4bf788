//! Regulatory annotation flags (`Adnotacje`).
//!
//! Each flag is a closed two-valued vocabulary. The meaning of `1`/`2`
//! differs per flag: most are yes/no, `P_16` is on-payment/regular.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{KsefError, ValidationError};

macro_rules! annotation_flag {
    (
        $(#[$meta:meta])*
        $name:ident => $element:literal, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $code)] $variant, )+
        }

        impl $name {
            /// FA (1) element carrying this flag.
            pub const ELEMENT: &'static str = $element;

            /// Code written as the element text.
            pub fn code(&self) -> &'static str {
                match self {
                    $( Self::$variant => $code, )+
                }
            }

            /// Parse from the element code.
            pub fn from_code(code: &str) -> Result<Self, KsefError> {
                match code {
                    $( $code => Ok(Self::$variant), )+
                    other => Err(KsefError::InvalidFieldValue(vec![ValidationError::with_element(
                        concat!("invoice_data.invoice_annotations.", $field),
                        format!("unknown code '{other}'"),
                        $element,
                    )])),
                }
            }
        }

        impl FromStr for $name {
            type Err = KsefError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_code(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

annotation_flag! {
    /// P_16 — cash accounting method (metoda kasowa).
    TaxSettlementOnPayment => "P_16", "tax_settlement_on_payment" {
        /// 1 — tax settled on payment.
        OnPayment = "1",
        /// 2 — regular settlement.
        Regular = "2",
    }
}

annotation_flag! {
    /// P_17 — self-invoicing (samofakturowanie).
    SelfInvoicing => "P_17", "self_invoice" {
        Yes = "1",
        No = "2",
    }
}

annotation_flag! {
    /// P_18 — reverse charge (odwrotne obciążenie).
    ReverseCharge => "P_18", "reverse_charge" {
        Yes = "1",
        No = "2",
    }
}

annotation_flag! {
    /// P_18A — split payment mechanism (mechanizm podzielonej płatności).
    SplitPayment => "P_18A", "split_payment" {
        Yes = "1",
        No = "2",
    }
}

annotation_flag! {
    /// P_19 — supply exempt from VAT (zwolnienie z VAT).
    FreeFromVat => "P_19", "free_from_vat" {
        Yes = "1",
        No = "2",
    }
}

annotation_flag! {
    /// P_22 — intra-community supply of new means of transport.
    IntraCommunitySupplyOfNewTransportMethods => "P_22", "intra_community_supply_of_new_transport_methods" {
        Yes = "1",
        No = "2",
    }
}

annotation_flag! {
    /// P_23 — simplified procedure invoked by the second taxpayer in a triangular transaction.
    SimplifiedProcedureBySecondTaxPayer => "P_23", "simplified_procedure_by_second_tax_payer" {
        Yes = "1",
        No = "2",
    }
}

annotation_flag! {
    /// P_PMarzy — margin procedure marker.
    MarginProcedure => "P_PMarzy", "margin_procedure" {
        Yes = "1",
        No = "2",
    }
}

/// Invoice annotations (`Adnotacje`). All eight flags are mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvoiceAnnotations {
    pub tax_settlement_on_payment: TaxSettlementOnPayment,
    pub self_invoice: SelfInvoicing,
    pub reverse_charge: ReverseCharge,
    pub split_payment: SplitPayment,
    pub free_from_vat: FreeFromVat,
    pub intra_community_supply_of_new_transport_methods: IntraCommunitySupplyOfNewTransportMethods,
    pub simplified_procedure_by_second_tax_payer: SimplifiedProcedureBySecondTaxPayer,
    pub margin_procedure: MarginProcedure,
}

impl InvoiceAnnotations {
    /// Annotations of a plain domestic invoice: regular settlement, every other flag "no".
    pub fn regular() -> Self {
        Self {
            tax_settlement_on_payment: TaxSettlementOnPayment::Regular,
            self_invoice: SelfInvoicing::No,
            reverse_charge: ReverseCharge::No,
            split_payment: SplitPayment::No,
            free_from_vat: FreeFromVat::No,
            intra_community_supply_of_new_transport_methods:
                IntraCommunitySupplyOfNewTransportMethods::No,
            simplified_procedure_by_second_tax_payer: SimplifiedProcedureBySecondTaxPayer::No,
            margin_procedure: MarginProcedure::No,
        }
    }

    /// `(element, code)` pairs in schema order.
    pub fn elements(&self) -> [(&'static str, &'static str); 8] {
        [
            (TaxSettlementOnPayment::ELEMENT, self.tax_settlement_on_payment.code()),
            (SelfInvoicing::ELEMENT, self.self_invoice.code()),
            (ReverseCharge::ELEMENT, self.reverse_charge.code()),
            (SplitPayment::ELEMENT, self.split_payment.code()),
            (FreeFromVat::ELEMENT, self.free_from_vat.code()),
            (
                IntraCommunitySupplyOfNewTransportMethods::ELEMENT,
                self.intra_community_supply_of_new_transport_methods.code(),
            ),
            (
                SimplifiedProcedureBySecondTaxPayer::ELEMENT,
                self.simplified_procedure_by_second_tax_payer.code(),
            ),
            (MarginProcedure::ELEMENT, self.margin_procedure.code()),
        ]
    }
}
