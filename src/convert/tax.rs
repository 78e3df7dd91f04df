//! IGST / CGST / SGST split.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::core::Gstr1Error;
use crate::core::amount::round2;

/// Tax components of one line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaxSplit {
    pub igst: Decimal,
    pub cgst: Decimal,
    pub sgst: Decimal,
}

impl TaxSplit {
    pub fn is_zero(&self) -> bool {
        self.igst.is_zero() && self.cgst.is_zero() && self.sgst.is_zero()
    }
}

/// Derive the tax split from taxable value and rate.
///
/// An intra-state supply (supplier state equals place of supply) splits the
/// tax evenly into CGST and SGST. Anything else is inter-state and carries
/// the full amount as IGST. Amounts are rounded to two decimals.
///
/// Fails with [`Gstr1Error::Arithmetic`] when the tax does not fit in a
/// [`Decimal`].
pub fn calculate_taxes(
    taxable_value: Decimal,
    rate: Decimal,
    supplier_state: &str,
    pos_state: &str,
) -> Result<TaxSplit, Gstr1Error> {
    let total = taxable_value
        .checked_mul(rate)
        .and_then(|product| product.checked_div(dec!(100)))
        .ok_or_else(|| {
            Gstr1Error::Arithmetic(format!(
                "tax on taxable value {taxable_value} at rate {rate} overflows"
            ))
        })?;

    Ok(if supplier_state == pos_state {
        let half = round2(total / dec!(2));
        TaxSplit {
            igst: Decimal::ZERO,
            cgst: half,
            sgst: half,
        }
    } else {
        TaxSplit {
            igst: round2(total),
            cgst: Decimal::ZERO,
            sgst: Decimal::ZERO,
        }
    })
}

/// Use the supplied amounts unless all three are zero, in which case they
/// are calculated. Supplied amounts are not checked against the rate.
pub fn resolve_taxes(
    supplied: TaxSplit,
    taxable_value: Decimal,
    rate: Decimal,
    supplier_state: &str,
    pos_state: &str,
) -> Result<TaxSplit, Gstr1Error> {
    if supplied.is_zero() {
        calculate_taxes(taxable_value, rate, supplier_state, pos_state)
    } else {
        Ok(supplied)
    }
}
