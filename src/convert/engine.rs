use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use super::normalize::{
    normalize_date, normalize_state_code, parse_invoice_type, parse_reverse_charge,
};
use super::tax::{TaxSplit, resolve_taxes};
use crate::core::amount::{parse_amount, round2};
use crate::core::*;
use crate::mapping::complete_mapping;

/// Item number of the first line item of every invoice.
pub const FIRST_ITEM_NUMBER: u32 = 1801;

/// Result of [`convert`]: the document built from all valid rows, and every
/// problem found along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub document: OutputDocument,
    pub errors: Vec<ValidationError>,
}

impl Conversion {
    /// Whether the document is safe to hand to the filing tool: no errors
    /// and at least one recipient.
    pub fn is_exportable(&self) -> bool {
        self.errors.is_empty() && !self.document.b2b.is_empty()
    }
}

/// Why a row was skipped.
enum RowError {
    /// A required value is missing or zero.
    Missing(LogicalField, &'static str),
    /// A number cell does not fit in an amount.
    OutOfRange(LogicalField, Gstr1Error),
    /// Normalization failed.
    General(Gstr1Error),
}

impl From<Gstr1Error> for RowError {
    fn from(err: Gstr1Error) -> Self {
        Self::General(err)
    }
}

/// One normalized B2B line, ready to be merged into the document.
struct B2bLine {
    ctin: String,
    inum: String,
    idt: String,
    val: Decimal,
    pos: String,
    rchrg: ReverseCharge,
    inv_typ: InvoiceType,
    details: ItemDetails,
}

/// Convert parsed rows into a GSTR-1 B2B document.
///
/// If a required field is unmapped, the headers are scanned once more for
/// it. When that still fails, one error per missing field is returned with
/// an empty document and no row is processed.
///
/// Otherwise every row is processed in order. Rows with missing values are
/// reported and skipped; the rest are grouped by recipient GSTIN and merged
/// into invoices by (number, date). Rows without a recipient GSTIN (B2C) are
/// dropped silently.
///
/// ```
/// use gstr1::{ColumnMapping, FilingMeta, LogicalField, ParsedTable};
/// use gstr1::convert::convert;
///
/// let table = ParsedTable::new(
///     ["Invoice Number", "Invoice Date", "Invoice Value", "GSTIN of Recipient",
///      "Place of Supply", "Taxable Value", "Rate"]
///         .map(String::from).to_vec(),
///     vec![["INV-1", "01/04/2024", "1180", "29ABCDE1234F1Z5", "29", "1000", "18"]
///         .map(String::from).to_vec()],
/// );
/// let meta = FilingMeta::new("27ABCDE1234F1Z5", "042024");
///
/// let result = convert(&table, &ColumnMapping::new(), &meta);
/// assert!(result.errors.is_empty());
/// let item = &result.document.b2b[0].inv[0].itms[0];
/// assert_eq!(item.num, 1801);
/// assert_eq!(item.itm_det.igst, Some(rust_decimal::Decimal::from(180)));
/// ```
pub fn convert(table: &ParsedTable, mapping: &ColumnMapping, meta: &FilingMeta) -> Conversion {
    let mut mapping = mapping.clone();
    if !mapping.missing_required().is_empty() {
        let filled = complete_mapping(&mut mapping, &table.headers);
        debug!(?filled, "filled unmapped fields from headers");
    }

    let missing = mapping.missing_required();
    if !missing.is_empty() {
        warn!(?missing, "required fields unmapped, conversion aborted");
        let available = table.headers.join(", ");
        let errors = missing
            .into_iter()
            .map(|field| {
                ValidationError::global(
                    field.key(),
                    format!(
                        "Required field \"{field}\" is not mapped to any column. Available headers: {available}"
                    ),
                )
            })
            .collect();
        return Conversion {
            document: OutputDocument::empty(meta),
            errors,
        };
    }

    let supplier_state = meta.supplier_state();
    let mut groups: IndexMap<String, B2bGroup> = IndexMap::new();
    let mut errors = Vec::new();

    for (i, row) in table.rows.iter().enumerate() {
        let row_num = i + 2;
        match read_row(row, &mapping, supplier_state) {
            Ok(Some(line)) => merge_line(&mut groups, line),
            Ok(None) => trace!(row = row_num, "no recipient GSTIN, row dropped"),
            Err(RowError::Missing(field, message)) => {
                debug!(row = row_num, %field, "row skipped");
                errors.push(ValidationError::new(row_num, field.key(), message));
            }
            Err(RowError::OutOfRange(field, err)) => {
                debug!(row = row_num, %field, error = %err, "row skipped");
                errors.push(ValidationError::new(row_num, field.key(), err.to_string()));
            }
            Err(RowError::General(err)) => {
                debug!(row = row_num, error = %err, "row failed");
                errors.push(ValidationError::new(row_num, "general", err.to_string()));
            }
        }
    }

    let mut document = OutputDocument::empty(meta);
    document.b2b = groups.into_values().collect();
    debug!(
        recipients = document.b2b.len(),
        invoices = document.invoice_count(),
        errors = errors.len(),
        "conversion finished"
    );

    Conversion { document, errors }
}

/// Check and normalize one row. `Ok(None)` for a B2C row.
fn read_row(
    row: &[String],
    mapping: &ColumnMapping,
    supplier_state: &str,
) -> Result<Option<B2bLine>, RowError> {
    let cell = |field| mapping.cell(row, field);
    let amount = |field: LogicalField| {
        parse_amount(cell(field)).map_err(|err| RowError::OutOfRange(field, err))
    };

    let invoice_number = cell(LogicalField::InvoiceNumber);
    let invoice_date = cell(LogicalField::InvoiceDate);
    let taxable_value = cell(LogicalField::TaxableValue);
    let place_of_supply = cell(LogicalField::PlaceOfSupply);
    let rate = cell(LogicalField::Rate);

    if invoice_number.trim().is_empty() {
        return Err(RowError::Missing(
            LogicalField::InvoiceNumber,
            "Invoice number is required",
        ));
    }
    if invoice_date.trim().is_empty() {
        return Err(RowError::Missing(
            LogicalField::InvoiceDate,
            "Invoice date is required",
        ));
    }
    let txval = amount(LogicalField::TaxableValue)?;
    if taxable_value.trim().is_empty() || txval.is_zero() {
        return Err(RowError::Missing(
            LogicalField::TaxableValue,
            "Taxable value is required and must be > 0",
        ));
    }
    if place_of_supply.trim().is_empty() {
        return Err(RowError::Missing(
            LogicalField::PlaceOfSupply,
            "Place of supply is required",
        ));
    }
    let rt = amount(LogicalField::Rate)?;
    if rate.trim().is_empty() || rt.is_zero() {
        return Err(RowError::Missing(
            LogicalField::Rate,
            "GST rate is required and must be > 0",
        ));
    }

    let idt = normalize_date(invoice_date)?;
    let pos = normalize_state_code(place_of_supply);
    let cess = amount(LogicalField::CessAmount)?;

    let supplied = TaxSplit {
        igst: amount(LogicalField::IgstAmount)?,
        cgst: amount(LogicalField::CgstAmount)?,
        sgst: amount(LogicalField::SgstAmount)?,
    };
    let taxes = resolve_taxes(supplied, txval, rt, supplier_state, &pos)?;

    let recipient = cell(LogicalField::GstinOfRecipient).trim();
    if recipient.is_empty() {
        return Ok(None);
    }

    Ok(Some(B2bLine {
        ctin: recipient.to_uppercase(),
        inum: invoice_number.to_string(),
        idt,
        val: amount(LogicalField::InvoiceValue)?,
        pos,
        rchrg: parse_reverse_charge(cell(LogicalField::ReverseCharge)),
        inv_typ: parse_invoice_type(cell(LogicalField::InvoiceType)),
        details: ItemDetails {
            txval,
            rt,
            camt: positive(taxes.cgst),
            samt: positive(taxes.sgst),
            igst: positive(taxes.igst),
            csamt: positive(cess).unwrap_or(Decimal::ZERO),
        },
    }))
}

/// Rounded amount, or `None` unless strictly positive.
fn positive(amount: Decimal) -> Option<Decimal> {
    (amount > Decimal::ZERO).then(|| round2(amount))
}

/// Add a line to its recipient group, reusing an existing invoice with the
/// same number and date.
fn merge_line(groups: &mut IndexMap<String, B2bGroup>, line: B2bLine) {
    let group = groups
        .entry(line.ctin.clone())
        .or_insert_with(|| B2bGroup {
            ctin: line.ctin,
            inv: Vec::new(),
        });

    let index = match group
        .inv
        .iter()
        .position(|inv| inv.inum == line.inum && inv.idt == line.idt)
    {
        Some(index) => index,
        None => {
            group.inv.push(InvoiceRecord {
                inum: line.inum,
                idt: line.idt,
                val: line.val,
                pos: line.pos,
                rchrg: line.rchrg,
                inv_typ: line.inv_typ,
                itms: Vec::new(),
            });
            group.inv.len() - 1
        }
    };

    let invoice = &mut group.inv[index];
    let num = if invoice.itms.is_empty() {
        FIRST_ITEM_NUMBER
    } else {
        invoice.itms.len() as u32 + 1
    };
    invoice.itms.push(LineItem {
        num,
        itm_det: line.details,
    });
}
