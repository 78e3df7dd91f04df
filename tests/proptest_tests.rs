//! Property-based tests for parsing, number handling and conversion.
//!
//! Run with: `cargo test --test proptest_tests`

use gstr1::core::amount::{parse_number, round2};
use gstr1::mapping::{auto_map, find_best_match};
use gstr1::table::{parse_table, validate_table};
use gstr1::*;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Cell text without line breaks, quotes, commas or tabs.
fn arb_cell() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .%/-]{0,12}"
}

fn arb_row(width: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_cell(), 1..=width + 3)
}

fn arb_gstin() -> impl Strategy<Value = String> {
    "(27|29|07)[A-Z]{5}[0-9]{4}[A-Z][0-9]Z[0-9A-Z]"
}

fn arb_state() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("27".to_string()),
        Just("29".to_string()),
        Just("Karnataka".to_string()),
        Just("07-Delhi".to_string()),
    ]
}

/// A row with every required value present.
fn arb_valid_row() -> impl Strategy<Value = Vec<String>> {
    (
        0u32..5,
        1u32..28,
        arb_gstin(),
        arb_state(),
        1u32..100_000,
        prop_oneof![Just(5u32), Just(12), Just(18), Just(28)],
    )
        .prop_map(|(inv, day, gstin, pos, taxable, rate)| {
            vec![
                format!("INV-{inv}"),
                format!("{day:02}/04/2024"),
                format!("{taxable}"),
                gstin,
                pos,
                format!("{taxable}"),
                format!("{rate}"),
            ]
        })
}

/// A complete row whose taxable value and rate may be far too large.
fn arb_oversized_row() -> impl Strategy<Value = Vec<String>> {
    (arb_gstin(), arb_state(), "[1-9][0-9]{0,34}", "[1-9][0-9]{0,12}").prop_map(
        |(gstin, pos, taxable, rate)| {
            vec![
                "INV-1".to_string(),
                "01/04/2024".to_string(),
                "1".to_string(),
                gstin,
                pos,
                taxable,
                rate,
            ]
        },
    )
}

fn headers() -> Vec<String> {
    [
        "Invoice Number",
        "Invoice Date",
        "Invoice Value",
        "GSTIN of Recipient",
        "Place of Supply",
        "Taxable Value",
        "Rate",
    ]
    .map(String::from)
    .to_vec()
}

fn meta() -> FilingMeta {
    FilingMeta::new("27ABCDE1234F1Z5", "042024")
}

proptest! {
    /// Every parsed row is exactly as wide as the header.
    #[test]
    fn rows_padded_to_header_width(
        header in prop::collection::vec("[A-Za-z]{1,8}", 1..10),
        rows in prop::collection::vec(arb_row(10), 1..20),
    ) {
        let mut text = header.join("\t");
        for row in &rows {
            text.push('\n');
            text.push_str(&row.join("\t"));
        }

        if let Some(table) = parse_table(&text) {
            for row in &table.rows {
                prop_assert_eq!(row.len(), table.headers.len());
            }
        }
    }

    /// Arbitrary input never panics, and anything parsed validates
    /// unless it has no data rows.
    #[test]
    fn parse_never_panics(text in "\\PC{0,300}") {
        if let Some(table) = parse_table(&text) {
            let result = validate_table(Some(&table));
            prop_assert!(result.is_ok() || result == Err(ShapeError::NoRows));
        }
    }

    #[test]
    fn parse_number_never_panics(s in "\\PC{0,40}") {
        let _ = parse_number(&s);
    }

    /// Thousands separators never change the value.
    #[test]
    fn commas_ignored(n in 0u64..10_000_000_000) {
        let plain = n.to_string();
        let mut grouped = String::new();
        for (i, ch) in plain.chars().enumerate() {
            if i > 0 && (plain.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        prop_assert_eq!(parse_number(&grouped), Decimal::from(n));
    }

    #[test]
    fn round2_keeps_two_places(mantissa in -10_000_000i64..10_000_000, scale in 0u32..6) {
        let rounded = round2(Decimal::new(mantissa, scale));
        prop_assert!(rounded.scale() <= 2);
    }

    /// Mapping heuristics only ever return in-range columns.
    #[test]
    fn mappings_in_range(headers in prop::collection::vec("[A-Za-z %/-]{0,20}", 0..15)) {
        for (_, col) in auto_map(&headers).iter() {
            prop_assert!(col < headers.len());
        }
        for field in LogicalField::ALL {
            if let Some(col) = find_best_match(field, &headers) {
                prop_assert!(col < headers.len());
            }
        }
    }

    /// Same input, same output; every valid row lands in the document.
    #[test]
    fn conversion_deterministic_and_complete(rows in prop::collection::vec(arb_valid_row(), 1..30)) {
        let table = ParsedTable::new(headers(), rows.clone());
        let mapping = auto_map(&table.headers);

        let first = convert(&table, &mapping, &meta());
        let second = convert(&table, &mapping, &meta());
        prop_assert_eq!(&first, &second);
        prop_assert!(first.errors.is_empty());

        let items: usize = first
            .document
            .b2b
            .iter()
            .flat_map(|g| &g.inv)
            .map(|inv| inv.itms.len())
            .sum();
        prop_assert_eq!(items, rows.len());

        for group in &first.document.b2b {
            for inv in &group.inv {
                prop_assert_eq!(inv.itms[0].num, 1801);
                prop_assert!(inv.idt.ends_with("-04-2024"));
            }
        }
    }

    /// Intra-state lines carry CGST and SGST only, inter-state lines IGST only.
    #[test]
    fn tax_split_by_state(rows in prop::collection::vec(arb_valid_row(), 1..10)) {
        // one invoice per row so every item keeps its own place of supply
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, mut row)| {
                row[0] = format!("UNIQUE-{i}");
                row
            })
            .collect();
        let table = ParsedTable::new(headers(), rows);
        let result = convert(&table, &auto_map(&table.headers), &meta());

        for group in &result.document.b2b {
            for inv in &group.inv {
                for item in &inv.itms {
                    let det = &item.itm_det;
                    if inv.pos == "27" {
                        prop_assert!(det.igst.is_none());
                        prop_assert_eq!(det.camt, det.samt);
                    } else {
                        prop_assert!(det.camt.is_none() && det.samt.is_none());
                        prop_assert!(det.igst.is_some());
                    }
                }
            }
        }
    }

    /// Huge amounts never panic: each row becomes an item or an error.
    #[test]
    fn oversized_amounts_never_panic(rows in prop::collection::vec(arb_oversized_row(), 1..10)) {
        let table = ParsedTable::new(headers(), rows.clone());
        let result = convert(&table, &auto_map(&table.headers), &meta());

        let items: usize = result
            .document
            .b2b
            .iter()
            .flat_map(|g| &g.inv)
            .map(|inv| inv.itms.len())
            .sum();
        prop_assert_eq!(items + result.errors.len(), rows.len());
    }
}
