#![cfg(feature = "json")]

use gstr1::export::{from_json, suggested_filename, to_json_pretty};
use gstr1::pipeline::prepare;
use gstr1::*;
use rust_decimal_macros::dec;

const PASTE: &str = "GSTIN/UIN of Recipient\tInvoice Number\tInvoice date\tInvoice Value\tPlace Of Supply\tReverse Charge\tRate\tTaxable Value\tCess Amount\n\
27AAACR5055K1Z7\tINV-001\t01/04/2024\t1,180\t27-Maharashtra\tN\t18\t1000\t0\n\
27AAACR5055K1Z7\tINV-001\t01/04/2024\t1,180\t27-Maharashtra\tN\t5\t200.50\t1.5\n\
29AABCT1332L1ZD\tINV-002\t2024-04-05\t590\tKarnataka\tY\t18\t500\t\n";

fn meta() -> FilingMeta {
    FilingMeta::new("27ABCDE1234F1Z5", "042024")
}

fn converted() -> Conversion {
    prepare(PASTE).unwrap().convert(&meta())
}

#[test]
fn paste_to_document() {
    let result = converted();
    assert!(result.is_exportable(), "{:?}", result.errors);

    let doc = &result.document;
    assert_eq!(doc.b2b.len(), 2);
    let second_item = &doc.b2b[0].inv[0].itms[1].itm_det;
    assert_eq!(second_item.camt, Some(dec!(5.01)));
    assert_eq!(second_item.csamt, dec!(1.5));
    assert_eq!(doc.b2b[1].inv[0].rchrg, ReverseCharge::Yes);
}

#[test]
fn amounts_are_plain_numbers() {
    let json = to_json_pretty(&converted().document).unwrap();
    assert!(json.contains("\"val\": 1180,"));
    assert!(json.contains("\"txval\": 200.5,"));
    assert!(!json.contains("\"igst\": null"));
    assert!(!json.contains("1180.0"));
}

#[test]
fn exported_document_reads_back() {
    let text = "GSTIN/UIN of Recipient\tInvoice Number\tInvoice date\tInvoice Value\tPlace Of Supply\tRate\tTaxable Value\n\
                29AABCT1332L1ZD\tINV-9\t09-04-2024\t1180\t29\t18\t1000";
    let doc = prepare(text).unwrap().convert(&meta()).document;

    let back = from_json(&to_json_pretty(&doc).unwrap()).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn download_name() {
    assert_eq!(suggested_filename(&meta()), "gstr1_27ABCDE1234F1Z5_042024.json");
}

// ---------------------------------------------------------------------------
// Snapshot tests (insta)
// ---------------------------------------------------------------------------

#[test]
fn b2b_document_snapshot() {
    let json = to_json_pretty(&converted().document).unwrap();
    insta::assert_snapshot!("gstr1_b2b_document", json);
}
