use gstr1::export::{suggested_filename, to_json_pretty};
use gstr1::*;

const PASTE: &str = "GSTR-1 B2B Summary\tApril 2024
GSTIN/UIN of Recipient\tReceiver Name\tInvoice Number\tInvoice date\tInvoice Value\tPlace Of Supply\tReverse Charge\tRate\tTaxable Value\tCess Amount
27AAACR5055K1Z7\tReliance Retail\tINV-001\t01/04/2024\t1,416\t27-Maharashtra\tN\t18\t1,000\t
27AAACR5055K1Z7\tReliance Retail\tINV-001\t01/04/2024\t1,416\t27-Maharashtra\tN\t18\t200\t
29AABCT1332L1ZV\tTata Steel\tINV-002\t05-Apr-2024\t5,900\tKarnataka\tN\t18\t5,000\t
29AABCT1332L1ZV\tTata Steel\tINV-003\t2024-04-09\t\tKarnataka\tN\t0\t750\t
\tWalk-in\tINV-004\t10/04/2024\t590\t27\tN\t18\t500\t";

fn main() {
    // ── 1. Parse, validate and auto-map the paste ─────────────────────
    println!("=== Prepare ===");
    let prepared = prepare(PASTE).expect("paste should have a header and rows");
    println!("  {} rows, {} headers", prepared.table.rows.len(), prepared.table.headers.len());
    for (field, col) in prepared.mapping.iter() {
        println!("  {:<24} <- {}", field.label(), prepared.table.headers[col]);
    }

    // ── 2. Check the filing metadata ──────────────────────────────────
    let meta = FilingMeta::new("27ABCDE1234F1Z5", "042024")
        .checked()
        .expect("metadata should be valid");

    // ── 3. Convert ────────────────────────────────────────────────────
    println!("\n=== Convert ===");
    let result = prepared.convert(&meta);
    for error in &result.errors {
        // INV-003 has no rate
        println!("  {error}");
    }
    println!(
        "  {} recipients, {} invoices, exportable: {}",
        result.document.b2b.len(),
        result.document.invoice_count(),
        result.is_exportable()
    );

    // ── 4. Export ─────────────────────────────────────────────────────
    println!("\n=== {} ===", suggested_filename(&meta));
    let json = to_json_pretty(&result.document).expect("document should serialize");
    println!("{json}");
}
