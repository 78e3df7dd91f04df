//! Indian state and union territory codes (first two digits of a GSTIN).

/// Look up the 2-digit GST state code for a state name.
///
/// Case-insensitive; surrounding whitespace is ignored.
pub fn state_code(name: &str) -> Option<&'static str> {
    let key = name.trim().to_lowercase();
    STATE_CODES
        .binary_search_by(|(n, _)| (*n).cmp(key.as_str()))
        .ok()
        .map(|i| STATE_CODES[i].1)
}

/// Lowercase state name → code. Sorted by name for binary search.
static STATE_CODES: &[(&str, &str)] = &[
    ("andaman and nicobar", "35"),
    ("andhra pradesh", "37"),
    ("arunachal pradesh", "12"),
    ("assam", "18"),
    ("bihar", "10"),
    ("chandigarh", "04"),
    ("chhattisgarh", "22"),
    ("dadra and nagar haveli", "26"),
    ("daman and diu", "25"),
    ("delhi", "07"),
    ("goa", "30"),
    ("gujarat", "24"),
    ("haryana", "06"),
    ("himachal pradesh", "02"),
    ("jammu and kashmir", "01"),
    ("jharkhand", "20"),
    ("ka", "29"),
    ("karnataka", "29"),
    ("kerala", "32"),
    ("ladakh", "38"),
    ("lakshadweep", "31"),
    ("madhya pradesh", "23"),
    ("maharashtra", "27"),
    ("manipur", "14"),
    ("meghalaya", "17"),
    ("mizoram", "15"),
    ("nagaland", "13"),
    ("odisha", "21"),
    ("puducherry", "34"),
    ("punjab", "03"),
    ("rajasthan", "08"),
    ("sikkim", "11"),
    ("tamil nadu", "33"),
    ("telangana", "36"),
    ("tripura", "16"),
    ("uttar pradesh", "09"),
    ("uttarakhand", "05"),
    ("west bengal", "19"),
];
