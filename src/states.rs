//! Static US state lookup: full snake_case name ↔ two-letter postal code.
//!
//! The directory endpoint wants full lowercase names; users type either form.
//! Both directions are total over the 50 states and return `None` for
//! anything unrecognized.

const STATES: [(&str, &str); 50] = [
    ("alabama", "AL"),
    ("alaska", "AK"),
    ("arizona", "AZ"),
    ("arkansas", "AR"),
    ("california", "CA"),
    ("colorado", "CO"),
    ("connecticut", "CT"),
    ("delaware", "DE"),
    ("florida", "FL"),
    ("georgia", "GA"),
    ("hawaii", "HI"),
    ("idaho", "ID"),
    ("illinois", "IL"),
    ("indiana", "IN"),
    ("iowa", "IA"),
    ("kansas", "KS"),
    ("kentucky", "KY"),
    ("louisiana", "LA"),
    ("maine", "ME"),
    ("maryland", "MD"),
    ("massachusetts", "MA"),
    ("michigan", "MI"),
    ("minnesota", "MN"),
    ("mississippi", "MS"),
    ("missouri", "MO"),
    ("montana", "MT"),
    ("nebraska", "NE"),
    ("nevada", "NV"),
    ("new_hampshire", "NH"),
    ("new_jersey", "NJ"),
    ("new_mexico", "NM"),
    ("new_york", "NY"),
    ("north_carolina", "NC"),
    ("north_dakota", "ND"),
    ("ohio", "OH"),
    ("oklahoma", "OK"),
    ("oregon", "OR"),
    ("pennsylvania", "PA"),
    ("rhode_island", "RI"),
    ("south_carolina", "SC"),
    ("south_dakota", "SD"),
    ("tennessee", "TN"),
    ("texas", "TX"),
    ("utah", "UT"),
    ("vermont", "VT"),
    ("virginia", "VA"),
    ("washington", "WA"),
    ("west_virginia", "WV"),
    ("wisconsin", "WI"),
    ("wyoming", "WY"),
];

/// Expands a two-letter abbreviation to the full snake_case name.
/// Case-insensitive on input.
#[must_use]
pub fn unabbreviate(abbreviation: &str) -> Option<&'static str> {
    let code = abbreviation.trim().to_ascii_uppercase();
    STATES
        .iter()
        .find(|(_, candidate)| *candidate == code)
        .map(|(name, _)| *name)
}

/// Collapses a full state name to its two-letter code. Accepts mixed case
/// and internal spaces ("New Hampshire" and "new_hampshire" both work).
#[must_use]
pub fn abbreviate(name: &str) -> Option<&'static str> {
    let key = name.trim().to_ascii_lowercase().replace(' ', "_");
    STATES
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, code)| *code)
}
