use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::models::Listing;
use crate::utils::error::PriceParseError;

/// Left behind when a UTF-8 `£` (C2 A3) is decoded as Latin-1.
const ENCODING_ARTIFACT: char = 'Â';

/// What a lone Latin-1 `£` (A3) becomes after lossy UTF-8 decoding.
const REPLACEMENT: char = '\u{FFFD}';

fn currency_symbols() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{Sc}").expect("currency symbol class is a valid regex"))
}

/// Strips encoding artifacts and any currency symbols, then parses what
/// remains as a plain decimal. Thousands separators are not accepted.
pub fn parse_price(text: &str) -> Result<Decimal, PriceParseError> {
    let without_artifact = text.replace([ENCODING_ARTIFACT, REPLACEMENT], "");
    let cleaned = currency_symbols().replace_all(&without_artifact, "");

    Decimal::from_str(cleaned.trim()).map_err(|source| PriceParseError {
        raw: text.to_string(),
        source,
    })
}

/// Listings priced strictly below `threshold`, in their original order.
pub fn below_threshold(listings: &[Listing], threshold: Decimal) -> Vec<Listing> {
    listings
        .iter()
        .filter(|listing| listing.price() < threshold)
        .cloned()
        .collect()
}
