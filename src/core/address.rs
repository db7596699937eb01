use crate::domain::model::StructuredAddress;
use regex::Regex;
use std::sync::LazyLock;

static STREET_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+) ([0-9]+[A-Za-z]*)$").expect("static regex"));

static LOCALITY_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{4})\s+(.+)$").expect("static regex"));

/// Best-effort split of a free-text address. Never fails.
///
/// The first line is read as `street building-number`, the last line (when
/// there are at least two) as `postal-code town`. Lines in between are ignored.
pub fn parse_address(raw: &str) -> StructuredAddress {
    let lines: Vec<&str> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut address = StructuredAddress::default();

    if let Some(first) = lines.first() {
        match STREET_LINE.captures(first) {
            Some(caps) => {
                address.street = caps[1].trim().to_string();
                address.building_number = caps[2].to_string();
            }
            None => address.street = first.to_string(),
        }
    }

    if lines.len() >= 2 {
        let last = lines[lines.len() - 1];
        match LOCALITY_LINE.captures(last) {
            Some(caps) => {
                address.postal_code = caps[1].to_string();
                address.town = caps[2].trim().to_string();
            }
            None => address.town = last.to_string(),
        }
    }

    address
}
