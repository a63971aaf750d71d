//! City name to airport code lookup for result and booking cards.

/// Served cities, lowercase, with their main airport.
const AIRPORT_CODES: [(&str, &str); 11] = [
    ("lille", "LIL"),
    ("paris", "CDG"),
    ("lyon", "LYS"),
    ("marseille", "MRS"),
    ("nice", "NCE"),
    ("toulouse", "TLS"),
    ("strasbourg", "SXB"),
    ("nantes", "NTE"),
    ("bordeaux", "BOD"),
    ("rennes", "RNS"),
    ("djerba", "DJE"),
];

/// Three-letter code for `city`.
///
/// Known cities match case-insensitively after trimming; anything else falls
/// back to its first three characters in uppercase.
pub fn airport_code(city: &str) -> String {
    let normalized = city.trim().to_lowercase();
    match AIRPORT_CODES.iter().find(|(name, _)| *name == normalized) {
        Some((_, code)) => code.to_string(),
        None => city.chars().take(3).collect::<String>().to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cities_ignore_case_and_padding() {
        assert_eq!(airport_code("Paris"), "CDG");
        assert_eq!(airport_code("  NICE "), "NCE");
        assert_eq!(airport_code("djerba"), "DJE");
    }

    #[test]
    fn test_unknown_city_falls_back_to_prefix() {
        assert_eq!(airport_code("Montpellier"), "MON");
        assert_eq!(airport_code("Évian"), "ÉVI");
        assert_eq!(airport_code("Ax"), "AX");
        assert_eq!(airport_code(""), "");
    }
}
