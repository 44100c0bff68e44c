/// Station catalog for the forecast and satellite dashboards.
///
/// The canonical list of station identifiers a user can pick from. This is
/// the single source of truth for station ids; other modules should take
/// ids from here (or from configuration) rather than hardcoding them.
///
/// The catalog only gates what is offered for selection. The fetch layer
/// forwards any non-empty id to the remote source without checking it
/// against this list.

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Station selected when a screen mounts.
pub const DEFAULT_STATION: &str = "UT67";

/// All monitoring stations offered in the station picker, in picker order.
///
/// Ids are a two-letter network prefix followed by a station number.
pub static STATION_CATALOG: &[&str] = &[
    "UT67", "UT62", "JH83", "WB88", "UT68", "WB85", "UT64", "HR56",
    "WB87", "UT57", "BH79", "UT61", "BH72", "WB89", "UK54", "UT69",
    "JH82", "WB90", "UT65", "UK52", "BH76", "BH81", "BH74", "UT71",
    "BH80", "UT60", "BH75", "WB86", "UK55", "BH77", "JH84", "BH78",
    "UK53", "BH73", "UT70", "UT63",
];

/// Returns the catalog ids as owned strings, e.g. for a config default.
pub fn all_station_ids() -> Vec<String> {
    STATION_CATALOG.iter().map(|s| s.to_string()).collect()
}

/// Returns `true` if `id` is in the catalog (exact match).
pub fn is_known_station(id: &str) -> bool {
    STATION_CATALOG.contains(&id)
}

/// Position of `id` in the catalog, for picker highlighting.
pub fn catalog_position(id: &str) -> Option<usize> {
    STATION_CATALOG.iter().position(|s| *s == id)
}

/// Station ids in the catalog sharing a network prefix (e.g. `"BH"`).
pub fn stations_in_network(prefix: &str) -> Vec<&'static str> {
    STATION_CATALOG
        .iter()
        .copied()
        .filter(|id| id.starts_with(prefix))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_station_ids_have_prefix_and_number_shape() {
        // Two uppercase letters followed by two digits. The API routes on
        // this id verbatim, so a typo here is a silent 404 at runtime.
        for id in STATION_CATALOG {
            assert_eq!(id.len(), 4, "station id '{}' should be 4 characters", id);
            assert!(
                id[..2].chars().all(|c| c.is_ascii_uppercase()),
                "station id '{}' should start with a network prefix",
                id
            );
            assert!(
                id[2..].chars().all(|c| c.is_ascii_digit()),
                "station id '{}' should end with a station number",
                id
            );
        }
    }

    #[test]
    fn test_no_duplicate_station_ids() {
        let mut seen = std::collections::HashSet::new();
        for id in STATION_CATALOG {
            assert!(seen.insert(*id), "duplicate station id '{}' in STATION_CATALOG", id);
        }
    }

    #[test]
    fn test_default_station_is_first_catalog_entry() {
        assert_eq!(STATION_CATALOG.first(), Some(&DEFAULT_STATION));
        assert_eq!(catalog_position(DEFAULT_STATION), Some(0));
    }

    #[test]
    fn test_catalog_size() {
        assert_eq!(STATION_CATALOG.len(), 36);
        assert_eq!(all_station_ids().len(), STATION_CATALOG.len());
    }

    #[test]
    fn test_known_station_lookup_is_exact() {
        assert!(is_known_station("WB90"));
        assert!(!is_known_station("wb90"));
        assert!(!is_known_station("XX00"));
        assert!(catalog_position("XX00").is_none());
    }

    #[test]
    fn test_stations_in_network() {
        let jharkhand = stations_in_network("JH");
        assert_eq!(jharkhand, vec!["JH83", "JH82", "JH84"]);
        assert!(stations_in_network("ZZ").is_empty());
    }
}
