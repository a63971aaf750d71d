use serde::{Deserialize, Serialize};
use chrono::NaiveDate;

use crate::dates::parse_iso_date;
use crate::{CoreError, CoreResult};

/// Result ordering requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[serde(rename = "prix")]
    Price,
    #[serde(rename = "tempsTrajet")]
    Duration,
}

impl SortKey {
    /// Value of the `tri` query parameter
    pub fn as_query_value(&self) -> &'static str {
        match self {
            Self::Price => "prix",
            Self::Duration => "tempsTrajet",
        }
    }
}

/// Search form contents. Dates are kept as ISO strings, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    #[serde(rename = "villeDepart")]
    pub origin: String,
    #[serde(rename = "villeArrivee")]
    pub destination: String,
    #[serde(rename = "dateDepart")]
    pub departure_date: String,
    #[serde(rename = "dateArrivee")]
    pub return_date: String,
    #[serde(rename = "tri", default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortKey>,
}

impl SearchParams {
    pub fn is_complete(&self) -> bool {
        [&self.origin, &self.destination, &self.departure_date, &self.return_date]
            .iter()
            .all(|field| !field.trim().is_empty())
    }

    /// Completeness first, then date ordering.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.is_complete() {
            return Err(CoreError::IncompleteSearch);
        }
        let departure = parse_iso_date(&self.departure_date)?;
        check_return_date(Some(departure), parse_iso_date(&self.return_date)?)
    }

    /// Query string pairs for `GET /vols`; empty fields are left out.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        for (key, value) in [
            ("dateDepart", &self.departure_date),
            ("dateArrivee", &self.return_date),
            ("villeDepart", &self.origin),
            ("villeArrivee", &self.destination),
        ] {
            if !value.is_empty() {
                pairs.push((key, value.clone()));
            }
        }
        if let Some(sort) = self.sort {
            pairs.push(("tri", sort.as_query_value().to_string()));
        }
        pairs
    }

    /// Header line for the results page, e.g. `Paris - Nice`.
    pub fn summary(&self) -> String {
        format!("{} - {}", self.origin, self.destination)
    }
}

/// A return date must come strictly after an already chosen departure date.
pub fn check_return_date(departure: Option<NaiveDate>, candidate: NaiveDate) -> CoreResult<()> {
    match departure {
        None => Err(CoreError::DepartureDateMissing),
        Some(departure) if candidate <= departure => Err(CoreError::ReturnNotAfterDeparture),
        Some(_) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> SearchParams {
        SearchParams {
            origin: "Lille".to_string(),
            destination: "Nice".to_string(),
            departure_date: "2024-06-10".to_string(),
            return_date: "2024-06-17".to_string(),
            sort: None,
        }
    }

    #[test]
    fn test_complete_search_is_valid() {
        assert!(params().is_complete());
        assert_eq!(params().validate(), Ok(()));
    }

    #[test]
    fn test_any_blank_field_fails_completeness() {
        let mut p = params();
        p.destination = "  ".to_string();
        assert!(!p.is_complete());
        assert_eq!(p.validate(), Err(CoreError::IncompleteSearch));

        let mut p = params();
        p.return_date.clear();
        assert_eq!(p.validate(), Err(CoreError::IncompleteSearch));
    }

    #[test]
    fn test_return_must_follow_departure() {
        let mut p = params();
        p.return_date = p.departure_date.clone();
        assert_eq!(p.validate(), Err(CoreError::ReturnNotAfterDeparture));
    }

    #[test]
    fn test_check_return_date() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let next = day.succ_opt().unwrap();
        assert_eq!(check_return_date(None, next), Err(CoreError::DepartureDateMissing));
        assert_eq!(check_return_date(Some(day), day), Err(CoreError::ReturnNotAfterDeparture));
        assert_eq!(check_return_date(Some(next), day), Err(CoreError::ReturnNotAfterDeparture));
        assert_eq!(check_return_date(Some(day), next), Ok(()));
    }

    #[test]
    fn test_query_pairs_skip_empty_fields() {
        let mut p = params();
        p.origin.clear();
        p.sort = Some(SortKey::Duration);
        let pairs = p.query_pairs();
        assert!(pairs.iter().all(|(k, _)| *k != "villeDepart"));
        assert!(pairs.contains(&("tri", "tempsTrajet".to_string())));
        assert!(pairs.contains(&("dateDepart", "2024-06-10".to_string())));
    }

    #[test]
    fn test_summary() {
        assert_eq!(params().summary(), "Lille - Nice");
    }
}
