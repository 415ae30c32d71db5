//! Gestation projector.

use chrono::{Days, NaiveDate};

use crate::error::{DomainError, Result};

use super::Species;

/// Projects the expected birth date from a breeding date.
///
/// Pure and deterministic: `breeding_date + gestation_days(species)`.
/// Fails only if the projection overflows the calendar range.
pub fn project_birth_date(breeding_date: NaiveDate, species: Species) -> Result<NaiveDate> {
    breeding_date
        .checked_add_days(Days::new(species.gestation_days()))
        .ok_or_else(|| DomainError::InvalidDate {
            reason: format!("cannot project a birth date from {breeding_date}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_swine_projection_is_114_days() {
        let projected = project_birth_date(date("2024-01-01"), Species::Swine).unwrap();
        assert_eq!(projected, date("2024-04-24"));
    }

    #[test]
    fn test_poultry_projection_is_21_days() {
        let projected = project_birth_date(date("2024-01-01"), Species::Poultry).unwrap();
        assert_eq!(projected, date("2024-01-22"));
    }

    #[test]
    fn test_projection_crosses_year_boundary() {
        let projected = project_birth_date(date("2023-12-20"), Species::Poultry).unwrap();
        assert_eq!(projected, date("2024-01-10"));
    }

    #[test]
    fn test_projection_overflow_fails() {
        let result = project_birth_date(NaiveDate::MAX, Species::Swine);
        assert!(matches!(result, Err(DomainError::InvalidDate { .. })));
    }
}
