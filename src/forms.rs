use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{FoodChanges, DEFAULT_LOCATION};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.username.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(AppError::Validation(
                "Username, email and password are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PasswordForm {
    pub old_password: String,
    pub new_password: String,
}

/// Raw food form as posted; numbers and dates arrive as text.
#[derive(Debug, Deserialize)]
pub(crate) struct FoodForm {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    #[serde(default)]
    pub location: Option<String>,
    pub expiration_date: String,
}

impl FoodForm {
    pub(crate) fn parse(self) -> Result<FoodChanges, AppError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Name is required".to_string()));
        }
        let quantity: f64 = self
            .quantity
            .trim()
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid quantity: {}", self.quantity)))?;
        if !quantity.is_finite() {
            return Err(AppError::Validation(format!(
                "Invalid quantity: {}",
                self.quantity
            )));
        }
        let expiration_date = NaiveDate::parse_from_str(self.expiration_date.trim(), DATE_FORMAT)
            .map_err(|_| {
                AppError::Validation(format!(
                    "Invalid expiration date: {}",
                    self.expiration_date
                ))
            })?;
        let storage_location = self
            .location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

        Ok(FoodChanges {
            name,
            quantity,
            unit: self.unit.trim().to_string(),
            storage_location,
            expiration_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(quantity: &str, date: &str, location: Option<&str>) -> FoodForm {
        FoodForm {
            name: " Cà chua ".to_string(),
            quantity: quantity.to_string(),
            unit: "quả".to_string(),
            location: location.map(str::to_string),
            expiration_date: date.to_string(),
        }
    }

    #[test]
    fn parses_valid_form() {
        let food = form("2.5", "2025-11-20", Some("Ngăn đá")).parse().unwrap();
        assert_eq!(food.name, "Cà chua");
        assert_eq!(food.quantity, 2.5);
        assert_eq!(food.storage_location, "Ngăn đá");
        assert_eq!(
            food.expiration_date,
            NaiveDate::from_ymd_opt(2025, 11, 20).unwrap()
        );
    }

    #[test]
    fn missing_location_uses_default() {
        let food = form("1", "2025-11-20", None).parse().unwrap();
        assert_eq!(food.storage_location, DEFAULT_LOCATION);
        let food = form("1", "2025-11-20", Some("  ")).parse().unwrap();
        assert_eq!(food.storage_location, DEFAULT_LOCATION);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            form("abc", "2025-11-20", None).parse(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            form("NaN", "2025-11-20", None).parse(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            form("1", "20/11/2025", None).parse(),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            form("1", "2025-02-30", None).parse(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn register_requires_all_fields() {
        let ok = RegisterForm {
            username: "lan".to_string(),
            email: "lan@example.com".to_string(),
            password: "secret".to_string(),
        };
        assert!(ok.validate().is_ok());
        let blank = RegisterForm {
            username: "  ".to_string(),
            ..ok
        };
        assert!(matches!(blank.validate(), Err(AppError::Validation(_))));
    }
}
