//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::{date::parse_calendar_date, optional_field, required_field};
use crate::error::AppError;

/// Author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_date: NaiveDate,
    /// Absent when the author is living or the date is unknown
    pub date_of_death: Option<NaiveDate>,
}

/// Raw add-author form, every field an untrusted string
#[derive(Debug, Default, Clone, Deserialize, Validate, ToSchema)]
pub struct AuthorForm {
    #[validate(length(max = 100, message = "name must be at most 100 characters"))]
    pub name: Option<String>,
    /// `YYYY-MM-DD`
    pub birthdate: Option<String>,
    /// `YYYY-MM-DD`, blank for none
    pub date_of_death: Option<String>,
}

/// Validated author ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub name: String,
    pub birth_date: NaiveDate,
    pub date_of_death: Option<NaiveDate>,
}

impl TryFrom<AuthorForm> for NewAuthor {
    type Error = AppError;

    fn try_from(form: AuthorForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let name = required_field(form.name, "name")?;
        let birthdate = required_field(form.birthdate, "birthdate")?;
        let birth_date = parse_calendar_date("birthdate", &birthdate)?;
        let date_of_death = optional_field(form.date_of_death)
            .map(|d| parse_calendar_date("date_of_death", &d))
            .transpose()?;

        Ok(Self {
            name,
            birth_date,
            date_of_death,
        })
    }
}
