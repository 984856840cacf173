use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Team size chosen on the contact page.
#[derive(
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Employees {
    #[default]
    Solo,
    Team,
}

impl Employees {
    pub fn label(&self) -> &'static str {
        match self {
            Employees::Solo => "I'm a solo creator",
            Employees::Team => "I'm part of a team",
        }
    }
}

/// Editable text fields of the contact form, named as the page names its inputs.
#[derive(EnumString, Display, VariantArray, Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    JobTitle,
    Email,
    Phone,
    Message,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn field_names_match_page_inputs() {
        assert_eq!(Field::from_str("firstName"), Ok(Field::FirstName));
        assert_eq!(Field::from_str("jobTitle"), Ok(Field::JobTitle));
        assert_eq!(Field::Message.as_ref(), "message");
        assert!(Field::from_str("employees").is_err());
    }

    #[test]
    fn employees_round_trip_through_text() {
        assert_eq!(Employees::from_str("team"), Ok(Employees::Team));
        assert_eq!(Employees::Solo.to_string(), "solo");
        assert!(Employees::from_str("enterprise").is_err());
    }
}
