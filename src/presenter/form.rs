// Add/edit form
// Raw text inputs as the user typed them, validated before anything reaches the store

use thiserror::Error;

use crate::state::{CoffeeFields, CoffeeItem, GrindType, RoastDegree};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("{field} must be a number, got {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("{field} must be one of {choices}, got {value:?}")]
    UnknownChoice {
        field: &'static str,
        value: String,
        choices: String,
    },
}

/// Form contents, one string per input widget.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoffeeForm {
    pub sort_name: String,
    pub degree: String,
    pub coffee_type: String,
    pub description: String,
    pub price: String,
    pub size: String,
}

/// Changes to apply over a prefilled form; `None` keeps the current input.
#[derive(Debug, Clone, Default)]
pub struct FormEdits {
    pub sort_name: Option<String>,
    pub degree: Option<String>,
    pub coffee_type: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub size: Option<String>,
}

impl CoffeeForm {
    /// Prefill the form with a stored record
    pub fn from_item(item: &CoffeeItem) -> Self {
        let fields = &item.fields;
        CoffeeForm {
            sort_name: fields.sort_name.clone(),
            degree: fields.degree.clone(),
            coffee_type: fields.coffee_type.clone(),
            description: fields.description.clone().unwrap_or_default(),
            price: fields.price.to_string(),
            size: fields.size.to_string(),
        }
    }

    pub fn apply(&mut self, edits: FormEdits) {
        let FormEdits {
            sort_name,
            degree,
            coffee_type,
            description,
            price,
            size,
        } = edits;

        if let Some(v) = sort_name {
            self.sort_name = v;
        }
        if let Some(v) = degree {
            self.degree = v;
        }
        if let Some(v) = coffee_type {
            self.coffee_type = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = price {
            self.price = v;
        }
        if let Some(v) = size {
            self.size = v;
        }
    }

    /// Check every input and convert the form into storable fields.
    ///
    /// Degree and type must come from the form's choice lists and are stored
    /// under their canonical labels. A blank description is stored as absent.
    pub fn validate(&self) -> Result<CoffeeFields, FormError> {
        let sort_name = required("sort name", &self.sort_name)?;

        let degree = required("degree", &self.degree)?;
        let degree = RoastDegree::from_label(degree).ok_or_else(|| FormError::UnknownChoice {
            field: "degree",
            value: degree.to_string(),
            choices: choice_list(RoastDegree::ALL.iter().map(|d| d.label())),
        })?;

        let coffee_type = required("type", &self.coffee_type)?;
        let coffee_type = GrindType::from_label(coffee_type).ok_or_else(|| FormError::UnknownChoice {
            field: "type",
            value: coffee_type.to_string(),
            choices: choice_list(GrindType::ALL.iter().map(|g| g.label())),
        })?;

        let price = required("price", &self.price)?;
        let price = price
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| FormError::InvalidNumber {
                field: "price",
                value: price.to_string(),
            })?;

        let size = required("size", &self.size)?;
        let size = size.parse::<i64>().map_err(|_| FormError::InvalidNumber {
            field: "size",
            value: size.to_string(),
        })?;

        let description = self.description.trim();

        Ok(CoffeeFields {
            sort_name: sort_name.to_string(),
            degree: degree.label().to_string(),
            coffee_type: coffee_type.label().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            price,
            size,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FormError::EmptyField(field))
    } else {
        Ok(value)
    }
}

fn choice_list<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}
