// Data models for the coffee catalog
use serde::{Deserialize, Serialize};

/// Editable fields of a catalog record, everything except the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeFields {
    pub sort_name: String,
    pub degree: String,
    #[serde(rename = "type")]
    pub coffee_type: String,
    pub description: Option<String>,
    pub price: f64,
    /// Package volume
    pub size: i64,
}

/// A stored catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoffeeItem {
    pub id: i64,
    #[serde(flatten)]
    pub fields: CoffeeFields,
}

/// Roast degrees offered by the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoastDegree {
    Light,
    Medium,
    Dark,
}

impl RoastDegree {
    pub const ALL: [RoastDegree; 3] = [RoastDegree::Light, RoastDegree::Medium, RoastDegree::Dark];

    pub fn label(&self) -> &'static str {
        match self {
            RoastDegree::Light => "Light",
            RoastDegree::Medium => "Medium",
            RoastDegree::Dark => "Dark",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|degree| same_label(degree.label(), s))
    }
}

/// Grind types offered by the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrindType {
    Ground,
    WholeBean,
}

impl GrindType {
    pub const ALL: [GrindType; 2] = [GrindType::Ground, GrindType::WholeBean];

    pub fn label(&self) -> &'static str {
        match self {
            GrindType::Ground => "Ground",
            GrindType::WholeBean => "Whole Bean",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|grind| same_label(grind.label(), s))
    }
}

/// Case-insensitive match that ignores spaces, dashes and underscores,
/// so "whole-bean" selects "Whole Bean".
fn same_label(label: &str, input: &str) -> bool {
    let normalize = |s: &str| {
        s.chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect::<String>()
    };
    normalize(label) == normalize(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_labels() {
        assert_eq!(RoastDegree::from_label("medium"), Some(RoastDegree::Medium));
        assert_eq!(RoastDegree::from_label(" Dark "), Some(RoastDegree::Dark));
        assert_eq!(RoastDegree::from_label("Burnt"), None);

        assert_eq!(GrindType::from_label("whole-bean"), Some(GrindType::WholeBean));
        assert_eq!(GrindType::from_label("Whole Bean"), Some(GrindType::WholeBean));
        assert_eq!(GrindType::from_label(""), None);
    }

    #[test]
    fn test_item_serializes_flat_with_type_key() {
        let item = CoffeeItem {
            id: 3,
            fields: CoffeeFields {
                sort_name: "Arabica".to_string(),
                degree: "Medium".to_string(),
                coffee_type: "Ground".to_string(),
                description: None,
                price: 9.5,
                size: 250,
            },
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["type"], "Ground");
        assert_eq!(json["sort_name"], "Arabica");
        assert!(json["description"].is_null());
        assert!(json.get("fields").is_none());
    }
}
