use serde::{Deserialize, Serialize};
use std::fmt;

/// A single recipe component.
///
/// Descriptor lists are owned per instance; deserializing a recipe without
/// them gives every ingredient its own empty list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    pub name: String,
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    /// State qualifiers such as "cooked" or "frozen".
    #[serde(default)]
    pub state_descriptors: Vec<String>,
    /// Preparation qualifiers such as "diced" or "sifted".
    #[serde(default)]
    pub prep_descriptors: Vec<String>,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: unit.into(),
            state_descriptors: Vec::new(),
            prep_descriptors: Vec::new(),
        }
    }

    pub fn with_state(mut self, descriptor: impl Into<String>) -> Self {
        self.state_descriptors.push(descriptor.into());
        self
    }

    pub fn with_prep(mut self, descriptor: impl Into<String>) -> Self {
        self.prep_descriptors.push(descriptor.into());
        self
    }

    /// Multiplies the quantity by `factor`. A non-negative factor keeps the
    /// quantity non-negative; rejecting bad factors is the caller's job.
    pub fn scale(&mut self, factor: f64) {
        self.quantity *= factor;
    }

    /// Drops state and prep descriptors, used when the ingredient is swapped
    /// for another one they may not apply to.
    pub(crate) fn clear_descriptors(&mut self) {
        self.state_descriptors.clear();
        self.prep_descriptors.clear();
    }
}

/// Formats a quantity rounded to three decimals without trailing zeros.
pub fn format_quantity(quantity: f64) -> String {
    let rounded = (quantity * 1000.0).round() / 1000.0;
    // Avoid printing "-0" for tiny negative values that round to zero
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

impl fmt::Display for Ingredient {
    /// e.g. "0.5 cup cooked diced chicken"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<&str> = Vec::new();
        let quantity = format_quantity(self.quantity);
        parts.push(&quantity);
        if !self.unit.is_empty() {
            parts.push(&self.unit);
        }
        parts.extend(self.state_descriptors.iter().map(String::as_str));
        parts.extend(self.prep_descriptors.iter().map(String::as_str));
        parts.push(&self.name);
        write!(f, "{}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_descriptors() {
        let chicken = Ingredient::new("chicken", 0.5, "cup")
            .with_state("cooked")
            .with_prep("diced");
        assert_eq!(chicken.to_string(), "0.5 cup cooked diced chicken");
    }

    #[test]
    fn test_display_without_unit() {
        let eggs = Ingredient::new("eggs", 2.0, "");
        assert_eq!(eggs.to_string(), "2 eggs");
    }

    #[test]
    fn test_scale_halves_and_grows() {
        let mut mayo = Ingredient::new("mayonnaise", 2.0, "tablespoons");
        mayo.scale(0.5);
        assert_eq!(mayo.quantity, 1.0);
        mayo.scale(1.5);
        assert_eq!(mayo.quantity, 1.5);
    }

    #[test]
    fn test_format_quantity_rounding() {
        assert_eq!(format_quantity(1.0), "1");
        assert_eq!(format_quantity(0.1 + 0.2), "0.3");
        assert_eq!(format_quantity(2.0 / 3.0), "0.667");
        assert_eq!(format_quantity(-0.0001), "0");
    }

    #[test]
    fn test_clear_descriptors() {
        let mut butter = Ingredient::new("butter", 1.0, "stick").with_state("softened");
        butter.clear_descriptors();
        assert!(butter.state_descriptors.is_empty());
        assert!(butter.prep_descriptors.is_empty());
    }

    #[test]
    fn test_missing_descriptor_lists_deserialize_independently() {
        let json = r#"[{"name": "a", "quantity": 1.0}, {"name": "b", "quantity": 2.0}]"#;
        let mut parsed: Vec<Ingredient> = serde_json::from_str(json).unwrap();
        parsed[0].state_descriptors.push("raw".to_string());
        assert!(parsed[1].state_descriptors.is_empty());
        assert_eq!(parsed[0].unit, "");
    }
}
