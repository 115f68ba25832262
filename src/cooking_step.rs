use serde::{Deserialize, Serialize};

use crate::error::{RecipeError, Result};

const MIXED_NUMBERING: &str = "cannot mix '{}' and '{N}' slots";

/// One instruction of a recipe.
///
/// Ingredients are referenced by name, not by ownership, so renaming an
/// ingredient must go through `Recipe::substitute_ingredient` to keep
/// `ingredient_refs` in sync.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CookingStep {
    #[serde(default)]
    pub ingredient_refs: Vec<String>,
    #[serde(default)]
    pub tool_refs: Vec<String>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub duration_quantity: Option<f64>,
    #[serde(default)]
    pub duration_unit: String,
    /// Numeric amounts used by this step ("add half of the sauce", "2 cups of
    /// water"); scaled together with the ingredient quantities.
    #[serde(default)]
    pub quantities: Vec<f64>,
    /// Text with `{}` / `{N}` slots filled from `ingredient_refs`.
    #[serde(default)]
    pub text_template: String,
}

impl CookingStep {
    pub fn new(text_template: impl Into<String>, ingredient_refs: Vec<String>) -> Self {
        Self {
            ingredient_refs,
            text_template: text_template.into(),
            ..Default::default()
        }
    }

    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tool_refs = tools;
        self
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_duration(mut self, quantity: f64, unit: impl Into<String>) -> Self {
        self.duration_quantity = Some(quantity);
        self.duration_unit = unit.into();
        self
    }

    pub fn with_quantities(mut self, quantities: Vec<f64>) -> Self {
        self.quantities = quantities;
        self
    }

    /// Replaces every reference to `old_name` with `new_name`.
    pub(crate) fn rename_ingredient_ref(&mut self, old_name: &str, new_name: &str) {
        for reference in self.ingredient_refs.iter_mut() {
            if reference == old_name {
                *reference = new_name.to_string();
            }
        }
    }

    /// Multiplies the duration and every embedded amount by `factor`. Units are untouched.
    pub(crate) fn scale(&mut self, factor: f64) {
        if let Some(duration) = self.duration_quantity.as_mut() {
            *duration *= factor;
        }
        for quantity in self.quantities.iter_mut() {
            *quantity *= factor;
        }
    }

    /// Renders the step text by filling template slots with ingredient names.
    ///
    /// `{}` takes the next reference in order, `{N}` takes reference `N`, and
    /// `{{` / `}}` produce literal braces. One template uses either `{}` or
    /// `{N}` slots, not both.
    ///
    /// # Errors
    /// `MissingTemplateSlot` if a slot points past the end of `ingredient_refs`,
    /// `MalformedTemplate` for unbalanced braces, a non-numeric slot, or a
    /// template that mixes `{}` and `{N}`.
    pub fn render(&self) -> Result<String> {
        let template = &self.text_template;
        let mut output = String::with_capacity(template.len());
        let mut chars = template.chars().peekable();
        let mut next_auto_slot = 0usize;
        let mut used_explicit_slot = false;

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    output.push('{');
                }
                '{' => {
                    let mut slot_text = String::new();
                    let mut closed = false;
                    for inner in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        slot_text.push(inner);
                    }
                    if !closed {
                        return Err(self.malformed("unclosed '{'"));
                    }

                    let slot = if slot_text.trim().is_empty() {
                        if used_explicit_slot {
                            return Err(self.malformed(MIXED_NUMBERING));
                        }
                        let slot = next_auto_slot;
                        next_auto_slot += 1;
                        slot
                    } else {
                        if next_auto_slot > 0 {
                            return Err(self.malformed(MIXED_NUMBERING));
                        }
                        used_explicit_slot = true;
                        slot_text.trim().parse::<usize>().map_err(|_| {
                            self.malformed(&format!("slot '{}' is not a position", slot_text))
                        })?
                    };

                    let name = self.ingredient_refs.get(slot).ok_or_else(|| {
                        RecipeError::MissingTemplateSlot {
                            slot,
                            available: self.ingredient_refs.len(),
                            template: template.clone(),
                        }
                    })?;
                    output.push_str(name);
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    output.push('}');
                }
                '}' => return Err(self.malformed("single '}' outside of a slot")),
                other => output.push(other),
            }
        }

        Ok(output)
    }

    fn malformed(&self, reason: &str) -> RecipeError {
        RecipeError::MalformedTemplate {
            template: self.text_template.clone(),
            reason: reason.to_string(),
        }
    }
}
