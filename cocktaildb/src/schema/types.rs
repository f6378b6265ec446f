use serde::{Deserialize, Serialize};

/// A cocktail stored in the `cocktails` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cocktail {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub instructions: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientQuantity>,
}

/// An ingredient line embedded in a cocktail. Plain value data, not a
/// reference into the `ingredients` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientQuantity {
    pub name: String,
    /// Free-form amount, e.g. "50 ml" or "to top"
    pub quantity: String,
}

/// An ingredient stored in the `ingredients` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: u64,
    pub name: String,
    #[serde(alias = "desc")]
    pub description: String,
    pub is_alcoholic: bool,
}

/// Creation payload for a cocktail. Identifiers are always assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCocktail {
    pub name: String,
    pub category: String,
    pub instructions: String,
    pub ingredients: Vec<IngredientQuantity>,
}

/// Creation payload for an ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    #[serde(alias = "desc")]
    pub description: String,
    pub is_alcoholic: bool,
}

/// Partial cocktail. Absent (or null) fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocktailPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<IngredientQuantity>>,
}

/// Partial ingredient. Absent (or null) fields leave the stored value unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "desc", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_alcoholic: Option<bool>,
}

impl Cocktail {
    pub fn from_new(id: u64, new: NewCocktail) -> Self {
        Cocktail {
            id,
            name: new.name,
            category: new.category,
            instructions: new.instructions,
            ingredients: new.ingredients,
        }
    }

    /// Overlay the patch field by field. The id is never touched.
    pub fn apply_patch(&mut self, patch: CocktailPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(instructions) = patch.instructions {
            self.instructions = instructions;
        }
        if let Some(ingredients) = patch.ingredients {
            self.ingredients = ingredients;
        }
    }

    /// Case-insensitive exact match against the embedded ingredient names
    pub fn has_ingredient(&self, name: &str) -> bool {
        let wanted = name.to_lowercase();
        self.ingredients
            .iter()
            .any(|i| i.name.to_lowercase() == wanted)
    }
}

impl Ingredient {
    pub fn from_new(id: u64, new: NewIngredient) -> Self {
        Ingredient {
            id,
            name: new.name,
            description: new.description,
            is_alcoholic: new.is_alcoholic,
        }
    }

    pub fn apply_patch(&mut self, patch: IngredientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(is_alcoholic) = patch.is_alcoholic {
            self.is_alcoholic = is_alcoholic;
        }
    }
}
