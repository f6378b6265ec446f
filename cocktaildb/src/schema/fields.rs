use std::cmp::Ordering;

use super::types::{Cocktail, Ingredient};
use super::{Matcher, SortField};

/// Sortable cocktail fields. `ingredients` has no natural order and is not listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CocktailField {
    Id,
    Name,
    Category,
    Instructions,
}

impl SortField for CocktailField {
    type Record = Cocktail;

    const ALL: &'static [Self] = &[
        CocktailField::Id,
        CocktailField::Name,
        CocktailField::Category,
        CocktailField::Instructions,
    ];
    const ID: Self = CocktailField::Id;

    fn name(self) -> &'static str {
        match self {
            CocktailField::Id => "id",
            CocktailField::Name => "name",
            CocktailField::Category => "category",
            CocktailField::Instructions => "instructions",
        }
    }

    fn compare(self, a: &Cocktail, b: &Cocktail) -> Ordering {
        match self {
            CocktailField::Id => a.id.cmp(&b.id),
            CocktailField::Name => a.name.cmp(&b.name),
            CocktailField::Category => a.category.cmp(&b.category),
            CocktailField::Instructions => a.instructions.cmp(&b.instructions),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngredientField {
    Id,
    Name,
    Description,
    IsAlcoholic,
}

impl SortField for IngredientField {
    type Record = Ingredient;

    const ALL: &'static [Self] = &[
        IngredientField::Id,
        IngredientField::Name,
        IngredientField::Description,
        IngredientField::IsAlcoholic,
    ];
    const ID: Self = IngredientField::Id;

    fn name(self) -> &'static str {
        match self {
            IngredientField::Id => "id",
            IngredientField::Name => "name",
            IngredientField::Description => "description",
            IngredientField::IsAlcoholic => "is_alcoholic",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        if name == "desc" {
            return Some(IngredientField::Description);
        }
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    fn compare(self, a: &Ingredient, b: &Ingredient) -> Ordering {
        match self {
            IngredientField::Id => a.id.cmp(&b.id),
            IngredientField::Name => a.name.cmp(&b.name),
            IngredientField::Description => a.description.cmp(&b.description),
            // false < true
            IngredientField::IsAlcoholic => a.is_alcoholic.cmp(&b.is_alcoholic),
        }
    }
}

/// A single field-level rule derived from one cocktail query parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CocktailPredicate {
    /// Case-insensitive substring of the name
    NameContains(String),
    /// Case-insensitive exact category
    CategoryIs(String),
    /// Some embedded ingredient has this name (case-insensitive exact)
    HasIngredient(String),
}

impl Matcher for CocktailPredicate {
    type Record = Cocktail;

    fn matches(&self, cocktail: &Cocktail) -> bool {
        match self {
            CocktailPredicate::NameContains(needle) => contains_ignore_case(&cocktail.name, needle),
            CocktailPredicate::CategoryIs(category) => eq_ignore_case(&cocktail.category, category),
            CocktailPredicate::HasIngredient(name) => cocktail.has_ingredient(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngredientPredicate {
    NameContains(String),
    IsAlcoholic(bool),
}

impl Matcher for IngredientPredicate {
    type Record = Ingredient;

    fn matches(&self, ingredient: &Ingredient) -> bool {
        match self {
            IngredientPredicate::NameContains(needle) => {
                contains_ignore_case(&ingredient.name, needle)
            }
            IngredientPredicate::IsAlcoholic(flag) => ingredient.is_alcoholic == *flag,
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whiskey() -> Ingredient {
        Ingredient {
            id: 1,
            name: "Whiskey".into(),
            description: "Aged grain spirit".into(),
            is_alcoholic: true,
        }
    }

    fn lime() -> Ingredient {
        Ingredient {
            id: 2,
            name: "Lime".into(),
            description: "Citrus".into(),
            is_alcoholic: false,
        }
    }

    #[test]
    fn test_parse_known_fields() {
        assert_eq!(CocktailField::parse("name"), Some(CocktailField::Name));
        assert_eq!(CocktailField::parse("instructions"), Some(CocktailField::Instructions));
        assert_eq!(IngredientField::parse("is_alcoholic"), Some(IngredientField::IsAlcoholic));
        assert_eq!(IngredientField::parse("desc"), Some(IngredientField::Description));
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        assert_eq!(CocktailField::parse("ingredients"), None);
        assert_eq!(CocktailField::parse("Name"), None);
        assert_eq!(IngredientField::parse("category"), None);
        assert_eq!(IngredientField::parse(""), None);
    }

    #[test]
    fn test_boolean_field_orders_false_first() {
        assert_eq!(IngredientField::IsAlcoholic.compare(&lime(), &whiskey()), Ordering::Less);
        assert_eq!(IngredientField::Name.compare(&lime(), &whiskey()), Ordering::Less);
        assert_eq!(IngredientField::Id.compare(&lime(), &whiskey()), Ordering::Greater);
    }

    #[test]
    fn test_name_contains_is_case_insensitive() {
        let predicate = IngredientPredicate::NameContains("HISK".into());
        assert!(predicate.matches(&whiskey()));
        assert!(!predicate.matches(&lime()));
    }

    #[test]
    fn test_category_requires_whole_value() {
        let cocktail = Cocktail {
            id: 1,
            name: "Margarita".into(),
            category: "Cocktail".into(),
            instructions: "Shake.".into(),
            ingredients: vec![],
        };
        assert!(CocktailPredicate::CategoryIs("cocktail".into()).matches(&cocktail));
        assert!(!CocktailPredicate::CategoryIs("cock".into()).matches(&cocktail));
    }

    #[test]
    fn test_alcoholic_flag_is_exact() {
        assert!(IngredientPredicate::IsAlcoholic(true).matches(&whiskey()));
        assert!(!IngredientPredicate::IsAlcoholic(true).matches(&lime()));
        assert!(IngredientPredicate::IsAlcoholic(false).matches(&lime()));
    }
}
