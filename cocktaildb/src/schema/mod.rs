// Record kinds and the traits the collection logic is generic over

pub mod fields;
pub mod types;

pub use fields::{CocktailField, CocktailPredicate, IngredientField, IngredientPredicate};
pub use types::{
    Cocktail, CocktailPatch, Ingredient, IngredientPatch, IngredientQuantity, NewCocktail,
    NewIngredient,
};

use crate::document::Document;
use crate::validation::{self, ValidationResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// The two entity types stored in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Cocktail,
    Ingredient,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Cocktail, RecordKind::Ingredient];

    /// Top-level key of this kind's collection in the document
    pub fn collection_name(self) -> &'static str {
        match self {
            RecordKind::Cocktail => "cocktails",
            RecordKind::Ingredient => "ingredients",
        }
    }

    pub fn from_collection_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection_name() == name)
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Cocktail => f.write_str("Cocktail"),
            RecordKind::Ingredient => f.write_str("Ingredient"),
        }
    }
}

/// An enumerated, sortable field of a record kind with its typed comparison.
pub trait SortField: Copy + Eq + fmt::Debug + Sized + 'static {
    type Record;

    /// Every sortable field, in declaration order
    const ALL: &'static [Self];
    /// The identifier field
    const ID: Self;

    /// Field name as it appears on the wire and in storage
    fn name(self) -> &'static str;

    fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    fn compare(self, a: &Self::Record, b: &Self::Record) -> Ordering;
}

/// A single field-level matching rule.
pub trait Matcher {
    type Record;

    fn matches(&self, record: &Self::Record) -> bool;
}

/// A record kind stored in one of the document's collections.
pub trait Record: Clone + fmt::Debug + Serialize + DeserializeOwned {
    /// Creation payload (everything but the id)
    type New: DeserializeOwned;
    /// Partial record used by updates
    type Patch: Default + DeserializeOwned;
    type Field: SortField<Record = Self>;
    type Predicate: Matcher<Record = Self> + Clone + fmt::Debug;

    const KIND: RecordKind;

    fn id(&self) -> u64;

    fn from_new(id: u64, new: Self::New) -> Self;

    fn apply_patch(&mut self, patch: Self::Patch);

    /// Required-field and type checks for a raw creation payload
    fn validate(data: &serde_json::Value) -> ValidationResult;

    fn collection(doc: &Document) -> &Vec<Self>;

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self>;
}

impl Record for Cocktail {
    type New = NewCocktail;
    type Patch = CocktailPatch;
    type Field = CocktailField;
    type Predicate = CocktailPredicate;

    const KIND: RecordKind = RecordKind::Cocktail;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_new(id: u64, new: NewCocktail) -> Self {
        Cocktail::from_new(id, new)
    }

    fn apply_patch(&mut self, patch: CocktailPatch) {
        Cocktail::apply_patch(self, patch)
    }

    fn validate(data: &serde_json::Value) -> ValidationResult {
        validation::validate_cocktail(data)
    }

    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.cocktails
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.cocktails
    }
}

impl Record for Ingredient {
    type New = NewIngredient;
    type Patch = IngredientPatch;
    type Field = IngredientField;
    type Predicate = IngredientPredicate;

    const KIND: RecordKind = RecordKind::Ingredient;

    fn id(&self) -> u64 {
        self.id
    }

    fn from_new(id: u64, new: NewIngredient) -> Self {
        Ingredient::from_new(id, new)
    }

    fn apply_patch(&mut self, patch: IngredientPatch) {
        Ingredient::apply_patch(self, patch)
    }

    fn validate(data: &serde_json::Value) -> ValidationResult {
        validation::validate_ingredient(data)
    }

    fn collection(doc: &Document) -> &Vec<Self> {
        &doc.ingredients
    }

    fn collection_mut(doc: &mut Document) -> &mut Vec<Self> {
        &mut doc.ingredients
    }
}
