//! Translation of external request parameters into filter and sort operations.

use crate::collection;
use crate::error::{CocktailDbError, Result};
use crate::schema::{
    Cocktail, CocktailPredicate, Ingredient, IngredientPredicate, Record, SortField,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// Direction applied together with a sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Ascending),
            "desc" => Ok(SortOrder::Descending),
            _ => Err(CocktailDbError::InvalidQuery(format!(
                "order must be 'asc' or 'desc', got '{value}'"
            ))),
        }
    }
}

/// A validated filter/sort specification for one record kind.
#[derive(Debug, Clone)]
pub struct Query<K: Record> {
    pub predicates: Vec<K::Predicate>,
    pub sort: Option<K::Field>,
    pub order: SortOrder,
}

impl<K: Record> Default for Query<K> {
    fn default() -> Self {
        Query {
            predicates: Vec::new(),
            sort: None,
            order: SortOrder::Ascending,
        }
    }
}

impl<K: Record> Query<K> {
    /// Match everything, keep stored order
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with(mut self, predicate: K::Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn sorted_by(mut self, field: K::Field, order: SortOrder) -> Self {
        self.sort = Some(field);
        self.order = order;
        self
    }

    /// Filter first, then sort the survivors.
    pub fn apply(&self, records: Vec<K>) -> Vec<K> {
        let mut records = collection::filter(records, &self.predicates);

        let descending = self.order == SortOrder::Descending;
        let field = match self.sort {
            Some(field) => Some(field),
            None if descending => Some(<K::Field as SortField>::ID),
            None => None,
        };
        if let Some(field) = field {
            collection::sort_by(&mut records, field, descending);
        }
        records
    }
}

/// Raw query-string parameters for one record kind.
pub trait QueryParams: DeserializeOwned {
    type Record: Record;

    fn translate(&self) -> Result<Query<Self::Record>>;

    /// Build from loose `key=value` pairs, ignoring keys the kind does not know.
    fn from_pairs(pairs: &HashMap<String, String>) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(map))
            .map_err(|e| CocktailDbError::InvalidQuery(e.to_string()))
    }
}

/// `GET /cocktails` parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CocktailParams {
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "ingredientName")]
    pub ingredient_name: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl QueryParams for CocktailParams {
    type Record = Cocktail;

    fn translate(&self) -> Result<Query<Cocktail>> {
        let mut query = Query::<Cocktail>::all();

        if let Some(name) = non_empty(&self.name) {
            query = query.with(CocktailPredicate::NameContains(name.to_string()));
        }
        if let Some(category) = non_empty(&self.category) {
            query = query.with(CocktailPredicate::CategoryIs(category.to_string()));
        }
        if let Some(ingredient) = non_empty(&self.ingredient_name) {
            query = query.with(CocktailPredicate::HasIngredient(ingredient.to_string()));
        }

        apply_sort(query, self.sort_by.as_deref(), self.order.as_deref())
    }
}

/// `GET /ingredients` parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientParams {
    pub name: Option<String>,
    pub is_alcoholic: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl QueryParams for IngredientParams {
    type Record = Ingredient;

    fn translate(&self) -> Result<Query<Ingredient>> {
        let mut query = Query::<Ingredient>::all();

        if let Some(name) = non_empty(&self.name) {
            query = query.with(IngredientPredicate::NameContains(name.to_string()));
        }
        if let Some(flag) = &self.is_alcoholic {
            query = query.with(IngredientPredicate::IsAlcoholic(parse_flag(flag)?));
        }

        apply_sort(query, self.sort_by.as_deref(), self.order.as_deref())
    }
}

fn apply_sort<K: Record>(
    mut query: Query<K>,
    sort_by: Option<&str>,
    order: Option<&str>,
) -> Result<Query<K>> {
    if let Some(order) = order {
        query.order = SortOrder::parse(order)?;
    }
    if let Some(key) = sort_by {
        let field = <K::Field as SortField>::parse(key).ok_or_else(|| {
            let known: Vec<&str> = <K::Field as SortField>::ALL
                .iter()
                .map(|f| f.name())
                .collect();
            CocktailDbError::InvalidQuery(format!(
                "cannot sort {} by '{key}' (expected one of: {})",
                K::KIND.collection_name(),
                known.join(", ")
            ))
        })?;
        query.sort = Some(field);
    }
    Ok(query)
}

fn parse_flag(value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(CocktailDbError::InvalidQuery(format!(
            "is_alcoholic must be 'true' or 'false', got '{value}'"
        )))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
