pub mod collection;
pub mod document;
pub mod error;
pub mod query;
pub mod schema;
pub mod store;
pub mod validation;

pub use document::Document;
pub use error::{CocktailDbError, Result};
pub use query::{CocktailParams, IngredientParams, Query, QueryParams, SortOrder};
pub use schema::{Cocktail, Ingredient, IngredientQuantity, Record, RecordKind};
pub use store::Store;
