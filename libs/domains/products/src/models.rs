use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// A persisted product. `id` is assigned by the store and never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

impl Product {
    /// Replace name and price, keeping the id.
    pub fn with_details(self, details: NewProduct) -> Self {
        Self {
            id: self.id,
            name: details.name,
            price: details.price,
        }
    }
}

/// A product that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
}

/// Product as seen by API clients.
///
/// `id` is ignored on create and update requests and always set in responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ProductView {
    #[serde(default)]
    #[schema(example = 1, read_only)]
    pub id: Option<i64>,

    #[validate(custom(function = "not_blank"))]
    #[schema(example = "Standing desk")]
    pub name: String,

    /// Any number, negative values included
    #[schema(example = 349.99)]
    pub price: f64,
}

impl ProductView {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("name must not be blank".into());
        return Err(err);
    }
    Ok(())
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name,
            price: product.price,
        }
    }
}

/// Drops any client-supplied id; the store assigns one.
impl From<ProductView> for NewProduct {
    fn from(view: ProductView) -> Self {
        Self {
            name: view.name,
            price: view.price,
        }
    }
}
