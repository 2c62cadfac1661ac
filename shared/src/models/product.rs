//! Product Model
//!
//! Products live one per spreadsheet row with a fixed, positional column
//! layout:
//!
//! | Col | 1  | 2      | 3     | 4         | 5        | 6        | 7        |
//! |-----|----|--------|-------|-----------|----------|----------|----------|
//! |     | id | detail | price | image_url | supplier | category | quantity |

use serde::{Deserialize, Serialize};

/// Fixed 1-based spreadsheet columns of a product row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum ProductColumn {
    Id = 1,
    Detail = 2,
    Price = 3,
    ImageUrl = 4,
    Supplier = 5,
    Category = 6,
    Quantity = 7,
}

impl ProductColumn {
    /// Number of columns in a product row
    pub const COUNT: usize = 7;

    /// 1-based column index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Product as returned by the list endpoint
///
/// Prices stay text; nothing on the read path parses them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub detail: String,
    pub price: String,
    pub image_url: String,
}

/// Text fields of a create request
///
/// Serialized as-is for the 201 echo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub detail: String,
    pub price: String,
    pub supplier: String,
    pub category: String,
    pub quantity: String,
}

impl ProductForm {
    /// Multipart text fields that must be present on create
    pub const FIELDS: [&'static str; 5] = ["detail", "price", "supplier", "category", "quantity"];

    /// Build the spreadsheet row for this product
    ///
    /// Column order follows [`ProductColumn`].
    pub fn into_row(self, id: impl Into<String>, image_url: impl Into<String>) -> Vec<String> {
        vec![
            id.into(),
            self.detail,
            self.price,
            image_url.into(),
            self.supplier,
            self.category,
            self.quantity,
        ]
    }
}

/// Zip three parallel columns into products
///
/// Pairing is positional and stops at the shortest column, so a row that is
/// only partially written when the columns are read gets dropped rather than
/// padded.
pub fn products_from_columns(
    details: Vec<String>,
    prices: Vec<String>,
    image_urls: Vec<String>,
) -> Vec<Product> {
    details
        .into_iter()
        .zip(prices)
        .zip(image_urls)
        .map(|((detail, price), image_url)| Product {
            detail,
            price,
            image_url,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_equal_columns_one_product_per_row() {
        let products = products_from_columns(
            strings(&["a", "b"]),
            strings(&["1", "2"]),
            strings(&["u1", "u2"]),
        );

        let json = serde_json::to_value(&products).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"detail": "a", "price": "1", "image_url": "u1"},
                {"detail": "b", "price": "2", "image_url": "u2"},
            ])
        );
    }

    #[test]
    fn test_unequal_columns_truncate_to_shortest() {
        let products = products_from_columns(
            strings(&["a", "b", "c"]),
            strings(&["1", "2"]),
            strings(&["u1", "u2", "u3", "u4"]),
        );
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].detail, "b");
        assert_eq!(products[1].image_url, "u2");

        let products = products_from_columns(strings(&["a"]), vec![], strings(&["u1"]));
        assert!(products.is_empty());
    }

    #[test]
    fn test_blank_cells_are_kept() {
        let products = products_from_columns(
            strings(&["a", ""]),
            strings(&["", "2"]),
            strings(&["u1", "u2"]),
        );
        assert_eq!(products[0].price, "");
        assert_eq!(products[1].detail, "");
    }

    #[test]
    fn test_into_row_column_order() {
        let form = ProductForm {
            detail: "Mug".into(),
            price: "9.50".into(),
            supplier: "Acme".into(),
            category: "Kitchen".into(),
            quantity: "12".into(),
        };

        let row = form.into_row("id-1", "https://img/1.jpg");
        assert_eq!(row.len(), ProductColumn::COUNT);
        assert_eq!(row[ProductColumn::Id.index() - 1], "id-1");
        assert_eq!(row[ProductColumn::Detail.index() - 1], "Mug");
        assert_eq!(row[ProductColumn::Price.index() - 1], "9.50");
        assert_eq!(row[ProductColumn::ImageUrl.index() - 1], "https://img/1.jpg");
        assert_eq!(row[ProductColumn::Supplier.index() - 1], "Acme");
        assert_eq!(row[ProductColumn::Category.index() - 1], "Kitchen");
        assert_eq!(row[ProductColumn::Quantity.index() - 1], "12");
    }

    #[test]
    fn test_read_columns() {
        assert_eq!(ProductColumn::Detail.index(), 2);
        assert_eq!(ProductColumn::Price.index(), 3);
        assert_eq!(ProductColumn::ImageUrl.index(), 4);
    }
}
