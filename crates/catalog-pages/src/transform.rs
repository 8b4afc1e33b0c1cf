use chrono::NaiveDate;

use crate::model::Product;

/// Reshape a product detail response into its page document.
///
/// The wire `name` becomes the page `title` (and is dropped from the
/// output), and `date` is stamped with the generation day.
pub fn into_page(mut product: Product, today: NaiveDate) -> Product {
    product.title = std::mem::take(&mut product.name);
    product.date = Some(today);
    product
}
