pub mod build;
pub mod feedback;
pub mod fetch;
pub mod frontmatter;
pub mod model;
pub mod source;
pub mod transform;
pub mod writer;

pub use build::{
    BuildError, BuildReport, GenerateReport, build_categories, build_products, generate,
};
pub use feedback::Feedback;
pub use fetch::{PRODUCT_PAGE_SIZE, Pagination};
pub use frontmatter::{
    FrontmatterError, ParsedDocument, parse as parse_frontmatter, render as render_frontmatter,
};
pub use model::{
    Asset, AssetKind, Category, CategoryList, CategoryPair, Price, Product, ProductPage,
    ProductSummary, Variant,
};
pub use source::{CatalogSource, FetchError};
pub use writer::{OutputLayout, WriteError, write_document};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
