use anyhow::{Context, Result};
use catalog_pages::{CatalogSource, Feedback, GenerateReport};
use catalog_pages_http::StoreApiClient;
use chrono::NaiveDate;

use crate::config::GenerateSettings;

/// Print feedback items to stderr.
pub fn print_feedback(feedback: &[Feedback]) {
    for item in feedback {
        eprintln!("{item}");
    }
}

/// Generate category and product pages, printing progress to stdout and
/// skipped items to stderr.
pub async fn run(settings: &GenerateSettings, today: NaiveDate) -> Result<GenerateReport> {
    let client = StoreApiClient::new(&settings.endpoint, &settings.store_key);
    println!("Generating pages from {}...", client.label());

    // Category feedback is printed before the product pass starts.
    let categories = catalog_pages::build_categories(&client, &settings.layout)
        .await
        .context("page generation failed")?;
    print_feedback(&categories.feedback);

    let products = catalog_pages::build_products(&client, &settings.layout, today)
        .await
        .context("page generation failed")?;
    print_feedback(&products.feedback);

    let report = GenerateReport {
        categories,
        products,
    };

    println!(
        "Wrote {} category pages and {} product pages ({} skipped) to {}.",
        report.categories.written,
        report.products.written,
        report.categories.skipped + report.products.skipped,
        settings.layout.output_dir.display()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use catalog_pages::{OutputLayout, PRODUCT_PAGE_SIZE};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn settings_for(server: &MockServer, name: &str) -> GenerateSettings {
        let dir = std::env::temp_dir().join(format!("catalog-pages-cli-{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        GenerateSettings {
            endpoint: server.uri(),
            store_key: "cli-key".into(),
            layout: OutputLayout::new(dir, "categories", "products"),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[tokio::test]
    async fn generate_writes_both_kinds_of_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/categories"))
            .and(header("Store-Key", "cli-key"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"categories":[{"id":1,"slug":"tools","name":"Tools"}]}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/products/0/{PRODUCT_PAGE_SIZE}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"products":[{"slug":"hammer","name":"Hammer"}],"total_records":1,"total_pages":1}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/product/slug/hammer"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"slug":"hammer","name":"Hammer"}"#),
            )
            .mount(&server)
            .await;

        let settings = settings_for(&server, "ok");
        let report = run(&settings, today()).await.unwrap();

        let out = &settings.layout.output_dir;
        assert_eq!(report.categories.written, 1);
        assert_eq!(report.products.written, 1);
        assert!(out.join("categories/tools/_index.md").exists());
        assert!(out.join("products/hammer.md").exists());

        let _ = std::fs::remove_dir_all(out);
    }

    #[tokio::test]
    async fn product_listing_error_keeps_category_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"categories":[{"id":1,"slug":"tools"},{"id":2,"slug":".."}]}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/v1/products/0/{PRODUCT_PAGE_SIZE}")))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let settings = settings_for(&server, "products-fail");
        let err = run(&settings, today()).await.unwrap_err();

        assert!(err.to_string().contains("page generation failed"));
        let out = &settings.layout.output_dir;
        assert!(out.join("categories/tools/_index.md").exists());
        assert!(!out.join("products").exists());

        let _ = std::fs::remove_dir_all(out);
    }

    #[tokio::test]
    async fn category_server_error_fails_the_run() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/categories"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let settings = settings_for(&server, "fail");
        let err = run(&settings, today()).await.unwrap_err();

        assert!(err.to_string().contains("page generation failed"));
        assert!(!settings.layout.output_dir.exists());
    }
}
