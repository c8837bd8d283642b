//! Catalog document round trip through the service.

use std::sync::Arc;

use carconfig_catalog::Catalog;
use carconfig_cli::{edit, output};
use carconfig_infra::{Configurator, InMemoryCatalogSource, Settings};

const EV: &str = r#"{ "Ioniq 5": { "Long Range": { "Prestige": { "가격": 5900, "옵션": {
    "Vision Roof": { "value": 90 }
} } } } }"#;

fn service() -> Configurator {
    Configurator::with_source(
        &Settings::default(),
        Arc::new(InMemoryCatalogSource::new().with("EV", EV)),
    )
}

#[tokio::test]
async fn prints_the_loaded_catalog() {
    let text = edit::catalog_document(&service(), "EV", None).await.unwrap();
    assert_eq!(
        Catalog::from_json_str(&text).unwrap(),
        Catalog::from_json_str(EV).unwrap()
    );
}

#[tokio::test]
async fn applies_a_valid_edit() {
    let edited = EV.replace("5900", "6100");
    let text = edit::catalog_document(&service(), "EV", Some(&edited)).await.unwrap();
    let catalog = Catalog::from_json_str(&text).unwrap();
    let (_, trim) = catalog.resolve_trim("Ioniq 5", "Long Range", "Prestige").unwrap();
    assert_eq!(trim.base_price, 6100);
}

#[tokio::test]
async fn rejects_a_malformed_edit() {
    let err = edit::catalog_document(&service(), "EV", Some(r#"{ "Ioniq 5": 3 }"#))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "apply edited catalog");
    assert!(format!("{err:#}").contains("malformed catalog at $.Ioniq 5"));
}

#[tokio::test]
async fn unknown_category_fails_to_load() {
    let err = edit::catalog_document(&service(), "PBV", None).await.unwrap_err();
    assert_eq!(err.to_string(), "load category 'PBV'");
}

#[tokio::test]
async fn saved_catalog_uses_default_name_in_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = output::write_catalog(dir.path(), EV).await.unwrap();
    assert_eq!(path, dir.path().join(output::CATALOG_FILE_NAME));
    assert_eq!(std::fs::read_to_string(path).unwrap(), format!("{EV}\n"));
}
