//! Catalog document round trip: load a category, optionally apply an edited
//! document, and hand back the text that is now active.

use anyhow::{Context, Result};

use carconfig_infra::Configurator;

pub async fn catalog_document(service: &Configurator, category: &str, edited: Option<&str>) -> Result<String> {
    let id = service.open_session()?;
    service
        .choose_category(id, category)
        .await
        .with_context(|| format!("load category '{category}'"))?;

    if let Some(text) = edited {
        service
            .replace_catalog_text(id, text)
            .context("apply edited catalog")?;
        tracing::info!(category, "edited catalog applied");
    }

    let text = service.catalog_text(id)?.context("catalog not loaded")?;
    service.close_session(id)?;
    Ok(text)
}
