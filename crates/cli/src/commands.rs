use anyhow::{Context, Result};

use carconfig_cli::{edit, output, report};
use carconfig_core::SessionId;
use carconfig_infra::Configurator;

use crate::cli::{BrowseArgs, BuildArgs, CatalogArgs};

pub fn run_categories(service: &Configurator) -> Result<()> {
    print!("{}", report::names(service.categories().iter().map(String::as_str)));
    Ok(())
}

pub async fn run_browse(service: &Configurator, args: &BrowseArgs) -> Result<()> {
    tracing::debug!(category = %args.category, "browsing catalog");
    let id = open_with_category(service, &args.category).await?;

    let text = match (&args.model, &args.powertrain, &args.trim) {
        (None, _, _) => {
            let session = service.snapshot(id)?;
            let catalog = session.catalog().context("catalog not loaded")?;
            report::models(catalog)
        }
        (Some(model), None, _) => {
            service.choose_model(id, model)?;
            let session = service.snapshot(id)?;
            let catalog = session.catalog().context("catalog not loaded")?;
            report::powertrains(catalog.resolve_model(model)?)
        }
        (Some(model), Some(powertrain), None) => {
            service.choose_model(id, model)?;
            service.choose_powertrain(id, powertrain)?;
            let session = service.snapshot(id)?;
            let catalog = session.catalog().context("catalog not loaded")?;
            let powertrain = catalog.resolve_model(model)?.resolve_powertrain(powertrain)?;
            report::trims(powertrain, session.unit())
        }
        (Some(model), Some(powertrain), Some(trim)) => {
            service.choose_model(id, model)?;
            service.choose_powertrain(id, powertrain)?;
            service.choose_trim(id, trim)?;
            let session = service.snapshot(id)?;
            let (powertrain, _) = session.current_trim().context("trim not selected")?;
            report::trim_details(powertrain, &session.option_views()?, session.unit())
        }
    };

    service.close_session(id)?;
    print!("{text}");
    Ok(())
}

pub async fn run_build(service: &Configurator, args: &BuildArgs) -> Result<()> {
    tracing::debug!(category = %args.category, model = %args.model, "building configuration");
    let id = open_with_category(service, &args.category).await?;

    service.choose_model(id, &args.model)?;
    service.choose_powertrain(id, &args.powertrain)?;
    service.choose_trim(id, &args.trim)?;
    for option in &args.options {
        service
            .set_option(id, option, true)
            .with_context(|| format!("check option '{option}'"))?;
    }
    if let Some(color) = &args.color {
        service.choose_color(id, Some(color))?;
    }

    let session = service.snapshot(id)?;
    service.close_session(id)?;
    let record = session.export();
    print!(
        "{}",
        report::summary(&record.pricing, session.selection().selected_option_count())
    );

    match &args.output {
        Some(requested) => {
            let path = output::write_export(requested, &record).await?;
            println!("Saved {}", path.display());
        }
        None => println!("{}", record.to_json_pretty().context("serialize configuration")?),
    }
    Ok(())
}

pub async fn run_catalog(service: &Configurator, args: &CatalogArgs) -> Result<()> {
    let edited = match &args.apply {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("read {}", path.display()))?,
        ),
        None => None,
    };

    let text = edit::catalog_document(service, &args.category, edited.as_deref()).await?;
    match &args.output {
        Some(requested) => {
            let path = output::write_catalog(requested, &text).await?;
            println!("Saved {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

async fn open_with_category(service: &Configurator, category: &str) -> Result<SessionId> {
    let id = service.open_session()?;
    service
        .choose_category(id, category)
        .await
        .with_context(|| format!("load category '{category}'"))?;
    Ok(id)
}
