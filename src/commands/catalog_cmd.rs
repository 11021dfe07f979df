use std::process::ExitCode;

use tracing::debug;

use crate::commands::base_commands::CatalogAction;
use crate::commands::report_format::format_product_table;
use crate::domain::product::ProductDetails;
use crate::services::key_value_store::JsonFileStore;
use crate::services::product_catalog::{CatalogError, ProductCatalog};

pub fn catalog_command(store_path: &str, action: CatalogAction) -> ExitCode {
    let store = match JsonFileStore::open(store_path) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to open catalog store: {e}");
            return ExitCode::FAILURE;
        }
    };
    let mut catalog = match ProductCatalog::open(store) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Failed to load product catalog: {e}");
            return ExitCode::FAILURE;
        }
    };
    debug!(store = store_path, products = catalog.list().len(), "catalog opened");

    match run_action(&mut catalog, action) {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to run catalog command: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_action(
    catalog: &mut ProductCatalog<JsonFileStore>,
    action: CatalogAction,
) -> Result<String, CatalogError> {
    match action {
        CatalogAction::List => Ok(format_product_table(catalog.list())),
        CatalogAction::Show { id } => {
            let product = catalog.get(id)?;
            serde_yaml::to_string(product).map_err(CatalogError::Render)
        }
        CatalogAction::Add(fields) => {
            let mut details = ProductDetails::new();
            fields.apply_to(&mut details);
            let product = catalog.add(details)?;
            Ok(format!("Product {} added", product.id))
        }
        CatalogAction::Update { id, fields } => {
            let mut details = catalog.get(id)?.details.clone();
            fields.apply_to(&mut details);
            let product = catalog.update(id, details)?;
            Ok(format!("Product {} updated", product.id))
        }
        CatalogAction::Remove { id } => {
            let product = catalog.remove(id)?;
            Ok(format!("Product {} removed: {}", product.id, product.details.name_en))
        }
        CatalogAction::Reset => {
            catalog.reset()?;
            Ok(format!("Product catalog reset to {} default products", catalog.list().len()))
        }
    }
}
