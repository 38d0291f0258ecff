//! Product catalog handler.

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::Client;

#[derive(Serialize)]
struct ProductEntry {
    classid: String,
    product: Value,
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "Class")]
    classid: String,
    #[tabled(rename = "Product")]
    name: String,
}

impl From<&ProductEntry> for ProductRow {
    fn from(entry: &ProductEntry) -> Self {
        Self {
            classid: entry.classid.clone(),
            name: entry
                .product
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("-")
                .to_owned(),
        }
    }
}

pub async fn handle(client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    let mut entries: Vec<ProductEntry> = client
        .get_product_iot_map()
        .await?
        .into_iter()
        .map(|(classid, product)| ProductEntry { classid, product })
        .collect();
    entries.sort_by(|a, b| a.classid.cmp(&b.classid));

    let out = output::render_list(
        &global.output,
        &entries,
        |e| ProductRow::from(e),
        |e| e.classid.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
