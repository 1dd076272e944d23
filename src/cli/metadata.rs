use super::ui;
use crate::converter::CurrencyConverter;
use crate::core::CurrencyMetadata;
use anyhow::Result;
use comfy_table::Cell;

pub fn display_metadata_table(metadata: &[CurrencyMetadata]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Symbol"),
        ui::header_cell("Name"),
    ]);

    for record in metadata {
        table.add_row(vec![
            Cell::new(&record.code),
            Cell::new(&record.symbol),
            Cell::new(&record.name),
        ]);
    }
    table.to_string()
}

pub async fn run(converter: &CurrencyConverter, currency: Option<&str>, json: bool) -> Result<()> {
    let Some(code) = currency else {
        let metadata = converter.get_currencies_metadata().await?;
        if json {
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        } else {
            println!("{}", display_metadata_table(&metadata));
        }
        return Ok(());
    };

    match converter.get_currency_metadata(code).await? {
        Some(record) if json => println!("{}", serde_json::to_string_pretty(&record)?),
        Some(record) => println!("{}", display_metadata_table(std::slice::from_ref(&record))),
        None if json => println!("null"),
        None => println!(
            "{}",
            ui::style_text(
                &format!("No metadata found for currency {code}"),
                ui::StyleType::Warning
            )
        ),
    }
    Ok(())
}
