use super::ui;
use crate::converter::CurrencyConverter;
use crate::core::{FeedOrigin, RateTable};
use anyhow::Result;
use comfy_table::Cell;

impl RateTable {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell("Symbol"),
            ui::header_cell(&format!("Rate (per 1 {})", self.base_currency)),
        ]);

        for entry in &self.entries {
            table.add_row(vec![
                Cell::new(&entry.currency),
                ui::format_optional_cell(entry.symbol.as_deref(), str::to_string),
                ui::number_cell(format!("{:.4}", entry.rate)),
            ]);
        }

        let date = self
            .date
            .map_or("unknown date".to_string(), |d| d.format("%Y-%m-%d").to_string());
        let mut output = format!(
            "Reference rates: {} ({})\n\n",
            ui::style_text(&self.base_currency, ui::StyleType::Title),
            ui::style_text(&date, ui::StyleType::Subtle)
        );
        output.push_str(&table.to_string());

        if self.origin == FeedOrigin::Fallback {
            output.push_str(&format!(
                "\n\n{}",
                ui::style_text(
                    "Feed unavailable, showing stored reference rates",
                    ui::StyleType::Warning
                )
            ));
        }
        output
    }
}

pub async fn run(converter: &CurrencyConverter, json: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching reference rates...");
    let table = converter.get_all_currencies().await;
    pb.finish_and_clear();
    let table = table?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("{}", table.display_as_table());
    }
    Ok(())
}

pub async fn run_base(converter: &CurrencyConverter, json: bool) -> Result<()> {
    let base = converter.get_base_currency().await;
    if json {
        println!("{}", serde_json::to_string_pretty(&base)?);
    } else {
        println!(
            "Base currency: {}",
            ui::style_text(&base.currency, ui::StyleType::TotalLabel)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RateEntry;

    fn table(origin: FeedOrigin) -> RateTable {
        RateTable {
            base_currency: "USD".to_string(),
            date: chrono::NaiveDate::from_ymd_opt(2023, 4, 20),
            origin,
            entries: vec![
                RateEntry {
                    currency: "USD".to_string(),
                    rate: 1.0,
                    symbol: Some("$".to_string()),
                },
                RateEntry {
                    currency: "XAU".to_string(),
                    rate: 0.00051234,
                    symbol: None,
                },
            ],
        }
    }

    #[test]
    fn test_display_as_table() {
        console::set_colors_enabled(false);
        let output = table(FeedOrigin::Live).display_as_table();
        assert!(output.contains("Reference rates: USD (2023-04-20)"));
        assert!(output.contains("Rate (per 1 USD)"));
        assert!(output.contains("1.0000"));
        assert!(output.contains("0.0005"));
        assert!(output.contains("N/A"));
        assert!(!output.contains("Feed unavailable"));
    }

    #[test]
    fn test_display_marks_fallback() {
        console::set_colors_enabled(false);
        let output = table(FeedOrigin::Fallback).display_as_table();
        assert!(output.contains("Feed unavailable, showing stored reference rates"));
    }
}
