use super::ui;
use crate::converter::{ConvertRequest, CurrencyConverter, RateRequest};
use crate::core::{Conversion, ExchangeRate};
use anyhow::Result;

impl Conversion {
    pub fn display(&self, from_currency: &str, original_amount: f64) -> String {
        format!(
            "{} {} = {} {}\n{}",
            original_amount,
            from_currency,
            ui::style_text(&self.amount.to_string(), ui::StyleType::TotalValue),
            ui::style_text(&self.currency, ui::StyleType::TotalLabel),
            ui::style_text(
                &format!(
                    "1 {} = {} {}",
                    from_currency, self.exchange_rate, self.currency
                ),
                ui::StyleType::Subtle
            )
        )
    }
}

impl ExchangeRate {
    pub fn display(&self) -> String {
        format!(
            "1 {} = {} {}",
            self.from_currency,
            ui::style_text(&self.exchange_rate.to_string(), ui::StyleType::TotalValue),
            ui::style_text(&self.to_currency, ui::StyleType::TotalLabel)
        )
    }
}

pub async fn run(
    converter: &CurrencyConverter,
    request: &ConvertRequest,
    json: bool,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching reference rates...");
    let result = converter.convert(request).await;
    pb.finish_and_clear();
    let result = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.display(&request.from_currency, request.amount));
    }
    Ok(())
}

pub async fn run_rate(
    converter: &CurrencyConverter,
    request: &RateRequest,
    json: bool,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching reference rates...");
    let result = converter.get_exchange_rate(request).await;
    pb.finish_and_clear();
    let result = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.display());
    }
    Ok(())
}
