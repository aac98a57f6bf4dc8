use super::{normalize_code, record_action, ui};
use crate::core::conversion::convert;
use crate::core::history::record_type;
use crate::service::ExchangeService;
use anyhow::Result;
use serde_json::{Map, json};

pub async fn run(service: &ExchangeService, amount: f64, from: &str, to: &str) -> Result<()> {
    let from = normalize_code(from);
    let to = normalize_code(to);

    let pb = ui::new_spinner("Fetching rates...");
    let rates = service.get_rates().await;
    pb.finish_and_clear();

    let result = convert(amount, &from, &to, &rates);

    let mut details = Map::new();
    details.insert("amount".to_string(), json!(amount));
    details.insert("from".to_string(), json!(from));
    details.insert("to".to_string(), json!(to));
    details.insert("result".to_string(), json!(result));
    record_action(service.history(), record_type::CONVERT, details).await;

    println!(
        "Result: {amount} {from} = {}",
        ui::style_text(&format!("{result} {to}"), ui::StyleType::TotalValue)
    );
    for code in [&from, &to] {
        if !rates.contains_key(code.as_str()) {
            println!(
                "{}",
                ui::style_text(
                    &format!("No rate available for {code}"),
                    ui::StyleType::Subtle
                )
            );
        }
    }
    Ok(())
}
