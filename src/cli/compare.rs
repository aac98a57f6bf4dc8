use super::{normalize_code, record_action, ui};
use crate::core::conversion::{ConversionQuote, HOME_CURRENCY, best_cost, compare_costs};
use crate::core::history::record_type;
use crate::service::ExchangeService;
use anyhow::Result;
use comfy_table::Cell;
use serde_json::{Map, json};

pub fn render_quotes(quotes: &[ConversionQuote]) -> String {
    if quotes.is_empty() {
        return ui::style_text("No valid quotes to compare.", ui::StyleType::Error);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Amount"),
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Cost ({HOME_CURRENCY})")),
        ui::header_cell("Best"),
    ]);

    for quote in quotes {
        let cost = format!("{:.2}", quote.cost_cny);
        table.add_row(vec![
            ui::number_cell(format!("{:.2}", quote.amount)),
            Cell::new(&quote.currency),
            if quote.is_best {
                ui::highlight_cell(cost)
            } else {
                ui::number_cell(cost)
            },
            Cell::new(if quote.is_best { "★" } else { "" }),
        ]);
    }

    format!(
        "{}\n\n{}\n\nLowest cost ({}): {}",
        ui::style_text("Purchase Cost Comparison", ui::StyleType::Title),
        table,
        ui::style_text(HOME_CURRENCY, ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{:.2}", best_cost(quotes)),
            ui::StyleType::TotalValue
        )
    )
}

/// Compares supplier quotes given as parallel `amounts` and `currencies`.
/// Extra entries on either side are ignored; rows whose amount is not a number
/// are dropped.
pub async fn run(service: &ExchangeService, amounts: &[String], currencies: &[String]) -> Result<()> {
    let rows: Vec<(String, String)> = amounts
        .iter()
        .zip(currencies)
        .map(|(amount, currency)| (amount.clone(), normalize_code(currency)))
        .collect();

    let pb = ui::new_spinner("Fetching rates...");
    let rates = service.get_rates().await;
    pb.finish_and_clear();

    let quotes = compare_costs(&rows, &rates);

    let mut details = Map::new();
    details.insert("total_options".to_string(), json!(quotes.len()));
    details.insert("best_price_cny".to_string(), json!(best_cost(&quotes)));
    record_action(service.history(), record_type::PURCHASE_COST_COMPARE, details).await;

    println!("{}", render_quotes(&quotes));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_quotes_shows_best() {
        let quotes = vec![
            ConversionQuote {
                amount: 100.0,
                currency: "USD".to_string(),
                cost_cny: 725.0,
                is_best: false,
            },
            ConversionQuote {
                amount: 700.0,
                currency: "CNY".to_string(),
                cost_cny: 700.0,
                is_best: true,
            },
        ];
        let output = render_quotes(&quotes);
        assert!(output.contains("725.00"));
        assert!(output.contains("★"));
        assert!(output.contains("Lowest cost"));
        assert!(output.contains("700.00"));
    }

    #[test]
    fn test_render_quotes_empty() {
        assert!(render_quotes(&[]).contains("No valid quotes"));
    }
}
