use super::{normalize_code, record_action, ui};
use crate::core::conversion::{HOME_CURRENCY, PriceSuggestion, parse_amount, suggest_prices};
use crate::core::history::record_type;
use crate::service::ExchangeService;
use anyhow::Result;
use comfy_table::Cell;
use serde_json::{Map, json};

pub fn render_suggestions(cost_cny: f64, suggestions: &[PriceSuggestion]) -> String {
    let title = ui::style_text(
        &format!("Suggested Prices for cost {cost_cny:.2} {HOME_CURRENCY}"),
        ui::StyleType::Title,
    );
    if suggestions.is_empty() {
        return format!(
            "{title}\n\n{}",
            ui::style_text("No valid markets given.", ui::StyleType::Error)
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Market"),
        ui::header_cell("Margin (%)"),
        ui::header_cell("Local Price"),
        ui::header_cell(&format!("Price ({HOME_CURRENCY})")),
    ]);

    for s in suggestions {
        table.add_row(vec![
            Cell::new(&s.market),
            ui::number_cell(format!("{}", s.margin_percent)),
            ui::highlight_cell(format!("{:.2} {}", s.price_local, s.market)),
            ui::number_cell(format!("{:.2}", s.price_cny)),
        ]);
    }

    format!("{title}\n\n{table}")
}

/// Suggests sale prices. `cost` must be a number; `markets` and `margins` are
/// parallel, and rows with a non-numeric margin are dropped.
pub async fn run(
    service: &ExchangeService,
    cost: &str,
    markets: &[String],
    margins: &[String],
) -> Result<()> {
    let cost_cny = parse_amount(cost, "cost")?;
    let rows: Vec<(String, String)> = markets
        .iter()
        .zip(margins)
        .map(|(market, margin)| (normalize_code(market), margin.clone()))
        .collect();

    let pb = ui::new_spinner("Fetching rates...");
    let rates = service.get_rates().await;
    pb.finish_and_clear();

    let suggestions = suggest_prices(cost_cny, &rows, &rates);

    let mut details = Map::new();
    details.insert("cost_cny".to_string(), json!(cost_cny));
    details.insert("markets_count".to_string(), json!(suggestions.len()));
    record_action(service.history(), record_type::SMART_PRICING, details).await;

    println!("{}", render_suggestions(cost_cny, &suggestions));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_suggestions() {
        let suggestions = vec![PriceSuggestion {
            market: "EUR".to_string(),
            margin_percent: 10.0,
            price_local: 13.96,
            price_cny: 110.0,
        }];
        let output = render_suggestions(100.0, &suggestions);
        assert!(output.contains("100.00 CNY"));
        assert!(output.contains("13.96 EUR"));
        assert!(output.contains("110.00"));
    }
}
