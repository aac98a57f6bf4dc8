use super::ui;
use crate::core::conversion::{HOME_CURRENCY, convert};
use crate::core::rates::Rates;
use crate::service::{BASE_CURRENCY, ExchangeService};
use anyhow::Result;
use comfy_table::Cell;

/// Table of `currencies` with their USD rate and the CNY value of one unit.
pub fn render_rates(rates: &Rates, currencies: &[String]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Per 1 {BASE_CURRENCY}")),
        ui::header_cell(&format!("1 unit in {HOME_CURRENCY}")),
    ]);

    for code in currencies {
        let rate = rates.get(code).copied();
        let in_home = rate
            .filter(|_| rates.contains_key(HOME_CURRENCY))
            .map(|_| convert(1.0, code, HOME_CURRENCY, rates));
        table.add_row(vec![
            Cell::new(code),
            ui::format_optional_cell(rate, |r| format!("{r:.4}")),
            ui::format_optional_cell(in_home, |v| format!("{v:.4}")),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Exchange Rates", ui::StyleType::Title),
        table
    )
}

pub async fn run(service: &ExchangeService, currencies: &[String]) -> Result<()> {
    let pb = ui::new_spinner("Fetching rates...");
    let rates = service.get_rates().await;
    pb.finish_and_clear();

    println!("{}", render_rates(&rates, currencies));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rates::default_rates;

    #[test]
    fn test_render_rates_lists_requested_codes() {
        let codes = vec!["USD".to_string(), "JPY".to_string(), "XYZ".to_string()];
        let output = render_rates(&default_rates(), &codes);

        assert!(output.contains("Exchange Rates"));
        assert!(output.contains("150.0000"));
        assert!(output.contains("7.2500"));
        assert!(output.contains("XYZ"));
        assert!(output.contains("N/A"));
    }
}
