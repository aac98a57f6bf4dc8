use super::{normalize_code, ui};
use crate::core::trend::{MAX_TREND_DAYS, TrendSeries};
use crate::service::ExchangeService;
use anyhow::{Result, bail};
use comfy_table::Cell;

pub fn render_trend(base: &str, target: &str, series: &TrendSeries) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell(&format!("{base}/{target}")),
    ]);
    for (label, value) in series.labels.iter().zip(&series.data) {
        table.add_row(vec![Cell::new(label), ui::number_cell(format!("{value:.4}"))]);
    }

    format!(
        "{}\n{}\n\n{}\n\nCurrent rate: {}",
        ui::style_text(&format!("{base}/{target} Trend"), ui::StyleType::Title),
        ui::style_text(
            "Simulated around the current rate; not historical data.",
            ui::StyleType::Subtle
        ),
        table,
        ui::style_text(&format!("{:.4}", series.rate), ui::StyleType::TotalValue)
    )
}

fn check_days(days: u32) -> Result<()> {
    if days == 0 {
        bail!("Invalid days: must be at least 1");
    }
    if days > MAX_TREND_DAYS {
        bail!("Invalid days: must be at most {MAX_TREND_DAYS}");
    }
    Ok(())
}

pub async fn run(service: &ExchangeService, base: &str, target: &str, days: u32) -> Result<()> {
    check_days(days)?;
    let base = normalize_code(base);
    let target = normalize_code(target);

    let pb = ui::new_spinner("Fetching rates...");
    let series = service.get_trend(&base, &target, days).await;
    pb.finish_and_clear();

    println!("{}", render_trend(&base, &target, &series));
    Ok(())
}
