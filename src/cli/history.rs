use super::ui;
use crate::core::history::HistoryRecord;
use crate::service::ExchangeService;
use anyhow::Result;
use comfy_table::Cell;

pub fn render_history(records: &[HistoryRecord], filter: Option<&str>) -> String {
    let title = match filter {
        Some(record_type) => format!("History ({record_type})"),
        None => "History".to_string(),
    };
    let title = ui::style_text(&title, ui::StyleType::Title);

    if records.is_empty() {
        return format!(
            "{title}\n\n{}",
            ui::style_text("No records.", ui::StyleType::Subtle)
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Type"),
        ui::header_cell("Details"),
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(&record.created_at),
            Cell::new(&record.record_type),
            Cell::new(record.details.to_string()),
        ]);
    }

    format!("{title}\n\n{table}")
}

pub async fn list(service: &ExchangeService, filter: Option<&str>) -> Result<()> {
    let records = service.history().list_records(filter).await;
    println!("{}", render_history(&records, filter));
    Ok(())
}

pub async fn clear(service: &ExchangeService) -> Result<()> {
    service.history().clear().await?;
    println!("History cleared.");
    Ok(())
}
