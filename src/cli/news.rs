use super::ui;
use crate::core::news::NewsItem;
use crate::service::ExchangeService;
use anyhow::Result;

pub fn render_news(items: &[NewsItem]) -> String {
    let mut output = ui::style_text("Market News", ui::StyleType::Title);
    output.push('\n');

    if items.is_empty() {
        output.push('\n');
        output.push_str(&ui::style_text(
            "No news available right now.",
            ui::StyleType::Subtle,
        ));
        return output;
    }

    for item in items {
        output.push_str(&format!(
            "\n{} {}\n{}\n{}\n",
            ui::style_text(&item.title, ui::StyleType::TotalLabel),
            ui::style_text(&format!("({})", item.source), ui::StyleType::Subtle),
            item.summary,
            ui::style_text(&item.url, ui::StyleType::Subtle),
        ));
    }
    output
}

pub async fn run(service: &ExchangeService) -> Result<()> {
    let pb = ui::new_spinner("Fetching news...");
    let items = service.get_news().await;
    pb.finish_and_clear();

    println!("{}", render_news(&items));
    Ok(())
}
