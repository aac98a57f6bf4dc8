use super::{news, rates, ui};
use crate::service::ExchangeService;
use anyhow::Result;

/// Rates and news fetched together, printed one after the other.
pub async fn run(service: &ExchangeService, currencies: &[String]) -> Result<()> {
    let pb = ui::new_spinner("Fetching rates and news...");
    let (current_rates, items) = futures::join!(service.get_rates(), service.get_news());
    pb.finish_and_clear();

    println!("{}", rates::render_rates(&current_rates, currencies));
    ui::print_separator();
    println!("{}", news::render_news(&items));
    Ok(())
}
