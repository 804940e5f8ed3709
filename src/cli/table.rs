use super::ui;
use crate::core::conversion::{self, RateRow};
use crate::core::resolver::RateResolver;
use anyhow::Result;
use futures::future::join_all;

pub fn display_rows(from: &str, to: &str, rows: &[RateRow]) -> String {
    let mut output = format!(
        "{} → {}\n\n",
        ui::style_text(from, ui::StyleType::Title),
        ui::style_text(to, ui::StyleType::Title)
    );

    if rows.is_empty() {
        output.push_str(&ui::style_text(
            &format!("No rate available for {from}-{to}"),
            ui::StyleType::Error,
        ));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell(from), ui::header_cell(to)]);
    for row in rows {
        table.add_row(vec![
            ui::amount_cell(row.from_amount),
            ui::result_cell(row.to_amount),
        ]);
    }
    output.push_str(&table.to_string());
    output
}

/// Prints a multiplier table for every target; targets are resolved concurrently.
pub async fn run(resolver: &RateResolver, from: &str, targets: &[String]) -> Result<()> {
    let pb = ui::new_progress_bar(targets.len() as u64, "Fetching rates...");

    let futures = targets.iter().map(|to| {
        let pb = pb.clone();
        async move {
            let rows = conversion::rates_table(resolver, from, to).await;
            pb.inc(1);
            (to.as_str(), rows)
        }
    });
    let tables = join_all(futures).await;
    pb.finish_and_clear();

    let output = tables
        .iter()
        .map(|(to, rows)| display_rows(from, to, rows))
        .collect::<Vec<_>>()
        .join("\n\n");
    println!("{output}");
    Ok(())
}
