use super::ui;
use crate::core::conversion::{self, ConvertResult};
use crate::core::resolver::RateResolver;
use anyhow::{Result, bail};

impl ConvertResult {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell(&format!("Amount ({})", self.from)),
            ui::header_cell(&format!("Rate ({}/{})", self.to, self.from)),
            ui::header_cell(&format!("Result ({})", self.to)),
        ]);
        table.add_row(vec![
            ui::amount_cell(self.amount),
            ui::amount_cell(self.rate),
            ui::result_cell(self.result),
        ]);

        let mut output = format!(
            "{} → {}\n\n",
            ui::style_text(&self.from, ui::StyleType::Title),
            ui::style_text(&self.to, ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{} {}",
            ui::style_text("Last update:", ui::StyleType::Label),
            ui::style_text(&self.last_update, ui::StyleType::Subtle)
        ));
        output
    }
}

pub async fn run(resolver: &RateResolver, amount: f64, from: &str, to: &str) -> Result<()> {
    let spinner = ui::new_spinner("Fetching rate...");
    let result = conversion::convert(resolver, amount, from, to).await;
    spinner.finish_and_clear();

    if !result.success {
        let message = result.error_message.as_deref().unwrap_or("Unknown error");
        bail!("Conversion {}-{} failed: {}", from, to, message);
    }

    println!("{}", result.display_as_table());
    Ok(())
}
