use super::ui;
use crate::core::currency::{Currency, CurrencyKind};
use comfy_table::{Cell, Color};

pub fn display_as_table(currencies: &[Currency]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Symbol"),
        ui::header_cell("Type"),
        ui::header_cell("Provider ID"),
    ]);

    for currency in currencies {
        let kind_color = match currency.kind {
            CurrencyKind::Fiat => Color::Blue,
            CurrencyKind::Crypto => Color::Yellow,
        };
        table.add_row(vec![
            Cell::new(&currency.code),
            Cell::new(&currency.name),
            Cell::new(currency.symbol.as_deref().unwrap_or("")),
            Cell::new(currency.kind).fg(kind_color),
            Cell::new(&currency.provider_id),
        ]);
    }

    table.to_string()
}

pub fn run(currencies: &[Currency]) {
    println!("{}", display_as_table(currencies));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::currency::Catalog;

    #[test]
    fn test_currency_table_lists_catalog() {
        let catalog = Catalog::builtin();
        let output = console::strip_ansi_codes(&display_as_table(catalog.list())).to_string();
        assert!(output.contains("US Dollar"));
        assert!(output.contains("the-open-network"));
        assert!(output.contains("crypto"));
    }
}
