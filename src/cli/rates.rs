use super::ui;
use crate::core::RateTable;
use comfy_table::Cell;

impl RateTable {
    pub fn display_as_table(&self) -> String {
        let base = self.base();

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell(&format!("Rate (per 1 {base})")),
        ]);

        for (code, rate) in self.iter() {
            table.add_row(vec![Cell::new(code), ui::rate_cell(rate, code == base)]);
        }

        let date = self
            .date()
            .map_or("unknown date".to_string(), |d| d.format("%Y-%m-%d").to_string());

        let mut output = format!(
            "Reference rates: {} {}\n\n",
            ui::style_text(base, ui::StyleType::Title),
            ui::style_text(&format!("({date})"), ui::StyleType::Subtle)
        );
        output.push_str(&table.to_string());
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_display_lists_every_currency() {
        let table = RateTable::new(
            "EUR",
            NaiveDate::from_ymd_opt(2008, 9, 29),
            [("USD", 1.4349), ("JPY", 152.3)],
        );

        let output = table.display_as_table();
        assert!(output.contains("2008-09-29"));
        assert!(output.contains("Rate (per 1 EUR)"));
        for needle in ["EUR", "USD", "1.4349", "JPY", "152.3"] {
            assert!(output.contains(needle), "missing {needle}");
        }

        let usd = output.find("USD").unwrap();
        let jpy = output.find("JPY").unwrap();
        assert!(jpy < usd, "rows should be sorted by code");
    }

    #[test]
    fn test_display_without_date() {
        let table = RateTable::new("EUR", None, [("USD", 1.1)]);
        assert!(table.display_as_table().contains("unknown date"));
    }
}
