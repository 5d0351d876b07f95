// Catalog views
// Render records for the terminal, either as a table or as JSON

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;

use crate::state::CoffeeItem;

/// Column headers of the catalog table, id first.
pub const COLUMN_HEADERS: [&str; 7] = ["ID", "Sort", "Roast", "Type", "Description", "Price", "Size"];

/// Output side of the presenter.
pub trait CatalogView {
    fn show_table(&mut self, items: &[CoffeeItem]);
    fn show_item(&mut self, item: &CoffeeItem);
    fn notify(&mut self, message: &str);
    fn report_error(&mut self, message: &str);
}

impl<V: CatalogView + ?Sized> CatalogView for Box<V> {
    fn show_table(&mut self, items: &[CoffeeItem]) {
        (**self).show_table(items)
    }

    fn show_item(&mut self, item: &CoffeeItem) {
        (**self).show_item(item)
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }

    fn report_error(&mut self, message: &str) {
        (**self).report_error(message)
    }
}

/// Build the catalog table for a set of records
pub fn build_table(items: &[CoffeeItem]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(COLUMN_HEADERS.to_vec());

    for item in items {
        let fields = &item.fields;
        table.add_row(vec![
            Cell::new(item.id).set_alignment(CellAlignment::Right),
            Cell::new(&fields.sort_name),
            Cell::new(&fields.degree),
            Cell::new(&fields.coffee_type),
            Cell::new(fields.description.as_deref().unwrap_or("")),
            Cell::new(format_price(fields.price)).set_alignment(CellAlignment::Right),
            Cell::new(fields.size).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Stored price as written, without rounding; whole prices keep one decimal ("10.0")
pub fn format_price(price: f64) -> String {
    format!("{:?}", price)
}

/// Human-readable table output
pub struct TableView<W: Write> {
    out: W,
}

impl<W: Write> TableView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            log::warn!("Failed to write catalog output: {}", e);
        }
    }
}

impl<W: Write> CatalogView for TableView<W> {
    fn show_table(&mut self, items: &[CoffeeItem]) {
        if items.is_empty() {
            self.write_line("The catalog is empty.");
            return;
        }
        let table = build_table(items);
        self.write_line(&table.to_string());
    }

    fn show_item(&mut self, item: &CoffeeItem) {
        let table = build_table(std::slice::from_ref(item));
        self.write_line(&table.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.write_line(message);
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("Error: {}", message);
    }
}

/// Machine-readable output, one JSON document per call
pub struct JsonView<W: Write> {
    out: W,
}

impl<W: Write> JsonView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, value: &T) {
        let result = serde_json::to_writer_pretty(&mut self.out, value)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(self.out));
        if let Err(e) = result {
            log::warn!("Failed to write catalog output: {}", e);
        }
    }
}

impl<W: Write> CatalogView for JsonView<W> {
    fn show_table(&mut self, items: &[CoffeeItem]) {
        self.write_json(items);
    }

    fn show_item(&mut self, item: &CoffeeItem) {
        self.write_json(item);
    }

    fn notify(&mut self, message: &str) {
        // Keep stdout a clean JSON stream
        eprintln!("{}", message);
    }

    fn report_error(&mut self, message: &str) {
        eprintln!("{}", serde_json::json!({ "error": message }));
    }
}
