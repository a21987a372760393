use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use picklane_core::BatchResult;

pub fn print_summary(result: &BatchResult) {
    let summary = result.summary();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Store"),
        header_cell("Expedited"),
        header_cell("Standard"),
        header_cell("Unmatched"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for store in &summary.stores {
        table.add_row(vec![
            store_cell(&store.store_id),
            Cell::new(store.expedited),
            Cell::new(store.standard),
            count_cell(store.unmatched, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.expedited).add_attribute(Attribute::Bold),
        Cell::new(summary.standard).add_attribute(Attribute::Bold),
        count_cell(summary.unmatched, Color::Yellow).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    print_unmatched_table(result);
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn print_unmatched_table(result: &BatchResult) {
    if result.unmatched.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Store"),
        header_cell("Order"),
        header_cell("SKU"),
        header_cell("Product Title"),
    ]);
    apply_unmatched_table_style(&mut table);
    for record in &result.unmatched {
        table.add_row(vec![
            store_cell(&record.store_id),
            Cell::new(&record.order_id),
            Cell::new(&record.sku),
            Cell::new(&record.title),
        ]);
    }
    println!();
    println!("Unmatched:");
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
}

fn apply_unmatched_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn store_cell(store_id: &str) -> Cell {
    Cell::new(store_id)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
