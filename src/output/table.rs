use comfy_table::{presets::UTF8_FULL, Attribute, Cell, CellAlignment, ContentArrangement, Table};

/// Bold header row over a dynamically sized UTF-8 grid.
pub fn standard_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(*h).add_attribute(Attribute::Bold)));
    table
}

pub fn right(text: impl Into<String>) -> Cell {
    aligned(text.into(), CellAlignment::Right)
}

pub fn left(text: impl Into<String>) -> Cell {
    aligned(text.into(), CellAlignment::Left)
}

fn aligned(text: String, alignment: CellAlignment) -> Cell {
    Cell::new(text).set_alignment(alignment)
}
