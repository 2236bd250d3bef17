mod colors;

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

pub use colors::{error, highlight, info, set_theme_mode, success, warning};

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}
