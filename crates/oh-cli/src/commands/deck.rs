use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: Option<&Path>) -> Result<(), String> {
    let deck = super::load_deck(path)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Quote", "Image"]);

    for (index, quote) in deck.iter() {
        table.add_row(vec![index.to_string(), quote.to_string(), deck.image_for(index)]);
    }

    println!("{table}");
    println!();
    println!("  {} cards", deck.len());

    Ok(())
}
