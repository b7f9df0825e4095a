//! The `retell stories` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use retell_core::catalog::{BuiltinCatalog, Story, StoryCatalog, StoryCategory};

use crate::output::format_duration;

pub fn execute(category: Option<StoryCategory>, full: bool) -> Result<()> {
    let catalog = BuiltinCatalog::new();
    let stories: Vec<&Story> = match category {
        Some(c) => catalog.by_category(c),
        None => catalog.stories().iter().collect(),
    };

    if full {
        for story in &stories {
            println!("# {} ({})\nid: {}\n", story.title, story.category.label(), story.id);
            println!("{}\n", story.content);
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Category", "Length"]);
    for story in &stories {
        table.add_row(vec![
            Cell::new(story.id),
            Cell::new(&story.title),
            Cell::new(story.category.label()),
            Cell::new(format_duration(story.duration_secs)),
        ]);
    }
    println!("{table}");
    Ok(())
}
