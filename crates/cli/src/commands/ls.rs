use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use shoebox_core::Library;

pub fn run(library: &Library) -> Result<()> {
    let images = library.images()?;
    if images.is_empty() {
        println!("Catalog is empty. Add a folder with `shoebox folders add <path>`.");
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("ID"),
        Cell::new("File"),
        Cell::new("Size"),
        Cell::new("Tags"),
    ]);

    for image in &images {
        let name = image
            .filepath
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| image.filepath.display().to_string());
        let size = if image.width == 0 && image.height == 0 {
            "?".to_string()
        } else {
            format!("{}x{}", image.width, image.height)
        };
        table.add_row(vec![
            Cell::new(image.id),
            Cell::new(name),
            Cell::new(size),
            Cell::new(image.tag_names().join(", ")),
        ]);
    }

    println!("{table}");
    println!("{} images", images.len());
    Ok(())
}
