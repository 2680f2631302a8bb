use anyhow::Result;
use shoebox_core::Library;

pub fn list(library: &Library) -> Result<()> {
    let tags = library.tags()?;
    if tags.is_empty() {
        println!("No tags yet. Attach one with `shoebox tag add <image_id> <name>`.");
        return Ok(());
    }
    for tag in tags {
        println!("{:>5}  {}", tag.id, tag.name);
    }
    Ok(())
}

pub fn add(library: &Library, image_id: i64, name: &str) -> Result<()> {
    let tag = library.get_or_create_tag(name)?;
    library.set_tag(image_id, tag.id, true)?;
    let image = library.image(image_id)?;
    println!(
        "Tagged image {} [{}]",
        image_id,
        image.tag_names().join(", ")
    );
    Ok(())
}

pub fn rm(library: &Library, image_id: i64, name: &str) -> Result<()> {
    match library.find_tag(name)? {
        Some(tag) => {
            library.set_tag(image_id, tag.id, false)?;
            let image = library.image(image_id)?;
            println!(
                "Untagged image {} [{}]",
                image_id,
                image.tag_names().join(", ")
            );
        }
        None => println!("No such tag: {name}"),
    }
    Ok(())
}
