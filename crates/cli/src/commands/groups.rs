use anyhow::{bail, Result};
use shoebox_core::{Group, Library};

pub fn list(library: &Library) -> Result<()> {
    let groups = library.groups()?;
    if groups.is_empty() {
        println!("No groups yet. Create one with `shoebox groups create <name>`.");
        return Ok(());
    }
    for group in groups {
        let members = library.group_images(group.id)?;
        println!("{:>5}  {}  ({} images)", group.id, group.name, members.len());
    }
    Ok(())
}

pub fn create(library: &Library, name: &str) -> Result<()> {
    let id = library.create_group(name)?;
    println!("Group {name:?} has id {id}");
    Ok(())
}

pub fn add(library: &mut Library, name: &str, image_id: i64) -> Result<()> {
    let group = lookup(library, name)?;
    library.add_to_group(group.id, image_id)?;
    println!("Added image {} to {:?}", image_id, group.name);
    Ok(())
}

pub fn rm(library: &Library, name: &str, image_id: i64) -> Result<()> {
    let group = lookup(library, name)?;
    library.remove_from_group(group.id, image_id)?;
    println!("Removed image {} from {:?}", image_id, group.name);
    Ok(())
}

pub fn show(library: &Library, name: &str) -> Result<()> {
    let group = lookup(library, name)?;
    let members = library.group_images(group.id)?;
    println!("{} ({} images)", group.name, members.len());
    for image in members {
        let tags = image.tag_names().join(", ");
        println!("  {:>5}  {}  [{}]", image.id, image.filepath.display(), tags);
    }
    Ok(())
}

fn lookup(library: &Library, name: &str) -> Result<Group> {
    match library.find_group(name)? {
        Some(group) => Ok(group),
        None => bail!("no such group: {name}"),
    }
}
