use std::path::{Path, PathBuf};

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use shoebox_core::{Library, ScanProgress, Settings};

pub fn list(settings_path: &Path) -> Result<()> {
    let settings = Settings::load(settings_path)?;
    if settings.folders.is_empty() {
        println!("No folders registered. Add one with `shoebox folders add <path>`.");
        return Ok(());
    }
    for folder in &settings.folders {
        let scanned = folder
            .last_scanned
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "never scanned".to_string());
        println!("{}  ({})", folder.path.display(), scanned);
    }
    Ok(())
}

pub fn add(library: &Library, settings_path: &Path, path: PathBuf) -> Result<()> {
    let mut settings = Settings::load(settings_path)?;
    let added = scan_one(library, &path)?;
    settings.add_folder(path.clone());
    settings.mark_scanned(&path);
    settings.save(settings_path)?;
    println!("Registered {} ({} new images)", path.display(), added);
    Ok(())
}

pub fn scan(library: &Library, settings_path: &Path) -> Result<()> {
    let mut settings = Settings::load(settings_path)?;
    if settings.folders.is_empty() {
        println!("No folders registered.");
        return Ok(());
    }
    let mut total = 0;
    for path in settings.folder_paths() {
        total += scan_one(library, &path)?;
        settings.mark_scanned(&path);
    }
    settings.save(settings_path)?;
    println!("Scan complete: {total} new images");
    Ok(())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("  {bar:30.cyan/blue} {pos:>5}/{len:<5} {msg:.dim}")
        .unwrap()
        .progress_chars("━╸─")
}

fn scan_one(library: &Library, path: &Path) -> Result<usize> {
    let mut bar: Option<ProgressBar> = None;

    let added = library.scan_folder(
        path,
        None,
        Some(&mut |progress| match progress {
            ScanProgress::FolderStart { folder, file_count } => {
                println!("  Scanning {} ({} files)", folder.display(), file_count);
                let pb = ProgressBar::new(file_count as u64);
                pb.set_style(bar_style());
                bar = Some(pb);
            }
            ScanProgress::FileAdded { path } => {
                if let Some(ref pb) = bar {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default();
                    pb.set_message(name);
                    pb.inc(1);
                }
            }
            ScanProgress::Complete { .. } => {
                if let Some(pb) = bar.take() {
                    pb.finish_and_clear();
                }
            }
        }),
    )?;
    Ok(added)
}
