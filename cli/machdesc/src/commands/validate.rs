//! `machdesc validate` — check stored machine descriptions.

use std::path::Path;

use anyhow::{bail, Result};
use machdesc_core::parse::{discover_descriptions, load_description_toml, validate_description};

/// Validate one `.machine.toml` file, or every file under `machines/` when
/// `path` is a directory.
pub fn run(path: &Path) -> Result<()> {
    let files = if path.is_dir() {
        let found = discover_descriptions(path)?;
        if found.is_empty() {
            bail!("no machine descriptions under {}", path.join("machines").display());
        }
        found
    } else {
        let name = path.display().to_string();
        vec![(name, path.to_path_buf())]
    };

    let mut errors = 0;
    for (name, file) in &files {
        let description = load_description_toml(file)?;
        match validate_description(&description) {
            Ok(()) => println!("{name}: ok"),
            Err(issues) => {
                for issue in &issues {
                    println!("{name}: {}: {}", issue.severity, issue.message);
                    if issue.severity == "error" {
                        errors += 1;
                    }
                }
            }
        }
    }

    if errors > 0 {
        bail!("{errors} validation error(s)");
    }
    Ok(())
}
