//! TOML/JSON persistence, validation, and discovery for machine descriptions.
//!
//! Custom descriptions are stored as `<name>.machine.toml` files in a
//! `machines/` directory. Constructors never validate; callers that load
//! descriptions from disk can run [`validate_description`] on the result.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{MachineError, Result};
use crate::machine::MachineDescription;
use crate::primitive::Primitive;

/// File suffix of stored machine descriptions.
pub const DESCRIPTION_SUFFIX: &str = ".machine.toml";

/// A validation issue found in a machine description.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Load a description from a `.machine.toml` file.
pub fn load_description_toml(path: &Path) -> Result<MachineDescription> {
    if !path.exists() {
        return Err(MachineError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_description_toml(&content)
}

/// Parse a description from a TOML string.
pub fn parse_description_toml(toml_str: &str) -> Result<MachineDescription> {
    let description: MachineDescription = toml::from_str(toml_str)?;
    Ok(description)
}

/// Serialize a description to pretty TOML.
pub fn description_to_toml(description: &MachineDescription) -> Result<String> {
    let toml_str = toml::to_string_pretty(description)?;
    Ok(toml_str)
}

/// Serialize a description to pretty JSON.
pub fn description_to_json(description: &MachineDescription) -> Result<String> {
    let json = serde_json::to_string_pretty(description)?;
    Ok(json)
}

/// Check a description for values no real ABI would have.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
pub fn validate_description(
    description: &MachineDescription,
) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    // 1. Sizes are positive
    for primitive in Primitive::ALL {
        if description.size_of(primitive) == 0 {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("size of {primitive} is 0"),
            });
        }
    }

    // 2. Alignments are positive powers of two
    for primitive in Primitive::ALL {
        let align = description.alignment_of(primitive);
        if !align.is_power_of_two() {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("alignment of {primitive} ({align}) is not a power of 2"),
            });
        }
    }

    // 3. Page size is a power of two
    let page = description.page_size();
    if !page.is_power_of_two() {
        issues.push(ValidationIssue {
            severity: "error",
            message: format!("page size {page} is not a power of 2"),
        });
    }

    // 4. Alignment does not exceed size
    for primitive in Primitive::ALL {
        let size = description.size_of(primitive);
        let align = description.alignment_of(primitive);
        if size > 0 && align > size {
            issues.push(ValidationIssue {
                severity: "warning",
                message: format!("alignment of {primitive} ({align}) exceeds its size ({size})"),
            });
        }
    }

    // 5. Pointer width is one the presets know
    let pointer = description.pointer_size();
    if pointer != 4 && pointer != 8 {
        issues.push(ValidationIssue {
            severity: "warning",
            message: format!("pointer size {pointer} is neither 4 nor 8 bytes"),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Generate a `.machine.toml` template seeded from a preset.
pub fn generate_template(config: Config) -> Result<String> {
    description_to_toml(&MachineDescription::create_static_config(config))
}

/// Discover all `.machine.toml` files in a project's `machines/` directory.
///
/// Returns a list of (description_name, file_path) pairs.
pub fn discover_descriptions(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let machines_dir = project_dir.join("machines");
    if !machines_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(&machines_dir)? {
        let path = entry?.path();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_suffix(DESCRIPTION_SUFFIX))
            .map(str::to_string);
        if let Some(name) = name {
            found.push((name, path));
        }
    }
    found.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(found)
}
