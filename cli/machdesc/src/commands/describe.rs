//! `machdesc list`, `describe`, `select` and `template`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use machdesc_core::parse::{
    description_to_json, description_to_toml, generate_template, load_description_toml,
    DESCRIPTION_SUFFIX,
};
use machdesc_core::{Config, CpuFamily, MachineDescription, OsType, PlatformInfo};

/// Resolve a preset name, `host`, or a path to a `.machine.toml` file.
pub fn resolve(name: &str) -> Result<MachineDescription> {
    if name == "host" {
        return MachineDescription::measure_host().context("cannot describe host");
    }
    if name.ends_with(DESCRIPTION_SUFFIX) {
        return Ok(load_description_toml(Path::new(name))?);
    }
    match name.parse::<Config>() {
        Ok(config) => Ok(MachineDescription::create_static_config(config)),
        Err(_) => bail!("unknown machine: '{name}'. Use 'machdesc list' to see available presets."),
    }
}

/// Render a description in the requested output format.
pub fn render(description: &MachineDescription, format: Option<&str>) -> Result<String> {
    match format.unwrap_or("text") {
        "text" => Ok(description.to_string()),
        "toml" => Ok(description_to_toml(description)?),
        "json" => Ok(description_to_json(description)?),
        other => bail!("unknown format '{other}' (expected text, toml, or json)"),
    }
}

/// List all preset configurations.
pub fn list() -> Result<()> {
    println!("Preset machines:");
    println!();
    for config in Config::ALL {
        println!("  {:<18} {}", config.name(), config.description());
    }
    println!("  {:<18} measured on this machine", "host");
    println!();
    println!("Use 'machdesc describe <name>' for details.");
    Ok(())
}

/// Trailing notes for the text form of `describe`.
pub fn notes(name: &str, description: &MachineDescription) -> Vec<String> {
    let mut notes = Vec::new();
    if name == "host" {
        // long double and the page size are not measurable from Rust
        let preset = PlatformInfo::host()
            .select_config()
            .map(|c| c.to_string())
            .unwrap_or_else(|_| "host".into());
        notes.push(format!(
            "Measured on this machine, except ldouble and page (from preset {preset})"
        ));
    }
    if let Some(config) = description.matching_config() {
        notes.push(format!("Matches preset: {config}"));
    }
    notes
}

/// Describe a preset, the host, or a description file.
pub fn describe(name: &str, format: Option<&str>) -> Result<()> {
    let description = resolve(name)?;
    println!("{}", render(&description, format)?);
    if format.is_none() {
        let notes = notes(name, &description);
        if !notes.is_empty() {
            println!();
        }
        for note in notes {
            println!("{note}");
        }
    }
    Ok(())
}

/// Pick the preset for a CPU/OS pairing.
pub fn select_config(bits: u32, cpu: &str, os: &str) -> Result<Config> {
    let is_32bit = match bits {
        32 => true,
        64 => false,
        other => bail!("unsupported pointer width {other} (expected 32 or 64)"),
    };
    let cpu = cpu.parse::<CpuFamily>()?;
    let os = os.parse::<OsType>()?;
    Ok(PlatformInfo::new(cpu, os, is_32bit).select_config()?)
}

pub fn select(bits: u32, cpu: &str, os: &str) -> Result<()> {
    let config = select_config(bits, cpu, os)?;
    println!("{config}");
    Ok(())
}

/// Print a `.machine.toml` template seeded from a preset, or the host's preset.
pub fn template(preset: Option<&str>) -> Result<()> {
    let config = match preset {
        Some(name) => name.parse::<Config>()?,
        None => PlatformInfo::host()
            .select_config()
            .context("no preset for this host; pass one explicitly")?,
    };
    print!("{}", generate_template(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_presets() {
        for config in Config::ALL {
            let md = resolve(config.name()).unwrap();
            assert_eq!(md.matching_config(), Some(config));
        }
    }

    #[test]
    fn resolve_unknown() {
        let err = resolve("vax-vms").unwrap_err();
        assert!(err.to_string().contains("unknown machine"));
    }

    #[test]
    fn resolve_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.machine.toml");
        std::fs::write(&path, generate_template(Config::ArmEabi).unwrap()).unwrap();
        let md = resolve(path.to_str().unwrap()).unwrap();
        assert_eq!(md.matching_config(), Some(Config::ArmEabi));
    }

    #[test]
    fn render_formats() {
        let md = resolve("x86-64-unix").unwrap();
        assert!(render(&md, None).unwrap().starts_with("machine description:"));
        assert!(render(&md, Some("toml")).unwrap().contains("[sizes]"));
        assert!(render(&md, Some("json")).unwrap().contains("\"alignments\""));
        assert!(render(&md, Some("yaml")).is_err());
    }

    #[test]
    fn select_pairings() {
        assert_eq!(select_config(32, "arm", "windows").unwrap(), Config::ArmEabi);
        assert_eq!(select_config(64, "x86_64", "windows").unwrap(), Config::X86_64Windows);
        assert_eq!(select_config(32, "i686", "linux").unwrap(), Config::X86_32Unix);
        assert!(select_config(64, "aarch64", "linux").is_err());
        assert!(select_config(16, "x86", "linux").is_err());
        assert!(select_config(32, "sparc", "linux").is_err());
    }

    #[test]
    fn unknown_platform_names() {
        let err = select_config(32, "sparc", "linux").unwrap_err();
        assert_eq!(err.to_string(), "unknown CPU family 'sparc'");
        let err = select_config(64, "x86", "plan9").unwrap_err();
        assert_eq!(err.to_string(), "unknown OS type 'plan9'");
    }

    #[test]
    fn host_notes_name_unmeasured_fields() {
        let md = resolve("x86-64-unix").unwrap();
        let host_notes = notes("host", &md);
        assert!(host_notes[0].contains("except ldouble and page"));
        assert_eq!(host_notes.last().unwrap(), "Matches preset: x86-64-unix");

        let preset_notes = notes("x86-64-unix", &md);
        assert_eq!(preset_notes, vec!["Matches preset: x86-64-unix".to_string()]);
    }

    #[test]
    fn list_succeeds() {
        assert!(list().is_ok());
    }

    #[test]
    fn describe_unknown_target() {
        assert!(describe("nonexistent", None).is_err());
    }
}
