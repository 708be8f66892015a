//! `machdesc pages` — page count and page-aligned size of a byte count.

use anyhow::Result;
use machdesc_core::MachineDescription;

use super::describe::resolve;

/// Page count and page-aligned size of `size` bytes on `machine`.
pub fn compute(machine: &MachineDescription, size: i64) -> Result<(u64, u64)> {
    let count = machine.page_count(size)?;
    let aligned = machine.page_aligned_size(size)?;
    Ok((count, aligned))
}

pub fn run(size: i64, machine: &str) -> Result<()> {
    let description = resolve(machine)?;
    let (count, aligned) = compute(&description, size)?;
    println!("page size:    {} bytes", description.page_size());
    println!("pages:        {count}");
    println!("aligned size: {aligned} bytes");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_rounds_up() {
        let md = MachineDescription::create_static_unix64();
        assert_eq!(compute(&md, 0).unwrap(), (0, 0));
        assert_eq!(compute(&md, 4097).unwrap(), (2, 8192));
    }

    #[test]
    fn negative_size_is_an_error() {
        let md = MachineDescription::create_static_unix64();
        let err = compute(&md, -5).unwrap_err();
        assert_eq!(err.to_string(), "size must be non-negative, got -5");
    }

    #[test]
    fn run_unknown_machine() {
        assert!(run(10, "nonexistent").is_err());
    }
}
