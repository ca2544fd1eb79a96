//! User-facing output formatting for the CLI

use crate::advisory::ResolutionWarning;
use crate::resolver::ResolvedVersion;
use console::style;

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_warning(warning: &ResolutionWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the resolution summary: coordinates, matched ref and the
/// resolved version
pub fn display_resolution(resolved: &ResolvedVersion) {
    println!(
        "{}:{} - {}: {} -> version: {}",
        resolved.id.group,
        resolved.id.artifact,
        resolved.ref_type,
        style(&resolved.ref_name).cyan(),
        style(&resolved.version).green().bold()
    );
}

/// Print the exported context properties, one `key = value` per line
pub fn display_context(resolved: &ResolvedVersion) {
    println!("\n{}", style("Context properties:").bold());
    for (key, value) in resolved.export_properties() {
        println!("  {} = {}", key, value);
    }
}
