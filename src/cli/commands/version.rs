//! Version command implementation

use anyhow::Result;

use crate::cli::Output;

/// Execute the version command
pub fn execute(output: &Output) -> Result<()> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");
    let description = env!("CARGO_PKG_DESCRIPTION");

    output.header(&format!("{name} v{version}"));
    output.key_value("Description:", description);
    output.key_value("Rust edition:", "2024");
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
    );
    output.blank_line();
    output.info(&format!("Run '{name} --help' for usage information"));

    Ok(())
}
