//! The `exercizer sample` command.

use anyhow::Result;

use exercizer_core::catalog;

pub fn execute(subject: String) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&catalog::payload(&subject))?);
    Ok(())
}
