//! The `exercizer init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("exercizer.toml");
    if path.exists() {
        println!("exercizer.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created exercizer.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: exercizer sample --subject math > math.json");
    println!("  2. Run: exercizer validate --exercise math.json");
    println!("  3. Run: exercizer grade --exercise math.json --answers answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# exercizer configuration

# Minimum score (percent) for an attempt to pass.
pass_threshold = 70

# Feedback language: en, fr, es
locale = "en"

# "trust_correct_flag" accepts a submitted option whose own `correct` flag is
# true; "strict" compares option text only.
match_mode = "trust_correct_flag"
"#;
