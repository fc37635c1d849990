use std::fs;

use crate::cli::commands::InitArgs;

const KLYRA_TOML_TEMPLATE: &str = r##"[workspace]
name = "{name}"

# --- UI Customization ---
# Uncomment and edit to override defaults.

[ui]
# show_key_hints = true
#
# [ui.colors]
# background = "#0C001B"
# text = "#A09BFE"
# text_bright = "#FFFFFF"
# highlight = "#FB4196"
# dim = "#5A5580"
#
# [ui.status_colors]
# muted = "#5A5580"
# accent = "#4488FF"
# green = "#44FF88"
# amber = "#FFD700"
# purple = "#CC66FF"
"##;

/// Infer a workspace name from a directory name: replace hyphens with
/// spaces, title-case.
fn infer_name(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => {
                    let upper: String = c.to_uppercase().collect();
                    upper + &chars.collect::<String>()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn cmd_init(args: InitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let klyra_dir = cwd.join("klyra");

    if klyra_dir.is_dir() && !args.force {
        return Err("klyra workspace already exists in ./klyra/ (use --force to overwrite the config)".into());
    }

    let name = args.name.unwrap_or_else(|| {
        cwd.file_name()
            .and_then(|n| n.to_str())
            .map(infer_name)
            .unwrap_or_else(|| "Untitled".to_string())
    });

    fs::create_dir_all(klyra_dir.join("tasks"))?;
    fs::create_dir_all(klyra_dir.join("messages"))?;

    let toml_content = KLYRA_TOML_TEMPLATE.replace("{name}", &name);
    fs::write(klyra_dir.join("klyra.toml"), toml_content)?;

    let projects_path = klyra_dir.join("projects.json");
    if !projects_path.exists() {
        fs::write(&projects_path, "[]\n")?;
    }

    println!("Initialized klyra workspace \"{}\" in ./klyra/", name);
    println!("Next: kly new \"My first project\"");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_name() {
        assert_eq!(infer_name("site-redesign"), "Site Redesign");
        assert_eq!(infer_name("klyra"), "Klyra");
    }
}
