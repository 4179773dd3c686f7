//! stl3mf CLI - bundle STL part files into a multi-color 3MF package.
//!
//! Usage: stl3mf [OPTIONS] [PARTS]...
//!
//! With no part arguments, the four conventionally named part files are
//! looked up in the working directory; missing ones are skipped with a
//! warning. Run `stl3mf --help` for details.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use stl3mf::{Error, Model, Part};

/// The conventional part layout used when no parts are given explicitly.
const DEFAULT_PARTS: &[(&str, &str, &str)] = &[
    ("sign_plate.stl", "#F5F5F0", "Sign Base"),
    ("sign_elements.stl", "#1A1A1A", "Sign Text"),
    ("stand.stl", "#1A1A1A", "Stand"),
    ("frame.stl", "#1A1A1A", "Frame"),
];

#[derive(Parser)]
#[command(name = "stl3mf")]
#[command(author, version, about = "Bundle STL parts into a multi-color 3MF package", long_about = None)]
struct Cli {
    /// Parts as PATH:COLOR:NAME specs (e.g. "stand.stl:#1A1A1A:Stand");
    /// defaults to the conventional four-part layout
    parts: Vec<String>,

    /// Output package path
    #[arg(short, long, default_value = "multicolor.3mf")]
    output: PathBuf,
}

fn parse_part(spec: &str) -> Result<Part, String> {
    let mut fields = spec.splitn(3, ':');
    match (fields.next(), fields.next(), fields.next()) {
        (Some(path), Some(color), Some(name)) if !path.is_empty() => {
            Ok(Part::new(path, color, name))
        }
        _ => Err(format!(
            "invalid part spec '{spec}', expected PATH:COLOR:NAME"
        )),
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let parts: Vec<Part> = if cli.parts.is_empty() {
        DEFAULT_PARTS
            .iter()
            .map(|&(file, color, name)| Part::new(file, color, name))
            .collect()
    } else {
        cli.parts
            .iter()
            .map(|spec| parse_part(spec))
            .collect::<Result<_, _>>()?
    };

    let model = match Model::from_parts(&parts) {
        Ok(model) => model,
        Err(Error::EmptyInput) => {
            let mut guidance = format!("{}\n\nExport each part as STL first:\n", Error::EmptyInput);
            for (file, _, name) in DEFAULT_PARTS {
                guidance.push_str(&format!("  - {file} ({name})\n"));
            }
            guidance.push_str("\nThen run stl3mf again.");
            return Err(guidance);
        }
        Err(err) => return Err(err.to_string()),
    };

    println!("Bundling {} parts:", model.objects.len());
    for object in &model.objects {
        println!("  - {}", object.name);
    }

    model
        .write_to_file(&cli.output)
        .map_err(|err| err.to_string())?;

    println!("Created: {}", cli.output.display());
    println!("Open it in your slicer - colors are pre-assigned.");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_part_spec() {
        let part = parse_part("stand.stl:#1A1A1A:Stand").unwrap();
        assert_eq!(part.source, PathBuf::from("stand.stl"));
        assert_eq!(part.color, "#1A1A1A");
        assert_eq!(part.name, "Stand");
    }

    #[test]
    fn test_parse_part_spec_name_may_contain_colons() {
        let part = parse_part("a.stl:#FF0000:Part: Left").unwrap();
        assert_eq!(part.name, "Part: Left");
    }

    #[test]
    fn test_parse_part_spec_rejects_short_forms() {
        assert!(parse_part("a.stl:#FF0000").is_err());
        assert!(parse_part(":#FF0000:Name").is_err());
    }
}
