//! # Show Subcommand
//!
//! Prints a contract as an indented outline, or as HTML for the registry
//! pages with `--html`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use creg_schema::{build_schema_dictionary, outline, render_html, render_text};

use crate::read_input;

/// Arguments for `creg show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Contract schema file.
    #[arg(long)]
    pub contract: PathBuf,

    /// Emit HTML instead of plain text.
    #[arg(long)]
    pub html: bool,
}

/// Execute the show subcommand.
pub fn run_show(args: &ShowArgs) -> Result<u8> {
    let schema = read_input(&args.contract)?;
    match render(&schema, args.html) {
        Ok(rendered) => {
            print!("{rendered}");
            Ok(0)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(1)
        }
    }
}

pub fn render(schema: &str, html: bool) -> Result<String, creg_schema::SchemaError> {
    let dictionary = build_schema_dictionary(schema)?;
    let lines = outline(&dictionary);
    Ok(if html {
        render_html(&lines)
    } else {
        render_text(&lines)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use creg_schema::SchemaError;

    const CONTRACT: &str = r#"{"Contract":{"type":"object","properties":{
        "Name":{"type":"string"},
        "Address":{"type":"object","properties":{"City":{"type":"string"}}}}}}"#;

    #[test]
    fn text_outline() {
        assert_eq!(
            render(CONTRACT, false).unwrap(),
            "Name: string\nAddress: object\n  City: string\n"
        );
    }

    #[test]
    fn html_outline() {
        let html = render(CONTRACT, true).unwrap();
        assert!(html.contains(r#"<span class="contract-name">City</span>"#));
        assert!(html.contains("depth-1"));
    }

    #[test]
    fn schema_errors_surface() {
        assert_eq!(render("{", false).unwrap_err(), SchemaError::InvalidJson);
    }
}
