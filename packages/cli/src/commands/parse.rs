use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use gloss_common::{CommonError, CommonResult};
use gloss_parser::{format_error, Document, ParseConfig};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Source files to parse (explicit paths, no discovery)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Lift comments found inside forms into their documentation
    #[arg(short, long)]
    pub lift: bool,

    /// Keep lifted comment lines in the displayed code
    #[arg(long)]
    pub keep_lifted_in_code: bool,

    /// Render syntax errors with source context
    #[arg(long)]
    pub pretty: bool,

    /// Write JSON output to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn parse(args: ParseArgs) -> Result<()> {
    let config = ParseConfig {
        lift_inline_comments: args.lift,
        exclude_lifted_comments: args.lift && !args.keep_lifted_in_code,
    };

    let mut documents: BTreeMap<String, Document> = BTreeMap::new();
    let mut error_count = 0;

    for file in &args.files {
        match parse_file(file, &config, args.pretty) {
            Ok(document) => {
                eprintln!(
                    "  {} {} ({} sections)",
                    "✓".green(),
                    file.display(),
                    document.sections.len()
                );
                documents.insert(file.display().to_string(), document);
            }
            Err(err) => {
                error_count += 1;
                eprintln!("  {} {} - {}", "✗".red(), file.display(), err.to_string().red());
            }
        }
    }

    if error_count > 0 {
        return Err(anyhow!(
            "{} of {} files failed to parse",
            error_count,
            args.files.len()
        ));
    }

    let json = serde_json::to_string_pretty(&documents)?;
    match &args.output {
        Some(path) => fs::write(path, json)?,
        None => println!("{}", json),
    }

    Ok(())
}

fn parse_file(path: &Path, config: &ParseConfig, pretty: bool) -> CommonResult<Document> {
    let source = fs::read_to_string(path)?;

    gloss_parser::parse(&source, config).map_err(|err| {
        if pretty {
            let report = format_error(&source, &path.display().to_string(), &err);
            CommonError::Generic(format!("{}\n{}", err, report))
        } else {
            CommonError::Parse(err)
        }
    })
}
