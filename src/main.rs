use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use prisma_dbml::config::{DEFAULT_DIRECTORY, DEFAULT_FILENAME, GeneratorConfig};
use prisma_dbml::dmmf::parse_document;
use prisma_dbml::generator::write_dbml_schema;
use prisma_dbml::logging::{init_file_tracing, init_tracing};
use prisma_dbml::{Schema, rpc};

/// Render Prisma data models as DBML.
///
/// Without `--dmmf`, serves the Prisma generator protocol on stdin/stderr.
/// Logs then go only to `--log-file`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// DMMF JSON document to convert ("-" reads stdin)
    #[arg(long)]
    dmmf: Option<PathBuf>,
    /// Output directory (default: stdout unless --filename is given)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output file name
    #[arg(short, long)]
    filename: Option<String>,
    /// Print mapped database names for tables, columns and enums
    #[arg(long)]
    use_alias: bool,
    /// Print backend-specific column types
    #[arg(long)]
    use_native_type: bool,
    /// Keep implicit many-to-many relations as a single `<>` reference
    #[arg(long)]
    no_expand_implicit_many_to_many: bool,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
    /// Append logs to this file instead of stderr
    ///
    /// In generator mode stderr carries protocol responses, so nothing is
    /// logged unless this is set.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            directory: self
                .output
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DIRECTORY)),
            filename: self
                .filename
                .clone()
                .unwrap_or_else(|| DEFAULT_FILENAME.to_string()),
            use_alias: self.use_alias,
            use_native_type: self.use_native_type,
            expand_implicit_many_to_many: !self.no_expand_implicit_many_to_many,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match &cli.log_file {
        Some(path) => init_file_tracing(&cli.log_level, path)?,
        None if cli.dmmf.is_some() => init_tracing(&cli.log_level),
        None => {}
    }

    let Some(input_path) = &cli.dmmf else {
        return rpc::serve(io::stdin().lock(), io::stderr());
    };

    let input = if input_path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(input_path)
            .with_context(|| format!("failed to read {}", input_path.display()))?
    };
    let document = parse_document(&input)?;
    let config = cli.config();

    if cli.output.is_none() && cli.filename.is_none() {
        let schema = Schema::from_datamodel(&document.datamodel)?;
        print!("{}", schema.print(&config.render_options())?);
        return Ok(());
    }

    write_dbml_schema(&document.datamodel, &config)?;
    Ok(())
}
