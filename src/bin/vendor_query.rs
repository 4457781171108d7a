//! One-shot vendor lookup from the command line.
//!
//! Loads the catalog, runs a single query, and prints the result contract
//! (`top_vendors` plus `count`) as JSON on stdout. The query comes either
//! from flags or from a JSON request file validated like an HTTP body.

use anyhow::{Context, Result, bail};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use vendor_qualification::config::catalog_path_from_env;
use vendor_qualification::{CatalogSnapshot, QueryContract, VendorQuery};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse(env::args().skip(1))?;
    let query = cli.query()?;

    let catalog_path = cli.catalog.unwrap_or_else(catalog_path_from_env);
    let snapshot = CatalogSnapshot::load(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    let result = query.run(&snapshot);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

struct Cli {
    catalog: Option<PathBuf>,
    category: Option<String>,
    capabilities: Vec<String>,
    request: Option<String>,
}

impl Cli {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut cli = Cli {
            catalog: None,
            category: None,
            capabilities: Vec::new(),
            request: None,
        };

        let mut args = args;
        while let Some(flag) = args.next() {
            if flag == "--help" || flag == "-h" {
                usage(0);
            }
            let value = args
                .next()
                .with_context(|| format!("{flag} requires a value"))?;
            match flag.as_str() {
                "--catalog" => cli.catalog = Some(PathBuf::from(value)),
                "--category" => cli.category = Some(value),
                "--capability" => cli.capabilities.push(value),
                "--request" => cli.request = Some(value),
                other => bail!("unknown argument '{other}' (see --help)"),
            }
        }

        if cli.request.is_some() && (cli.category.is_some() || !cli.capabilities.is_empty()) {
            bail!("--request cannot be combined with --category or --capability");
        }
        Ok(cli)
    }

    fn query(&self) -> Result<VendorQuery> {
        let Some(request) = &self.request else {
            return Ok(VendorQuery::new(
                self.category.as_deref(),
                self.capabilities.clone(),
            ));
        };

        let body = if request == "-" {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("reading request from stdin")?;
            buf
        } else {
            fs::read(request).with_context(|| format!("reading request {request}"))?
        };

        let contract = QueryContract::new()?;
        Ok(contract.parse(&body)?)
    }
}

fn usage(code: i32) -> ! {
    eprintln!(
        "Usage: vendor-query [--catalog <path>] [--category <text>] [--capability <text>]...\n       vendor-query [--catalog <path>] --request <file|->\n\nPrints the top {} vendors as JSON. Matching is case-insensitive substring\ncontainment; every --capability must match.\n\nExamples:\n  vendor-query --category CRM --capability \"custom objects\"\n  echo '{{\"software_category\":\"CRM\"}}' | vendor-query --request -",
        vendor_qualification::MAX_RESULTS
    );
    std::process::exit(code);
}
