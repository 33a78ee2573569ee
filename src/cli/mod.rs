//! The testscan command-line interface.
//!
//! Orchestrates the core library: scan, report, export, and the two id-sync
//! operations. All user-facing printing goes through [`output`].

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::analyzer::Analyzer;
use crate::cli::args::ScanArgs;
use crate::errors::{print_report, Result, ScanError};
use crate::frameworks::Framework;
use crate::registry::{IdSource, JsonIdFile, SyncPayload};
use crate::render;
use crate::sync::{self, IdMap, SyncReport};

pub mod args;
pub mod output;

/// Main entry point for the CLI.
pub fn run() {
    let args = ScanArgs::parse();
    if let Err(e) = execute(&args) {
        print_report(e);
        process::exit(1);
    }
}

fn execute(args: &ScanArgs) -> Result<()> {
    let framework = Framework::from_name(&args.framework)?;
    let dir = match &args.dir {
        Some(d) => d.clone(),
        None => std::env::current_dir().map_err(|e| ScanError::fs(PathBuf::from("."), e))?,
    };

    let mut analyzer = Analyzer::new(framework, dir.clone());
    if args.typescript {
        analyzer.with_typescript();
    }
    analyzer.analyze(&args.pattern)?;

    for err in analyzer.errors() {
        output::warning(&format!(" ⚠️  {err}"));
    }

    if args.clean_ids || args.unsafe_clean_ids {
        let map = load_id_map(args)?;
        let report = sync::purge(analyzer.raw_groups(), &map, &dir, args.unsafe_clean_ids);
        report_sync(&report);
        return Ok(());
    }

    let inventory = analyzer.inventory();
    output::heading(&format!(
        "\nSHOWING {} TESTS FROM {}:",
        framework.name().to_uppercase(),
        args.pattern
    ));
    let skipped = inventory.skipped_tests();
    match &args.url {
        // With a base URL, emit the markdown listings with file links and
        // line anchors, ready for a PR comment or document.
        Some(url) => {
            for line in render::markdown_list(inventory, url) {
                output::note(&line);
            }
            if !skipped.is_empty() {
                output::warning(&format!("\nSKIPPED {} TESTS:\n", skipped.len()));
                for line in render::skipped_markdown_list(inventory, url) {
                    output::note(&line);
                }
            }
            if !inventory.is_empty() {
                output::heading("\nSUITES:\n");
                for line in render::suites_markdown_list(inventory, url) {
                    output::note(&line);
                }
            }
        }
        None => {
            for line in render::text_list(inventory) {
                if line == "-----" {
                    output::heading("_______________________\n");
                } else {
                    output::note(&line);
                }
            }
            if !skipped.is_empty() {
                output::warning(&format!("\nSKIPPED {} TESTS:\n", skipped.len()));
                for test in &skipped {
                    output::note(&format!("- {} ({}:{})", test.name, test.file, test.line));
                }
            }
        }
    }

    if inventory.is_empty() {
        output::note(" ✖️  Can't find any tests in this folder");
        output::note("Change the file pattern or directory to scan:\n\nUsage: testscan <framework> <pattern> -d <directory>");
        return Ok(());
    }
    output::success(&format!("\nTOTAL {} TESTS FOUND\n", inventory.count()));

    if let Some(path) = &args.export {
        let payload = SyncPayload {
            tests: inventory.records(),
            framework: framework.name(),
            branch: args.branch.clone(),
            sync: args.update_ids,
            no_detach: false,
            keep_structure: false,
        };
        fs::write(path, payload.to_json()?)
            .map_err(|e| ScanError::fs(path.clone(), e))?;
        output::note(&format!("📝 Payload saved to {}", path.display()));
    }

    if args.update_ids {
        let mut map = load_id_map(args)?;
        let report = sync::annotate(analyzer.raw_groups(), &mut map, &dir);
        report_sync(&report);
    }

    if args.no_skipped && !skipped.is_empty() {
        return Err(ScanError::SkippedFound {
            count: skipped.len(),
        });
    }
    Ok(())
}

fn load_id_map(args: &ScanArgs) -> Result<IdMap> {
    match &args.ids_file {
        Some(path) => JsonIdFile::new(path).fetch_ids(),
        // Unsafe cleaning works without registry verification.
        None if args.unsafe_clean_ids => Ok(IdMap::default()),
        None => Err(ScanError::registry(
            "no id map: pass --ids-file with the registry's id export",
        )),
    }
}

fn report_sync(report: &SyncReport) {
    output::note(&format!("    {} files updated.", report.updated.len()));
    for failure in &report.failures {
        output::warning(&format!(" ✖️  {failure}"));
    }
}
