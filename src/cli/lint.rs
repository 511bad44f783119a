use std::path::PathBuf;

use awslint::{LintConfig, LintError, Linter};

pub(crate) fn run(
    manifests: Vec<PathBuf>,
    assembly: Option<String>,
    include: Vec<String>,
    exclude: Vec<String>,
    config: Option<PathBuf>,
    format: super::Format,
) {
    let config = match build_config(&manifests, config, &include, &exclude) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("awslint lint: {e}");
            std::process::exit(1);
        }
    };

    let (ts, assembly) = match super::load(&manifests, assembly) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("awslint lint: {e}");
            std::process::exit(1);
        }
    };

    let report = match Linter::with_config(config).lint_assembly(&ts, &assembly) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("awslint lint: {e}");
            std::process::exit(1);
        }
    };

    match format {
        super::Format::Text => {
            for d in &report.diagnostics {
                eprintln!("{d}");
            }
            if report.diagnostics.is_empty() {
                eprintln!("ok ({} resources)", report.resources);
            } else {
                let errors = report.diagnostics.iter().filter(|d| d.is_error()).count();
                eprintln!(
                    "\n{}: {} resources, {errors} errors, {} warnings",
                    report.assembly,
                    report.resources,
                    report.warning_count()
                );
            }
        }
        super::Format::Json => super::print_json(&report),
    }

    if report.has_errors() {
        std::process::exit(1);
    }
}

/// Config file (explicit or discovered) plus command-line patterns.
fn build_config(
    manifests: &[PathBuf],
    path: Option<PathBuf>,
    include: &[String],
    exclude: &[String],
) -> Result<LintConfig, LintError> {
    let path = path.or_else(|| {
        manifests
            .first()
            .and_then(|m| super::manifest_dir(m))
            .and_then(|dir| LintConfig::find(&dir))
    });
    let mut config = match path {
        Some(p) => LintConfig::from_file(&p)?,
        None => LintConfig::new(),
    };
    for p in include {
        config.include(p)?;
    }
    for p in exclude {
        config.exclude(p)?;
    }
    Ok(config)
}
