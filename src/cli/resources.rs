use std::path::PathBuf;

use awslint::Linter;

pub(crate) fn run(manifests: Vec<PathBuf>, assembly: Option<String>, format: super::Format) {
    let resources = super::load(&manifests, assembly)
        .and_then(|(ts, assembly)| Linter::new().resources(&ts, &assembly));
    let resources = match resources {
        Ok(r) => r,
        Err(e) => {
            eprintln!("awslint resources: {e}");
            std::process::exit(1);
        }
    };

    match format {
        super::Format::Text => {
            for r in &resources {
                if r.attribute_names.is_empty() {
                    println!("{}\t{}", r.full_name, r.fqn);
                } else {
                    println!(
                        "{}\t{}\t[{}]",
                        r.full_name,
                        r.fqn,
                        r.attribute_names.join(", ")
                    );
                }
            }
        }
        super::Format::Json => super::print_json(&resources),
    }
}
