use std::path::PathBuf;

use awslint::Linter;

pub(crate) fn run(name: String, manifests: Vec<PathBuf>, format: super::Format) {
    let found = super::load(&manifests, None)
        .and_then(|(ts, _)| Linter::new().find_resource(&ts, &name));
    let resource = match found {
        Ok(Some(r)) => r,
        Ok(None) => {
            eprintln!("awslint lookup: no resource named '{name}'");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("awslint lookup: {e}");
            std::process::exit(1);
        }
    };

    match format {
        super::Format::Text => {
            println!("full name:   {}", resource.full_name);
            println!("namespace:   {}", resource.namespace);
            println!("basename:    {}", resource.basename);
            println!("class:       {}", resource.fqn);
            println!("assembly:    {}", resource.assembly);
            println!("attributes:  {}", resource.attribute_names.join(", "));
            if !resource.doc.is_empty() {
                println!("doc:         {}", resource.doc);
            }
        }
        super::Format::Json => super::print_json(&resource),
    }
}
