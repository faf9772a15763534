//! plugin-maker's entry point: parses arguments, loads the project layout
//! and runs one generation.

use plugin_maker::{
    cli::{get_args, Args},
    config::load_config,
    error::{default_error_handler, Result},
    generator::Generator,
    logger::init_logger,
    prompt::{complete_request, DialoguerPrompter},
    renderer::MiniJinjaRenderer,
    writer::EditOutcome,
};

fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the project configuration
/// 2. Lists the vocabularies, or
/// 3. Validates the parameters, extracts the vocabularies and generates
fn run(args: Args) -> Result<()> {
    let project = load_config(&args.project_root, args.config.as_deref())?;
    let renderer = MiniJinjaRenderer::new();
    let generator = Generator::new(&project, &renderer);

    if args.list {
        let vocabularies = generator.load_vocabularies()?;
        if args.json {
            println!("{:#}", vocabularies.to_json());
        } else {
            print!("{}", vocabularies.listing());
        }
        return Ok(());
    }

    let request = args.request();
    let (descriptor, vocabularies) = if args.interactive {
        let vocabularies = generator.load_vocabularies()?;
        let request = complete_request(&DialoguerPrompter::new(), request, &vocabularies)?;
        (request.into_descriptor()?, vocabularies)
    } else {
        let descriptor = request.into_descriptor()?;
        (descriptor, generator.load_vocabularies()?)
    };

    println!("Making plugin...");
    let report = generator.generate(&descriptor, &vocabularies)?;
    for path in &report.written {
        println!("Wrote: '{}'", path.display());
    }
    if report.registry == Some(EditOutcome::AlreadyPresent) {
        println!("{}: '{}'", EditOutcome::AlreadyPresent, project.registry_header().display());
    }
    if report.manifest == Some(EditOutcome::AlreadyPresent) {
        println!("{}: '{}'", EditOutcome::AlreadyPresent, project.build_manifest().display());
    }

    println!(
        "Plugin generation completed successfully in {}.",
        report.component_dir.display()
    );
    Ok(())
}
