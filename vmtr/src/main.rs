use color_print::cprintln;
use indexmap::IndexMap;
use std::io::Write;
use std::path::PathBuf;
use vmtr::{dump::print_dump, unit, Error, Unit};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files or directories
    #[clap(default_value = "Main.vm")]
    input: Vec<String>,

    /// Output file (only with a single source unit)
    #[clap(short, long)]
    output: Option<String>,

    /// Dump translated code
    #[clap(short, long)]
    dump: bool,

    /// Write each VM command as a comment above its assembly
    #[clap(short, long)]
    annotate: bool,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    println!("Hack VM Translator");

    if let Err(err) = run(&args) {
        cprintln!("<red,bold>error</>: {}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    println!("1. Read Files and Parse Lines");

    let paths = unit::collect(&args.input)?;
    if args.output.is_some() && paths.len() > 1 {
        return Err(Error::AmbiguousOutput(paths.len()));
    }

    let mut units: IndexMap<String, Unit> = IndexMap::new();
    for path in &paths {
        println!("  < {}", path);
        let unit = Unit::load(path)?;
        if let Some(prev) = units.get(unit.name()) {
            return Err(Error::DuplicateUnit(
                unit.name().to_string(),
                prev.path().to_string(),
                path.clone(),
            ));
        }
        units.insert(unit.name().to_string(), unit);
    }

    println!("2. Translate");

    let mut outputs = vec![];
    let mut failed = 0;
    for unit in units.values() {
        let out = unit.translate();
        unit.report(&out.msgs);

        if args.dump {
            print_dump(unit, &out);
        }

        if out.has_error() {
            failed += 1;
        } else {
            outputs.push((unit, out));
        }
    }

    println!("3. Write Files");

    for (unit, out) in &outputs {
        let path = match &args.output {
            Some(path) => PathBuf::from(path),
            None => unit.output_path(),
        };
        let name = path.display().to_string();
        println!("  > {}", name);
        let mut file =
            std::fs::File::create(&path).map_err(|e| Error::FileCreate(name.clone(), e))?;
        file.write_all(out.render(args.annotate).as_bytes())
            .map_err(|e| Error::FileWrite(name.clone(), e))?;
    }

    if failed > 0 {
        return Err(Error::Failed(failed));
    }
    Ok(())
}
