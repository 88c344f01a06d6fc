use clap::Parser;
use color_print::cprintln;

use hackemu::{
    hooks::{dump::Dump, trace::Trace, Hook},
    Error, Rom, Script, State,
};

#[derive(Parser, Debug)]
#[clap(
    name = "Hack Emulator",
    author = "kanade-k-1228",
    version = "v1.0.0",
    about = "Emulator for the Hack platform"
)]
struct Args {
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    #[arg(short, long)]
    script: Option<String>,

    #[arg(short, long)]
    dump_cfg: Option<String>,

    #[arg(long)]
    trace: bool,

    #[arg(default_value = "Main.asm")]
    input_file: String,
}

fn main() {
    let args = Args::parse();
    println!("Hack Emulator by kanade-k-1228");

    println!("+-----------------------------------------------+");
    println!("| Emulate: {:<36} |", args.input_file);
    if let Some(fname) = &args.script {
        println!("|  - Script: {:<34} |", fname);
    }
    if let Some(fname) = &args.dump_cfg {
        println!("|  - Dump: {:<36} |", fname);
    }
    println!("+-----------------------------------------------+");

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            std::process::exit(1);
        }
    }
}

/// Returns whether every expected cell matched.
fn run(args: Args) -> Result<bool, Error> {
    // ------------------------------------------------------------------------
    // Initialize state machine model
    let rom = Rom::load(&args.input_file)?;
    let script = match &args.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    let mut state = State::new(rom);
    script.apply(&mut state);

    // ------------------------------------------------------------------------
    // Initialize hooks
    println!("[INIT]");
    let dump = match &args.dump_cfg {
        Some(path) => Dump::load(path)?,
        None => Dump::default(),
    };
    let mut hooks: Vec<Box<dyn Hook>> = vec![Box::new(Trace::new(args.trace)), Box::new(dump)];
    state = hooks.iter_mut().fold(state, |state, hook| hook.init(state));

    // ------------------------------------------------------------------------
    // Main loop
    let tmax = args.tmax.or(script.tmax).unwrap_or(u64::MAX);
    let mut steps = 0;
    for time in 0..tmax {
        let Some((addr, inst)) = state.exec() else {
            break;
        };
        state = hooks
            .iter_mut()
            .fold(state, |state, hook| hook.exec(time, addr, inst, state));
        steps = time + 1;
    }

    // ------------------------------------------------------------------------
    // Exit
    match state.is_terminated() {
        true => println!("[EXIT] halted after {} steps", steps),
        false => println!("[EXIT] step limit reached after {} steps", steps),
    }

    let mismatches = script.check(&state);
    for m in &mismatches {
        cprintln!(
            " <r,s>✗</> RAM[{}] expected <g>{}</> but was <r>{}</>",
            m.addr,
            m.expect,
            m.actual
        );
    }
    if !script.expect.is_empty() && mismatches.is_empty() {
        cprintln!(" <g,s>✓</> {} cells match", script.expect.len());
    }
    println!("=================================================");
    Ok(mismatches.is_empty())
}
