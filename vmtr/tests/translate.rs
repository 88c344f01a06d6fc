use std::collections::HashSet;

use arch::asm::Asm;
use strum::IntoEnumIterator;
use vmtr::{Arith, Command, Direction, Segment, Translator, Unit};

fn labels(code: &[Asm]) -> Vec<String> {
    code.iter()
        .filter_map(|asm| match asm {
            Asm::Label(name) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn every_arith_translates() {
    let mut tr = Translator::new(Some("Main"));
    for op in Arith::iter() {
        let code = tr.command(&Command::Arith(op)).unwrap();
        println!("{:<4} {} lines", op, code.len());
        assert!(code.iter().all(|asm| !matches!(asm, Asm::Comment(_))));
        assert_eq!(labels(&code).len(), if op.is_comparison() { 2 } else { 0 });
    }
}

#[test]
fn comparisons_get_distinct_labels() {
    let src: String = ["eq", "gt", "lt", "add", "eq", "not", "lt"]
        .iter()
        .map(|op| format!("{}\n", op))
        .collect();
    let out = Unit::new("Main.vm", &src).unwrap().translate();
    let cmps = out
        .blocks
        .iter()
        .filter(|b| matches!(b.cmd, Command::Arith(op) if op.is_comparison()))
        .count();
    assert_eq!(cmps, 5);

    let names = labels(&out.asm());
    let unique: HashSet<&String> = names.iter().collect();
    assert_eq!(names.len(), 2 * cmps);
    assert_eq!(unique.len(), names.len());
}

#[test]
fn memory_is_pure() {
    let cmd = Command::Memory(Direction::Pop, Segment::Argument, 4);
    let mut tr = Translator::new(Some("Main"));
    let first = tr.command(&cmd).unwrap();
    let again = tr.command(&cmd).unwrap();
    assert_eq!(first, again);
    assert!(labels(&first).is_empty());
}

#[test]
fn same_unit_same_output() {
    let src = "push constant 1\npush constant 2\nlt\npush static 3\neq\npop temp 0\n";
    let a = Unit::new("Main.vm", src).unwrap().translate();
    let b = Unit::new("Main.vm", src).unwrap().translate();
    assert_eq!(a.render(false), b.render(false));
    assert_eq!(a.render(true), b.render(true));
}

#[test]
fn statics_follow_unit_name() {
    let src = "push static 0\npop static 1\n";
    let foo = Unit::new("lib/Foo.vm", src).unwrap().translate().asm();
    let bar = Unit::new("lib/Bar.vm", src).unwrap().translate().asm();
    assert!(foo.contains(&Asm::sym("Foo.0")) && foo.contains(&Asm::sym("Foo.1")));
    assert!(bar.contains(&Asm::sym("Bar.0")) && bar.contains(&Asm::sym("Bar.1")));
    assert!(!foo.contains(&Asm::sym("Bar.0")));
}

#[test]
fn output_reads_back() {
    let src = "push constant 7\npush local 2\nadd\ngt\npop that 1\npush pointer 0\nnot\n";
    let text = Unit::new("Main.vm", src).unwrap().translate().render(false);
    for line in text.lines() {
        let asm = Asm::parse(line).unwrap().unwrap();
        assert_eq!(asm.to_string(), line);
    }
}

#[test]
fn errors_do_not_stop_the_unit() {
    let src = "push constant 1\npop constant 1\npush constant 2\nadd\n";
    let out = Unit::new("Main.vm", src).unwrap().translate();
    assert!(out.has_error());
    assert_eq!(out.blocks.len(), 3);
}

#[test]
fn non_comparisons_are_pure() {
    let mut tr = Translator::new(None);
    for op in Arith::iter().filter(|op| !op.is_comparison()) {
        let first = tr.command(&Command::Arith(op)).unwrap();
        let again = tr.command(&Command::Arith(op)).unwrap();
        assert_eq!(first, again, "{} differs", op);
    }
}

#[test]
fn reset_replays_labels() {
    let cmds: Vec<Command> = [Arith::Lt, Arith::Add, Arith::Eq, Arith::Gt]
        .into_iter()
        .map(Command::Arith)
        .collect();
    let mut tr = Translator::new(Some("Main"));
    let mut pass = || -> Vec<String> {
        cmds.iter()
            .flat_map(|cmd| labels(&tr.command(cmd).unwrap()))
            .collect()
    };
    let first = pass();
    assert_eq!(first, ["TRUE$1", "END$1", "TRUE$2", "END$2", "TRUE$3", "END$3"]);
    let second = pass();
    assert_eq!(second[0], "TRUE$4");

    tr.begin(Some("Main"));
    let replay: Vec<String> = cmds
        .iter()
        .flat_map(|cmd| labels(&tr.command(cmd).unwrap()))
        .collect();
    assert_eq!(replay, first);
}
