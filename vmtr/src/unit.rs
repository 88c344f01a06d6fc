use arch::asm::{is_symbol, Asm};
use std::path::{Path, PathBuf};

use crate::{
    error::Error,
    msg::{self, Msg},
    parser::{Command, Line, Segment},
    translate::Translator,
};

/// Extension of VM source files.
pub const SOURCE_EXT: &str = "vm";
/// Extension of generated assembly files.
pub const OUTPUT_EXT: &str = "asm";

// ----------------------------------------------------------------------------
// Source unit

/// One VM source file. Its name scopes the `static` segment.
#[derive(Debug, Clone)]
pub struct Unit {
    path: String,
    name: String,
    lines: Vec<Line>,
}

impl Unit {
    /// Build a unit named after the file stem of `path`.
    pub fn new(path: &str, src: &str) -> Result<Self, Error> {
        let name = Path::new(path)
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default();
        Unit::with_name(path, name, src)
    }

    pub fn with_name(path: &str, name: &str, src: &str) -> Result<Self, Error> {
        if !is_symbol(name) {
            return Err(Error::InvalidUnitName(name.to_string()));
        }
        Ok(Unit {
            path: path.to_string(),
            name: name.to_string(),
            lines: src
                .lines()
                .enumerate()
                .map(|(idx, raw)| Line::new(idx, raw))
                .collect(),
        })
    }

    pub fn load(path: &str) -> Result<Self, Error> {
        let src = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::FileOpen(path.to_string(), e),
            _ => Error::FileRead(path.to_string(), e),
        })?;
        Unit::new(path, &src)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// `Foo.vm` -> `Foo.asm`, next to the source.
    pub fn output_path(&self) -> PathBuf {
        Path::new(&self.path).with_extension(OUTPUT_EXT)
    }

    pub fn report(&self, msgs: &[Msg]) {
        for msg in msgs {
            let raw = self.lines.get(msg.idx()).map(|l| l.raw()).unwrap_or("");
            msg.print(&self.path, raw);
        }
    }
}

// ----------------------------------------------------------------------------
// Translation

/// Assembly generated for one VM line.
#[derive(Debug, Clone)]
pub struct Block {
    pub idx: usize,
    pub cmd: Command,
    pub code: Vec<Asm>,
}

#[derive(Debug, Default)]
pub struct Translation {
    pub blocks: Vec<Block>,
    pub msgs: Vec<Msg>,
}

impl Unit {
    /// Translate every line with a fresh label counter.
    pub fn translate(&self) -> Translation {
        let mut translator = Translator::new(Some(&self.name));
        let mut out = Translation::default();

        for line in &self.lines {
            let idx = line.idx();
            let cmd = match line.parse() {
                Ok(Some(cmd)) => cmd,
                Ok(None) => continue,
                Err(err) => {
                    out.msgs.push(Msg::error(err, idx));
                    continue;
                }
            };

            if let Command::Memory(_, segment, index) = cmd {
                out.msgs.extend(check_limit(segment, index, idx));
            }

            match translator.command(&cmd) {
                Ok(code) => out.blocks.push(Block { idx, cmd, code }),
                Err(err) => out.msgs.push(Msg::error(err, idx)),
            }
        }
        out
    }
}

/// Indexes past the reserved cells are translated anyway, with a warning.
fn check_limit(segment: Segment, index: u16, idx: usize) -> Vec<Msg> {
    match segment.limit() {
        Some(limit) if index > limit => {
            let warn = Msg::warn(
                format!("Index {} is outside the {} segment (0-{})", index, segment, limit),
                idx,
            );
            let note = match segment {
                Segment::Pointer => Msg::note("pointer 0 is THIS and pointer 1 is THAT", idx),
                _ => Msg::note("temp occupies RAM[5] to RAM[12]", idx),
            };
            vec![warn, note]
        }
        _ => vec![],
    }
}

impl Translation {
    pub fn has_error(&self) -> bool {
        msg::has_error(&self.msgs)
    }

    pub fn asm(&self) -> Vec<Asm> {
        self.blocks
            .iter()
            .flat_map(|block| block.code.iter().cloned())
            .collect()
    }

    /// Assembly text, one instruction per line. With `annotate`, each group
    /// is preceded by its VM command as a comment.
    pub fn render(&self, annotate: bool) -> String {
        let mut text = String::new();
        for block in &self.blocks {
            if annotate {
                text.push_str(&Asm::Comment(block.cmd.to_string()).to_string());
                text.push('\n');
            }
            for asm in &block.code {
                text.push_str(&asm.to_string());
                text.push('\n');
            }
        }
        text
    }
}

// ----------------------------------------------------------------------------
// Inputs

/// Expand directories into their `.vm` files, sorted by name.
pub fn collect(inputs: &[String]) -> Result<Vec<String>, Error> {
    let mut paths = vec![];
    for input in inputs {
        let path = Path::new(input);
        if path.is_dir() {
            let entries =
                std::fs::read_dir(path).map_err(|e| Error::FileOpen(input.clone(), e))?;
            let mut found = vec![];
            for entry in entries {
                let entry = entry.map_err(|e| Error::FileRead(input.clone(), e))?;
                let file = entry.path();
                if file.extension().is_some_and(|ext| ext == SOURCE_EXT) {
                    found.push(file.to_string_lossy().to_string());
                }
            }
            found.sort();
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }
    if paths.is_empty() {
        return Err(Error::NoInput);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::MsgKind;

    const SRC: &str = "\
// Pushes and adds two constants
push constant 7
push constant 8   // second
add

eq
pop static 1
";

    #[test]
    fn test_name_from_path() {
        let unit = Unit::new("dir/SimpleAdd.vm", SRC).unwrap();
        assert_eq!(unit.name(), "SimpleAdd");
        assert_eq!(unit.lines().len(), 7);
        assert_eq!(unit.output_path(), PathBuf::from("dir/SimpleAdd.asm"));
    }

    #[test]
    fn test_invalid_name() {
        let res = Unit::new("dir/1bad.vm", SRC);
        assert!(matches!(res, Err(Error::InvalidUnitName(name)) if name == "1bad"));
        let res = Unit::new("dir/has space.vm", SRC);
        assert!(matches!(res, Err(Error::InvalidUnitName(_))));
    }

    #[test]
    fn test_translate_blocks() {
        let out = Unit::new("Foo.vm", SRC).unwrap().translate();
        assert!(!out.has_error());
        let idxs: Vec<usize> = out.blocks.iter().map(|b| b.idx).collect();
        assert_eq!(idxs, [1, 2, 3, 5, 6]);
        assert!(out.asm().contains(&Asm::sym("Foo.1")));
        assert!(out.asm().contains(&Asm::label("TRUE$1")));
    }

    #[test]
    fn test_translate_errors() {
        let src = "push constant 1\npop constant 2\nfoo\npush locl 1\npush local\n";
        let out = Unit::new("Foo.vm", src).unwrap().translate();
        assert!(out.has_error());
        let lines: Vec<usize> = out.msgs.iter().map(|m| m.idx()).collect();
        assert_eq!(lines, [1, 2, 3, 4]);
        assert_eq!(out.blocks.len(), 1);
    }

    #[test]
    fn test_translate_warns() {
        let out = Unit::new("Foo.vm", "push temp 8\npop pointer 2\npush temp 7\n")
            .unwrap()
            .translate();
        assert!(!out.has_error());
        let kinds: Vec<MsgKind> = out.msgs.iter().map(|m| m.kind()).collect();
        assert_eq!(
            kinds,
            [MsgKind::Warn, MsgKind::Note, MsgKind::Warn, MsgKind::Note]
        );
        assert_eq!(out.blocks.len(), 3);
    }

    #[test]
    fn test_render() {
        let out = Unit::new("Foo.vm", "push constant 7\nneg\n").unwrap().translate();
        assert_eq!(
            out.render(false),
            "@7\nD=A\n@SP\nA=M\nM=D\n@SP\nM=M+1\n@SP\nA=M-1\nM=-M\n"
        );
        let text = out.render(true);
        assert!(text.starts_with("// push constant 7\n@7\n"));
        assert!(text.contains("// neg\n@SP\nA=M-1\nM=-M\n"));
    }

    #[test]
    fn test_labels_restart_per_unit() {
        let a = Unit::new("A.vm", "eq\ngt\n").unwrap().translate();
        let b = Unit::new("B.vm", "eq\ngt\n").unwrap().translate();
        assert_eq!(a.render(false), b.render(false));
    }

    #[test]
    fn test_collect_missing() {
        assert!(matches!(collect(&[]), Err(Error::NoInput)));
        let paths = collect(&["Foo.vm".to_string()]).unwrap();
        assert_eq!(paths, ["Foo.vm"]);
    }
}
