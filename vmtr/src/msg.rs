use color_print::cprintln;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MsgKind {
    Error,
    Warn,
    Note,
}

/// A diagnostic attached to one source line.
#[derive(Debug)]
pub struct Msg {
    kind: MsgKind,
    msg: String,
    idx: usize,
}

impl Msg {
    pub fn error(msg: impl ToString, idx: usize) -> Self {
        Msg {
            kind: MsgKind::Error,
            msg: msg.to_string(),
            idx,
        }
    }

    pub fn warn(msg: impl ToString, idx: usize) -> Self {
        Msg {
            kind: MsgKind::Warn,
            msg: msg.to_string(),
            idx,
        }
    }

    pub fn note(msg: impl ToString, idx: usize) -> Self {
        Msg {
            kind: MsgKind::Note,
            msg: msg.to_string(),
            idx,
        }
    }

    pub fn kind(&self) -> MsgKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.msg
    }

    /// 0-based index of the line the message points at.
    pub fn idx(&self) -> usize {
        self.idx
    }
}

impl Msg {
    pub fn print(&self, path: &str, raw: &str) {
        match self.kind {
            MsgKind::Error => cprintln!("<red,bold>error</>: {}", self.msg),
            MsgKind::Warn => cprintln!("<yellow,bold>warn</>: {}", self.msg),
            MsgKind::Note => cprintln!("<green,bold>note</>: {}", self.msg),
        }
        cprintln!("     <blue>--></> <underline>{}:{}</>", path, self.idx + 1);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", self.idx + 1, raw);
        cprintln!("      <blue>|</>");
    }
}

pub fn has_error(msgs: &[Msg]) -> bool {
    msgs.iter().any(|msg| msg.kind == MsgKind::Error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_error() {
        let msgs = vec![Msg::warn("temp index", 0), Msg::note("here", 1)];
        assert!(!has_error(&msgs));
        let msgs = vec![Msg::warn("temp index", 0), Msg::error("bad", 3)];
        assert!(has_error(&msgs));
        assert!(!has_error(&[]));
    }

    #[test]
    fn test_fields() {
        let msg = Msg::error(crate::error::Error::PopConstant, 7);
        assert_eq!(msg.kind(), MsgKind::Error);
        assert_eq!(msg.idx(), 7);
        assert_eq!(msg.text(), "Cannot pop into the constant segment");
    }
}
