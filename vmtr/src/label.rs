/// Counter behind the jump targets of comparison operators.
///
/// One instance belongs to one translation run; it restarts from zero for
/// every source unit so repeated runs produce identical output.
#[derive(Debug, Default)]
pub struct Labels {
    count: usize,
}

impl Labels {
    pub fn new() -> Self {
        Labels { count: 0 }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Increment, then return the new value.
    pub fn next(&mut self) -> usize {
        self.count += 1;
        self.count
    }

    pub fn pair(&mut self) -> LabelPair {
        LabelPair::new(self.next())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelPair {
    pub on_true: String,
    pub end: String,
}

impl LabelPair {
    pub fn new(n: usize) -> Self {
        LabelPair {
            on_true: format!("TRUE${}", n),
            end: format!("END${}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next() {
        let mut labels = Labels::new();
        assert_eq!(labels.next(), 1);
        assert_eq!(labels.next(), 2);
        assert_eq!(labels.next(), 3);
    }

    #[test]
    fn test_reset() {
        let mut labels = Labels::new();
        labels.next();
        labels.next();
        labels.reset();
        assert_eq!(labels.next(), 1);
    }

    #[test]
    fn test_pair() {
        let mut labels = Labels::new();
        assert_eq!(
            labels.pair(),
            LabelPair {
                on_true: "TRUE$1".to_string(),
                end: "END$1".to_string(),
            }
        );
        assert_eq!(labels.pair().end, "END$2");
    }

    #[test]
    fn test_independent() {
        let mut a = Labels::new();
        let mut b = Labels::new();
        a.next();
        a.next();
        assert_eq!(b.next(), 1);
        assert_eq!(a.next(), 3);
    }
}
