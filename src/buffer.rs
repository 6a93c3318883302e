/// Ordered output fragments for a single compile.
///
/// Consecutive [`push_str`](Self::push_str) calls grow the same fragment so
/// that per-character writes don't balloon the fragment list. Anything pushed
/// through [`push_fragment`](Self::push_fragment) always stands alone and ends
/// the current merge run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    fragments: Vec<String>,
    /// Length of `fragments` right after the last merging write.
    merge_slot: Option<usize>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, s: &str) {
        if self.merge_slot == Some(self.fragments.len()) {
            if let Some(last) = self.fragments.last_mut() {
                last.push_str(s);
                return;
            }
        }
        self.fragments.push(s.to_string());
        self.merge_slot = Some(self.fragments.len());
    }

    pub fn push_fragment<T: Into<String>>(&mut self, s: T) {
        self.fragments.push(s.into());
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn finish(self) -> String {
        self.fragments.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ntest::timeout(100)]
    fn test_plain_writes_merge() {
        let mut buffer = OutputBuffer::new();
        buffer.push_str("a");
        buffer.push_str("b");
        assert_eq!(buffer.fragments(), ["ab"]);
        assert_eq!(buffer.finish(), "ab");
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_fragment_breaks_merge_run() {
        let mut buffer = OutputBuffer::new();
        buffer.push_str("a");
        buffer.push_fragment("{% if x %}");
        buffer.push_str("b");
        buffer.push_str("c");
        assert_eq!(buffer.fragments(), ["a", "{% if x %}", "bc"]);
        assert_eq!(buffer.finish(), "a{% if x %}bc");
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_fragments_never_merge_with_each_other() {
        let mut buffer = OutputBuffer::new();
        buffer.push_fragment("<p>");
        buffer.push_fragment("</p>");
        assert_eq!(buffer.fragments().len(), 2);
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_empty_buffer() {
        assert_eq!(OutputBuffer::new().finish(), "");
    }
}
