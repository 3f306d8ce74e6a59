//! Log redaction for account data.
//!
//! Log lines are scrubbed of email addresses and `password=`-style secrets
//! before they reach the log file. Callsites should still avoid putting
//! credentials in log fields; this writer catches what slips through.

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

/// Compiled redaction rules.
static RULES: OnceLock<Rules> = OnceLock::new();

/// Longest line scrubbed in one pass. Longer input is truncated.
const MAX_LINE_BYTES: usize = 16 * 1024;

struct Rule {
    regex: Regex,
    replacement: &'static str,
}

struct Rules {
    any: RegexSet,
    rules: Vec<Rule>,
}

fn rules() -> &'static Rules {
    RULES.get_or_init(|| {
        let table: [(&str, &str); 3] = [
            // password-like key/value pairs, in debug and display formats
            (
                r#"(?i)\b(password|passwd|pwd|confirm_password|confirmation)\b(\s*[:=]\s*)("[^"]*"|\S+)"#,
                "$1$2[REDACTED-SECRET]",
            ),
            (
                r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
                "[REDACTED-EMAIL]",
            ),
            (
                r"(?i)\b(token|secret|api[_-]?key)\b(\s*[:=]\s*)\S+",
                "$1$2[REDACTED-SECRET]",
            ),
        ];

        let any = RegexSet::new(table.iter().map(|(p, _)| *p)).expect("Valid regex set");
        let rules = table
            .into_iter()
            .map(|(pattern, replacement)| Rule {
                regex: Regex::new(pattern).expect("Valid regex"),
                replacement,
            })
            .collect();

        Rules { any, rules }
    })
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

/// Replace account data in `input`.
#[must_use]
pub fn redact(input: &str) -> String {
    redact_with_limit(input, MAX_LINE_BYTES)
}

fn redact_with_limit(input: &str, max_bytes: usize) -> String {
    let rules = rules();
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut out = if rules.any.is_match(prefix) {
        let matched: Vec<usize> = rules.any.matches(prefix).into_iter().collect();
        let mut result = prefix.to_string();
        for idx in matched {
            let rule = &rules.rules[idx];
            result = rule.regex.replace_all(&result, rule.replacement).into_owned();
        }
        result
    } else {
        prefix.to_string()
    };

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// A `tracing_subscriber` writer wrapper that redacts each formatted line
/// before it is written to the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W> SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn write_redacted(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let line = String::from_utf8_lossy(bytes);
        self.inner.write_all(redact(&line).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_redacted(&line)?;
        }
        Ok(())
    }
}

impl<W> std::io::Write for SanitizingWriter<W>
where
    W: std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // a line with no newline in sight still gets flushed
        if self.buffer.len() > MAX_LINE_BYTES * 2 {
            let pending = std::mem::take(&mut self.buffer);
            self.write_redacted(&pending)?;
            self.inner.write_all(b"\n")?;
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let pending = std::mem::take(&mut self.buffer);
            self.write_redacted(&pending)?;
        }
        self.inner.flush()
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_redact_email() {
        let out = redact("login rejected for alice@gmail.com");
        assert_eq!(out, "login rejected for [REDACTED-EMAIL]");
    }

    #[test]
    fn test_redact_password_pairs() {
        let out = redact(r#"form password="hunter2" confirmation: hunter3"#);
        assert!(!out.contains("hunter2"));
        assert!(!out.contains("hunter3"));
        assert!(out.contains("password=[REDACTED-SECRET]"));
    }

    #[test]
    fn test_plain_lines_untouched() {
        let line = "Routed to view Diabetes";
        assert_eq!(redact(line), line);
    }

    #[test]
    fn test_truncates_long_lines() {
        let out = redact_with_limit("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(out, "abcdefghij [TRUNCATED]");
    }

    #[test]
    fn test_writer_redacts_per_line() {
        let mut sink = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut sink);
            writer.write_all(b"user bob@gmail.com signed in\npartial ").expect("write");
            writer.write_all(b"line\n").expect("write");
        }
        let written = String::from_utf8(sink).expect("utf8");
        assert_eq!(written, "user [REDACTED-EMAIL] signed in\npartial line\n");
    }
}
