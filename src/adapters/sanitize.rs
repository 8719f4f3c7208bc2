//! Log sanitization for contact details, record numbers and credentials.
//!
//! Applied to every formatted log line through `SanitizingMakeWriter`, so
//! call sites do not have to remember to redact. It covers:
//! - Email addresses and phone numbers typed into the sign-up forms
//! - Medical record numbers (`00-991-23`)
//! - License numbers entered by doctors
//! - `password=...` style assignments
//! - Local file URLs from document capture
//!
//! Input is capped at `CAREFLOW_SANITIZE_MAX_BYTES` (16 KiB by default).

use regex::{Regex, RegexSet};
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

static PII_PATTERNS: OnceLock<Option<PiiPatterns>> = OnceLock::new();

const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

const RULES: [(&str, &str); 6] = [
    (
        r"(?i)\b[a-z0-9](?:[a-z0-9._%+-]{0,62}[a-z0-9])?@(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,}\b",
        "[REDACTED-EMAIL]",
    ),
    (
        r"(?:\+\d{1,3}[-.\s]?)?\(?\b\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}\b",
        "[REDACTED-PHONE]",
    ),
    (r"\b\d{2}-\d{3}-\d{2}\b", "[REDACTED-RECORD]"),
    (
        r"(?i)\b(?:license|licence|lic)(?:\s*(?:no\.?|number|#))?\s*[:=]?\s*[A-Z]{0,4}-?\d{4,}\b",
        "[REDACTED-LICENSE]",
    ),
    (
        r"(?i)\b(?:password|passwd|pwd|confirm_password)\b\s*[:=]\s*\S+",
        "[REDACTED-SECRET]",
    ),
    (r"file://\S+", "[REDACTED-FILE]"),
];

struct PiiPattern {
    regex: Regex,
    replacement: &'static str,
}

struct PiiPatterns {
    set: RegexSet,
    patterns: Vec<PiiPattern>,
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }
    let mut end = max_bytes.min(input.len());
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn max_sanitize_bytes() -> usize {
    std::env::var("CAREFLOW_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn get_patterns() -> Option<&'static PiiPatterns> {
    PII_PATTERNS
        .get_or_init(|| {
            let set = RegexSet::new(RULES.iter().map(|(p, _)| *p)).ok()?;
            let patterns = RULES
                .iter()
                .map(|(pattern, replacement)| {
                    Regex::new(pattern).ok().map(|regex| PiiPattern {
                        regex,
                        replacement,
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            Some(PiiPatterns { set, patterns })
        })
        .as_ref()
}

/// Replace every recognised PII pattern in `input`.
///
/// If the pattern table failed to build, the whole line is withheld rather
/// than written unredacted.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let Some(patterns) = get_patterns() else {
        return "[REDACTED-UNSANITIZED]".to_string();
    };

    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut result = prefix.to_string();
    for idx in patterns.set.matches(prefix).into_iter() {
        let pattern = &patterns.patterns[idx];
        result = pattern
            .regex
            .replace_all(&result, pattern.replacement)
            .into_owned();
    }

    if truncated {
        result.push_str(" [TRUNCATED]");
    }
    result
}

/// Check if a string contains potential PII.
#[must_use]
pub fn contains_pii(input: &str) -> bool {
    let (prefix, _) = truncate_to_char_boundary(input, max_sanitize_bytes());
    get_patterns().map_or(true, |p| p.set.is_match(prefix))
}

/// A `tracing_subscriber` writer that sanitizes each formatted line before
/// handing it to the wrapped sink.
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

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn write_sanitized(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        let text = String::from_utf8_lossy(bytes);
        self.inner.write_all(sanitize(&text).as_bytes())
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.write_sanitized(&line)?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A single line without newline must not grow without bound.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let pending = std::mem::take(&mut self.buffer);
            self.write_sanitized(&pending)?;
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
            self.write_sanitized(&pending)?;
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
    fn test_sanitize_email() {
        let sanitized = sanitize("Sign up for sabrina.welder@example.com");
        assert!(sanitized.contains("[REDACTED-EMAIL]"));
        assert!(!sanitized.contains("sabrina"));
    }

    #[test]
    fn test_sanitize_phone() {
        let sanitized = sanitize("Calling +1 (555) 123-4567 now");
        assert!(sanitized.contains("[REDACTED-PHONE]"));
        assert!(!sanitized.contains("123-4567"));
    }

    #[test]
    fn test_sanitize_record_number() {
        let sanitized = sanitize("Opened report for record 00-991-23");
        assert!(sanitized.contains("[REDACTED-RECORD]"));
    }

    #[test]
    fn test_sanitize_license() {
        let sanitized = sanitize("doctor license: MD-123456 submitted");
        assert!(sanitized.contains("[REDACTED-LICENSE]"));
        assert!(!sanitized.contains("123456"));
    }

    #[test]
    fn test_sanitize_password_assignment() {
        let sanitized = sanitize("form password=hunter2 email missing");
        assert!(sanitized.contains("[REDACTED-SECRET]"));
        assert!(!sanitized.contains("hunter2"));
    }

    #[test]
    fn test_sanitize_file_url() {
        let sanitized = sanitize("viewing file:///home/ana/scan.pdf");
        assert_eq!(sanitized, "viewing [REDACTED-FILE]");
    }

    #[test]
    fn test_contains_pii() {
        assert!(contains_pii("reach me at a@b.io"));
        assert!(!contains_pii("Navigated to patient-dashboard"));
    }

    #[test]
    fn test_sanitize_truncates_large_inputs() {
        let sanitized = sanitize_with_limit("prefix with a much longer tail", 6);
        assert_eq!(sanitized, "prefix [TRUNCATED]");
    }

    #[test]
    fn test_writer_sanitizes_lines() {
        let mut out = Vec::new();
        {
            let mut writer = SanitizingWriter::new(&mut out);
            writer.write_all(b"email a@b.io\npartial").expect("write");
            writer.flush().expect("flush");
        }
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(text, "email [REDACTED-EMAIL]\npartial");
    }
}
