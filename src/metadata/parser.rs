//! Lenient RFC 822 style parsing for METADATA files.
//!
//! A METADATA file is a run of `Field: value` header lines, optionally
//! followed by a blank line and a free-text body. Header values may continue
//! across lines when the continuation line starts with whitespace. The parser
//! does not validate anything; garbage lines end the header section and
//! become part of the body.

use super::MetadataRecord;

/// The ordered headers and optional body of one METADATA file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMetadata {
    headers: Vec<(String, String)>,
    body: Option<String>,
}

/// Parse METADATA text into headers and body.
pub fn parse(content: &str) -> RawMetadata {
    let mut headers: Vec<(String, String)> = Vec::new();
    let mut body_lines: Vec<&str> = Vec::new();
    let mut in_body = false;

    for line in content.lines() {
        if in_body {
            body_lines.push(line);
            continue;
        }

        if line.is_empty() {
            in_body = true;
            continue;
        }

        if line.starts_with(' ') || line.starts_with('\t') {
            // Continuation of the previous header, kept folded
            if let Some((_, value)) = headers.last_mut() {
                value.push('\n');
                value.push_str(line);
                continue;
            }
        }

        match line.split_once(':') {
            Some((name, value)) => {
                headers.push((name.trim().to_string(), value.trim_start().to_string()));
            }
            None => {
                // Not a header and nothing to fold onto: the rest is body
                in_body = true;
                body_lines.push(line);
            }
        }
    }

    let body = if body_lines.iter().all(|l| l.trim().is_empty()) {
        None
    } else {
        Some(body_lines.join("\n").trim_end().to_string())
    };

    RawMetadata { headers, body }
}

impl RawMetadata {
    /// The value of a header; the last occurrence wins on duplicates.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of a header, in file order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// The free-text body following the headers, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Convert to a field mapping: scalar values, last occurrence wins.
    ///
    /// A non-empty body becomes the `Description` field unless an explicit
    /// `Description` header is present.
    pub fn flatten(&self) -> MetadataRecord {
        let mut record = MetadataRecord::new();
        for (name, value) in &self.headers {
            record.set(name, value.clone());
        }
        if let Some(body) = &self.body {
            if !record.contains("Description") {
                record.set("Description", body.clone());
            }
        }
        record
    }
}
