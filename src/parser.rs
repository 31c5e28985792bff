//! Name list parser.
//!
//! Lists are line oriented. Everything from `#` to the end of a line is a
//! comment. A line is either a bare domain name or a dnsmasq style directive:
//!
//! ```text
//! ads.example.com             # bare domain
//! server=/tracker.example.net/114.114.114.114
//! ```
//!
//! Bad lines are logged and dropped; parsing a list never fails as a whole.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::Result;
use crate::logger::Logger;
use crate::matcher::NameSet;

/// First field of a directive line
pub const DIRECTIVE: &str = "server=";

const COMMENT: char = '#';
const FIELD_SEPARATOR: char = '/';

/// Result of parsing one list
#[derive(Debug, Default)]
pub struct ParsedList {
    /// Names added from the list
    pub names: NameSet,
    /// Lines seen, including blank and comment lines
    pub total_lines: u64,
    /// Lines dropped with a warning
    pub warnings: u64,
}

/// Shape of a single list line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Blank or comment-only line
    Blank,
    /// Bare domain name (not yet validated)
    Domain(&'a str),
    /// `server=/<domain>/<anything>`; only the domain field is kept
    Directive(&'a str),
    /// Three `/` separated fields with an unknown first field
    UnknownDirective(&'a str),
}

impl<'a> Line<'a> {
    /// Classify a raw line.
    pub fn classify(line: &'a str) -> Self {
        let line = match line.find(COMMENT) {
            Some(pos) => &line[..pos],
            None => line,
        };
        let line = line.trim();
        if line.is_empty() {
            return Line::Blank;
        }

        let mut fields = line.split(FIELD_SEPARATOR);
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            // The third field (upstream address) is never checked, so
            // server=/<domain>/, server=/<domain>/# and server=/<domain>/<ip> all count
            (Some(DIRECTIVE), Some(domain), Some(_), None) => Line::Directive(domain),
            (Some(token), Some(_), Some(_), None) => Line::UnknownDirective(token),
            _ => Line::Domain(line),
        }
    }
}

/// Parse a name list from a buffered reader.
///
/// `source` names the list in log messages. A read error ends parsing early;
/// whatever was parsed up to that point is returned.
pub fn parse_reader<R: BufRead>(mut reader: R, source: &str, logger: &Logger) -> ParsedList {
    let mut parsed = ParsedList::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                logger.warn(format_args!(
                    "{}: read failed after {} lines: {}",
                    source, parsed.total_lines, e
                ));
                parsed.warnings += 1;
                break;
            }
        }
        parsed.total_lines += 1;

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);

        let dropped = match Line::classify(line) {
            Line::Blank => continue,
            Line::Domain(name) | Line::Directive(name) => {
                if parsed.names.add(name) {
                    continue;
                }
                format!("{:?} isn't a domain name", name)
            }
            Line::UnknownDirective(token) => format!("unknown directive {:?}", token),
        };

        parsed.warnings += 1;
        logger.warn(format_args!(
            "{}:{}: {}",
            source, parsed.total_lines, dropped
        ));
    }

    parsed
}

/// Parse a name list file.
///
/// Fails only if the file cannot be opened.
pub fn parse_file(path: impl AsRef<Path>, logger: &Logger) -> Result<ParsedList> {
    let path = path.as_ref();
    let file = File::open(path)?;
    Ok(parse_reader(
        BufReader::new(file),
        &path.display().to_string(),
        logger,
    ))
}
