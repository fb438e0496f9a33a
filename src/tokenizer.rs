//! Line splitting: comment stripping and operand field extraction.

/// Separators between the mnemonic and operands.
pub const FIELD_DELIMITERS: &[char] = &[',', ' ', '\t'];
/// Everything from this character to the end of the line is ignored.
pub const COMMENT_DELIMITER: char = ';';

/// Returns the next non-empty field of `text` and what remains after it.
///
/// Consecutive delimiters produce empty fields, which are skipped. `None`
/// means the input is exhausted.
pub fn next_field<'a>(text: &'a str, delimiters: &[char]) -> Option<(&'a str, &'a str)> {
    let mut rest = text;
    loop {
        if rest.is_empty() {
            return None;
        }
        let (field, tail) = match rest.find(delimiters) {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, ""),
        };
        if !field.is_empty() {
            return Some((field, tail));
        }
        rest = tail;
    }
}

/// Drops the comment part of a line, if any.
pub fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT_DELIMITER) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Strips a trailing `\n` or `\r\n` from the last field of a line.
pub fn trim_line_end(field: &str) -> &str {
    let field = field.strip_suffix('\n').unwrap_or(field);
    field.strip_suffix('\r').unwrap_or(field)
}

/// Iterator over every remaining operand field of `text`.
pub fn fields(text: &str) -> Fields<'_> {
    Fields { rest: text }
}

pub struct Fields<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Fields<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let (field, rest) = next_field(self.rest, FIELD_DELIMITERS)?;
        self.rest = rest;
        Some(field)
    }
}
