//! Lint rules
//!
//! Rules run over a masked copy of the source: comments and string contents
//! are blanked out (newlines kept) so byte offsets still line up with the
//! original text.

use std::sync::OnceLock;

use regex::Regex;

/// A violation found by one rule, positions are 1-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub line: usize,
    pub column: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    ColorHexCase,
    DeclarationNoImportant,
    SelectorMaxId,
    BlockNoEmpty,
    NoEolWhitespace,
    NoExtraSemicolons,
    MaxNestingDepth,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::ColorHexCase,
        Rule::DeclarationNoImportant,
        Rule::SelectorMaxId,
        Rule::BlockNoEmpty,
        Rule::NoEolWhitespace,
        Rule::NoExtraSemicolons,
        Rule::MaxNestingDepth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::ColorHexCase => "color-hex-case",
            Rule::DeclarationNoImportant => "declaration-no-important",
            Rule::SelectorMaxId => "selector-max-id",
            Rule::BlockNoEmpty => "block-no-empty",
            Rule::NoEolWhitespace => "no-eol-whitespace",
            Rule::NoExtraSemicolons => "no-extra-semicolons",
            Rule::MaxNestingDepth => "max-nesting-depth",
        }
    }

    pub fn from_name(name: &str) -> Option<Rule> {
        Rule::ALL.into_iter().find(|r| r.name() == name)
    }

    pub fn default_max(self) -> Option<usize> {
        match self {
            Rule::SelectorMaxId => Some(0),
            Rule::MaxNestingDepth => Some(4),
            _ => None,
        }
    }

    pub fn is_fixable(self) -> bool {
        matches!(
            self,
            Rule::ColorHexCase | Rule::NoEolWhitespace | Rule::NoExtraSemicolons
        )
    }

    /// Find violations in `source`
    pub fn check(self, source: &Source<'_>, max: Option<usize>) -> Vec<Violation> {
        let max = max.or(self.default_max()).unwrap_or(0);
        let found: Vec<(usize, String)> = match self {
            Rule::ColorHexCase => uppercase_hex_colors(source)
                .into_iter()
                .map(|(start, end)| {
                    let hex = &source.text[start..end];
                    (
                        start,
                        format!("Expected \"{hex}\" to be \"{}\"", hex.to_lowercase()),
                    )
                })
                .collect(),
            Rule::DeclarationNoImportant => important_regex()
                .find_iter(&source.masked)
                .map(|m| (m.start(), "Unexpected !important".to_string()))
                .collect(),
            Rule::SelectorMaxId => selectors(source)
                .into_iter()
                .filter(|(_, selector)| count_ids(selector) > max)
                .map(|(start, selector)| {
                    (
                        start,
                        format!(
                            "Expected \"{}\" to have no more than {max} ID selector{}",
                            selector.trim(),
                            if max == 1 { "" } else { "s" }
                        ),
                    )
                })
                .collect(),
            Rule::BlockNoEmpty => empty_block_regex()
                .find_iter(&source.masked)
                .filter(|m| !source.masked[..m.start()].ends_with('#'))
                .map(|m| (m.start(), "Unexpected empty block".to_string()))
                .collect(),
            Rule::NoEolWhitespace => eol_whitespace(source.text)
                .into_iter()
                .map(|offset| (offset, "Unexpected whitespace at end of line".to_string()))
                .collect(),
            Rule::NoExtraSemicolons => extra_semicolons(&source.masked)
                .into_iter()
                .map(|offset| (offset, "Unexpected extra semicolon".to_string()))
                .collect(),
            Rule::MaxNestingDepth => nesting_violations(source, max)
                .into_iter()
                .map(|offset| {
                    (
                        offset,
                        format!("Expected nesting depth to be no more than {max}"),
                    )
                })
                .collect(),
        };

        found
            .into_iter()
            .map(|(offset, text)| {
                let (line, column) = source.position(offset);
                Violation { line, column, text }
            })
            .collect()
    }

    /// Apply this rule's fix, returns the text unchanged for non-fixable rules
    pub fn fix(self, text: &str) -> String {
        match self {
            Rule::NoEolWhitespace => {
                let mut fixed = String::with_capacity(text.len());
                for line in text.split_inclusive('\n') {
                    let (body, ending) = split_line_ending(line);
                    fixed.push_str(body.trim_end_matches([' ', '\t']));
                    fixed.push_str(ending);
                }
                fixed
            }
            Rule::NoExtraSemicolons => {
                let source = Source::new(text);
                let extra = extra_semicolons(&source.masked);
                text.char_indices()
                    .filter(|(i, _)| !extra.contains(i))
                    .map(|(_, c)| c)
                    .collect()
            }
            Rule::ColorHexCase => {
                let source = Source::new(text);
                let mut fixed = text.to_string();
                for (start, end) in uppercase_hex_colors(&source) {
                    let lower = text[start..end].to_lowercase();
                    fixed.replace_range(start..end, &lower);
                }
                fixed
            }
            _ => text.to_string(),
        }
    }
}

/// Source text with its masked twin and line index
#[derive(Debug)]
pub struct Source<'a> {
    pub text: &'a str,
    pub masked: String,
    line_starts: Vec<usize>,
}

impl<'a> Source<'a> {
    pub fn new(text: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            text,
            masked: mask(text),
            line_starts,
        }
    }

    /// 1-based (line, column) of a byte offset; column counts characters
    pub fn position(&self, offset: usize) -> (usize, usize) {
        let line_index = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line_index];
        let column = self.text[line_start..offset].chars().count() + 1;
        (line_index + 1, column)
    }
}

/// Blank out comments and string contents, keeping newlines and byte offsets
pub fn mask(text: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        Code,
        LineComment,
        BlockComment,
        Str(char),
    }

    let mut out = String::with_capacity(text.len());
    let mut state = State::Code;
    let mut chars = text.chars().peekable();

    let blank = |c: char, out: &mut String| {
        if c == '\n' {
            out.push('\n');
        } else {
            out.push_str(&" ".repeat(c.len_utf8()));
        }
    };

    while let Some(c) = chars.next() {
        match state {
            State::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    state = State::LineComment;
                    blank(c, &mut out);
                }
                '/' if chars.peek() == Some(&'*') => {
                    state = State::BlockComment;
                    blank(c, &mut out);
                    if let Some(star) = chars.next() {
                        blank(star, &mut out);
                    }
                }
                '"' | '\'' => {
                    state = State::Str(c);
                    out.push(c);
                }
                _ => out.push(c),
            },
            State::LineComment => {
                if c == '\n' {
                    state = State::Code;
                }
                blank(c, &mut out);
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    blank(c, &mut out);
                    if let Some(slash) = chars.next() {
                        blank(slash, &mut out);
                    }
                    state = State::Code;
                } else {
                    blank(c, &mut out);
                }
            }
            State::Str(quote) => {
                if c == '\\' {
                    blank(c, &mut out);
                    if let Some(escaped) = chars.next() {
                        blank(escaped, &mut out);
                    }
                } else if c == quote {
                    out.push(c);
                    state = State::Code;
                } else if c == '\n' {
                    // unterminated string, recover at the line end
                    out.push('\n');
                    state = State::Code;
                } else {
                    blank(c, &mut out);
                }
            }
        }
    }
    out
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

fn important_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"(?i)!\s*important\b"))
}

fn empty_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"\{\s*\}"))
}

fn hex_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"#[0-9a-fA-F]+\b"))
}

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"#[A-Za-z_\-][A-Za-z0-9_\-]*"))
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid lint pattern {pattern}: {e}"))
}

/// Byte ranges of hex colors in declaration values that contain uppercase digits
fn uppercase_hex_colors(source: &Source<'_>) -> Vec<(usize, usize)> {
    let masked = &source.masked;
    hex_regex()
        .find_iter(masked)
        .filter(|m| matches!(m.len() - 1, 3 | 4 | 6 | 8))
        .filter(|m| m.as_str().chars().any(|c| c.is_ascii_uppercase()))
        .filter(|m| in_declaration_value(masked, m.start()))
        .map(|m| (m.start(), m.end()))
        .collect()
}

/// Whether `offset` sits after a `:` within a statement that ends in `;` or `}`
fn in_declaration_value(masked: &str, offset: usize) -> bool {
    let before = &masked[..offset];
    let statement_start = before.rfind(['{', '}', ';']).map_or(0, |i| i + 1);
    if !before[statement_start..].contains(':') {
        return false;
    }
    let after = &masked[offset..];
    match after.find(['{', '}', ';']) {
        Some(i) => !after[i..].starts_with('{') || after[..i].contains("#{"),
        None => true,
    }
}

/// Selectors (start offset, text) of every rule block, at-rules and nested
/// properties excluded
fn selectors(source: &Source<'_>) -> Vec<(usize, String)> {
    let masked = &source.masked;
    let mut found = Vec::new();
    for (brace, _) in masked.match_indices('{') {
        if masked[..brace].ends_with('#') {
            continue;
        }
        let before = &masked[..brace];
        let start = before.rfind(['{', '}', ';']).map_or(0, |i| i + 1);
        let raw = &before[start..];
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('@') || trimmed.ends_with(':') {
            continue;
        }
        let leading = raw.len() - raw.trim_start().len();
        found.push((start + leading, trimmed.to_string()));
    }
    found
}

fn count_ids(selector: &str) -> usize {
    // `#{...}` interpolation never matches: `{` is not an identifier character
    selector
        .split(',')
        .map(|part| id_regex().find_iter(part).count())
        .max()
        .unwrap_or(0)
}

fn eol_whitespace(text: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut line_start = 0;
    for line in text.split_inclusive('\n') {
        let (body, _) = split_line_ending(line);
        let trimmed = body.trim_end_matches([' ', '\t']);
        if trimmed.len() != body.len() {
            offsets.push(line_start + trimmed.len());
        }
        line_start += line.len();
    }
    offsets
}

/// Offsets of semicolons whose previous non-whitespace character is also `;`
fn extra_semicolons(masked: &str) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut previous = None;
    for (i, c) in masked.char_indices() {
        if c.is_whitespace() {
            continue;
        }
        if c == ';' && previous == Some(';') {
            offsets.push(i);
        }
        previous = Some(c);
    }
    offsets
}

/// Offsets of block openers nested deeper than `max` rule levels
fn nesting_violations(source: &Source<'_>, max: usize) -> Vec<usize> {
    let masked = &source.masked;
    let mut stack: Vec<bool> = Vec::new();
    let mut offsets = Vec::new();

    for (i, c) in masked.char_indices() {
        match c {
            '{' => {
                if masked[..i].ends_with('#') {
                    stack.push(false);
                    continue;
                }
                let before = &masked[..i];
                let start = before.rfind(['{', '}', ';']).map_or(0, |s| s + 1);
                let head = before[start..].trim();
                let counts = !head.starts_with('@');
                let depth = stack.iter().filter(|counted| **counted).count();
                if counts && depth > max {
                    let leading = before[start..].len() - before[start..].trim_start().len();
                    offsets.push(start + leading);
                }
                stack.push(counts);
            }
            '}' => {
                stack.pop();
            }
            _ => {}
        }
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(rule: Rule, text: &str) -> Vec<Violation> {
        rule.check(&Source::new(text), None)
    }

    #[test]
    fn mask_blanks_comments_and_strings() {
        let text = "a { content: \"{}\"; } // b { }\n/* c { } */ d {}";
        let masked = mask(text);

        assert_eq!(masked.len(), text.len());
        assert_eq!(masked.matches('{').count(), 2);
        assert!(masked.contains("\n"));
        assert!(masked.starts_with("a { content: \"  \";"));
    }

    #[test]
    fn position_is_one_based() {
        let source = Source::new("a {\n  color: red;\n}");
        assert_eq!(source.position(0), (1, 1));
        assert_eq!(source.position(6), (2, 3));
    }

    #[test]
    fn important_is_reported() {
        let found = check(Rule::DeclarationNoImportant, ".a {\n  color: red !important;\n}\n");
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].line, found[0].column), (2, 14));
        assert_eq!(found[0].text, "Unexpected !important");
    }

    #[test]
    fn important_in_comment_is_ignored() {
        assert!(check(Rule::DeclarationNoImportant, "// never use !important\n.a {}").is_empty());
    }

    #[test]
    fn uppercase_hex_is_reported_and_fixed() {
        let text = ".a {\n  color: #FFF;\n  background: #abcdef;\n}\n";
        let found = check(Rule::ColorHexCase, text);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text, "Expected \"#FFF\" to be \"#fff\"");

        let fixed = Rule::ColorHexCase.fix(text);
        assert_eq!(fixed, ".a {\n  color: #fff;\n  background: #abcdef;\n}\n");
    }

    #[test]
    fn hex_like_id_selector_is_not_a_color() {
        assert!(check(Rule::ColorHexCase, "#ADD {\n  color: red;\n}\n").is_empty());
    }

    #[test]
    fn id_selectors_are_limited() {
        let found = check(Rule::SelectorMaxId, "#main .a {\n  color: red;\n}\n.b { color: red; }\n");
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].text,
            "Expected \"#main .a\" to have no more than 0 ID selectors"
        );
    }

    #[test]
    fn interpolation_is_not_an_id() {
        let text = ".icon-#{$name} {\n  color: red;\n}\n";
        assert!(check(Rule::SelectorMaxId, text).is_empty());
        assert!(check(Rule::BlockNoEmpty, text).is_empty());
    }

    #[test]
    fn empty_blocks_are_reported() {
        let found = check(Rule::BlockNoEmpty, ".a {\n}\n.b { color: red; }\n");
        assert_eq!(found.len(), 1);
        assert_eq!((found[0].line, found[0].column), (1, 4));
    }

    #[test]
    fn eol_whitespace_is_reported_and_fixed() {
        let text = ".a {  \r\n  color: red;\t\n}\n";
        let found = check(Rule::NoEolWhitespace, text);
        assert_eq!(found.len(), 2);
        assert_eq!((found[0].line, found[0].column), (1, 5));

        assert_eq!(Rule::NoEolWhitespace.fix(text), ".a {\r\n  color: red;\n}\n");
    }

    #[test]
    fn extra_semicolons_are_reported_and_fixed() {
        let text = ".a {\n  color: red;;\n  margin: 0; ;\n}\n";
        let found = check(Rule::NoExtraSemicolons, text);
        assert_eq!(found.len(), 2);

        assert_eq!(
            Rule::NoExtraSemicolons.fix(text),
            ".a {\n  color: red;\n  margin: 0; \n}\n"
        );
    }

    #[test]
    fn nesting_depth_ignores_at_rules() {
        let text = ".a {\n  .b {\n    @media print {\n      .c {\n        color: red;\n      }\n    }\n  }\n}\n";
        assert!(Rule::MaxNestingDepth
            .check(&Source::new(text), Some(2))
            .is_empty());

        let found = Rule::MaxNestingDepth.check(&Source::new(text), Some(1));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 4);
        assert_eq!(found[0].text, "Expected nesting depth to be no more than 1");
    }

    #[test]
    fn rule_names_round_trip() {
        for rule in Rule::ALL {
            assert_eq!(Rule::from_name(rule.name()), Some(rule));
        }
        assert_eq!(Rule::from_name("indentation"), None);
    }
}
