//! Praat TextGrid reader.
//!
//! Handles both the long ("ooTextFile") and short text layouts by reading
//! the file as a stream of numbers, quoted strings and `<exists>` flags and
//! ignoring keys such as `xmin =` or `item [1]:`. UTF-16 files are detected
//! by their byte order mark.

use crate::error::{DatasetError, DatasetResult};
use std::path::{Path, PathBuf};

/// A labelled span on an interval tier
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Start time in seconds
    pub xmin: f64,
    /// End time in seconds
    pub xmax: f64,
    /// Label text
    pub text: String,
}

/// A labelled instant on a point tier
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Time in seconds
    pub time: f64,
    /// Label text
    pub mark: String,
}

/// Tier contents
#[derive(Debug, Clone, PartialEq)]
pub enum TierKind {
    /// `IntervalTier`
    Intervals(Vec<Interval>),
    /// `TextTier`
    Points(Vec<Point>),
}

/// One named tier
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    /// Tier name, e.g. `words` or `phones`
    pub name: String,
    /// Start time in seconds
    pub xmin: f64,
    /// End time in seconds
    pub xmax: f64,
    /// Intervals or points
    pub kind: TierKind,
}

impl Tier {
    /// Intervals of an interval tier, empty for point tiers
    pub fn intervals(&self) -> &[Interval] {
        match &self.kind {
            TierKind::Intervals(intervals) => intervals,
            TierKind::Points(_) => &[],
        }
    }
}

/// A parsed TextGrid
#[derive(Debug, Clone, PartialEq)]
pub struct TextGrid {
    /// Start time in seconds
    pub xmin: f64,
    /// End time in seconds
    pub xmax: f64,
    /// Tiers in file order
    pub tiers: Vec<Tier>,
}

impl TextGrid {
    /// Read and parse a TextGrid file
    pub fn from_file<P: AsRef<Path>>(path: P) -> DatasetResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let text = decode_text(&bytes).ok_or_else(|| DatasetError::ParseError {
            path: path.to_path_buf(),
            line: 0,
            message: "invalid text encoding".to_string(),
        })?;
        Self::parse(&text, path)
    }

    /// Parse TextGrid source; `path` is only used in error messages
    pub fn parse(source: &str, path: &Path) -> DatasetResult<Self> {
        let mut tokens = Tokens::new(source, path);

        let file_type = tokens.string()?;
        if !file_type.starts_with("ooTextFile") {
            return Err(tokens.error(format!("unexpected file type {:?}", file_type)));
        }
        let object_class = tokens.string()?;
        if object_class != "TextGrid" {
            return Err(tokens.error(format!("unexpected object class {:?}", object_class)));
        }

        let xmin = tokens.number()?;
        let xmax = tokens.number()?;
        if !tokens.flag()? {
            return Ok(TextGrid {
                xmin,
                xmax,
                tiers: Vec::new(),
            });
        }

        let size = tokens.count()?;
        let mut tiers = Vec::new();
        for _ in 0..size {
            tiers.push(parse_tier(&mut tokens)?);
        }

        Ok(TextGrid { xmin, xmax, tiers })
    }

    /// Tier by position
    pub fn tier(&self, index: usize) -> Option<&Tier> {
        self.tiers.get(index)
    }

    /// First tier with the given name
    pub fn tier_by_name(&self, name: &str) -> Option<&Tier> {
        self.tiers.iter().find(|t| t.name == name)
    }
}

fn parse_tier(tokens: &mut Tokens<'_>) -> DatasetResult<Tier> {
    let class = tokens.string()?;
    let name = tokens.string()?;
    let xmin = tokens.number()?;
    let xmax = tokens.number()?;
    let size = tokens.count()?;

    let kind = match class.as_str() {
        "IntervalTier" => {
            let mut intervals = Vec::new();
            for _ in 0..size {
                intervals.push(Interval {
                    xmin: tokens.number()?,
                    xmax: tokens.number()?,
                    text: tokens.string()?,
                });
            }
            TierKind::Intervals(intervals)
        }
        "TextTier" => {
            let mut points = Vec::new();
            for _ in 0..size {
                points.push(Point {
                    time: tokens.number()?,
                    mark: tokens.string()?,
                });
            }
            TierKind::Points(points)
        }
        other => return Err(tokens.error(format!("unknown tier class {:?}", other))),
    };

    Ok(Tier {
        name,
        xmin,
        xmax,
        kind,
    })
}

/// Decode UTF-8 or BOM-marked UTF-16 text
fn decode_text(bytes: &[u8]) -> Option<String> {
    fn utf16(units: impl Iterator<Item = u16>) -> Option<String> {
        char::decode_utf16(units).collect::<Result<String, _>>().ok()
    }

    match bytes {
        [0xFF, 0xFE, rest @ ..] => {
            utf16(rest.chunks_exact(2).map(|c| u16::from_le_bytes([c[0], c[1]])))
        }
        [0xFE, 0xFF, rest @ ..] => {
            utf16(rest.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]])))
        }
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).ok(),
        _ => String::from_utf8(bytes.to_vec()).ok(),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Text(String),
    Flag(bool),
}

/// Value tokens of a TextGrid, skipping keys, brackets and `!` comments
struct Tokens<'a> {
    source: &'a str,
    pos: usize,
    line: usize,
    path: PathBuf,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str, path: &Path) -> Self {
        Tokens {
            source,
            pos: 0,
            line: 1,
            path: path.to_path_buf(),
        }
    }

    fn error(&self, message: String) -> DatasetError {
        DatasetError::ParseError {
            path: self.path.clone(),
            line: self.line,
            message,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn next_token(&mut self) -> DatasetResult<Option<Token>> {
        while let Some(c) = self.peek_char() {
            match c {
                c if c.is_whitespace() => {
                    self.bump();
                }
                '!' => {
                    while let Some(c) = self.bump() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                '"' => return self.quoted().map(|s| Some(Token::Text(s))),
                '[' => {
                    while let Some(c) = self.bump() {
                        if c == ']' {
                            break;
                        }
                    }
                }
                '<' => {
                    let word = self.word();
                    match word.as_str() {
                        "<exists>" => return Ok(Some(Token::Flag(true))),
                        "<absent>" => return Ok(Some(Token::Flag(false))),
                        _ => {}
                    }
                }
                _ => {
                    let word = self.word();
                    if let Ok(value) = word.parse::<f64>() {
                        return Ok(Some(Token::Number(value)));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Read up to whitespace, a quote or a bracket
    fn word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == '"' || c == '[' {
                break;
            }
            word.push(c);
            self.bump();
        }
        word
    }

    /// Quoted string where `""` is an escaped quote
    fn quoted(&mut self) -> DatasetResult<String> {
        self.bump();
        let mut text = String::new();
        loop {
            match self.bump() {
                Some('"') if self.peek_char() == Some('"') => {
                    self.bump();
                    text.push('"');
                }
                Some('"') => return Ok(text),
                Some(c) => text.push(c),
                None => return Err(self.error("unterminated string".to_string())),
            }
        }
    }

    fn expect(&mut self, what: &str) -> DatasetResult<Token> {
        self.next_token()?
            .ok_or_else(|| self.error(format!("unexpected end of file, expected {}", what)))
    }

    fn number(&mut self) -> DatasetResult<f64> {
        match self.expect("a number")? {
            Token::Number(value) => Ok(value),
            other => Err(self.error(format!("expected a number, found {:?}", other))),
        }
    }

    fn count(&mut self) -> DatasetResult<usize> {
        let value = self.number()?;
        // every element takes at least one byte of the remaining source
        let remaining = (self.source.len() - self.pos) as f64;
        if value < 0.0 || value.fract() != 0.0 || value > remaining {
            return Err(self.error(format!("invalid count {}", value)));
        }
        Ok(value as usize)
    }

    fn string(&mut self) -> DatasetResult<String> {
        match self.expect("a string")? {
            Token::Text(text) => Ok(text),
            other => Err(self.error(format!("expected a string, found {:?}", other))),
        }
    }

    fn flag(&mut self) -> DatasetResult<bool> {
        match self.expect("<exists> or <absent>")? {
            Token::Flag(flag) => Ok(flag),
            other => Err(self.error(format!("expected a tiers flag, found {:?}", other))),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const LONG: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

xmin = 0
xmax = 1.5
tiers? <exists>
size = 2
item []:
    item [1]:
        class = "IntervalTier"
        name = "words"
        xmin = 0
        xmax = 1.5
        intervals: size = 2
        intervals [1]:
            xmin = 0
            xmax = 0.5
            text = ""
        intervals [2]:
            xmin = 0.5
            xmax = 1.5
            text = "say ""hi"""
    item [2]:
        class = "IntervalTier"
        name = "phones"
        xmin = 0
        xmax = 1.5
        intervals: size = 3
        intervals [1]:
            xmin = 0
            xmax = 0.5
            text = "sil"
        intervals [2]:
            xmin = 0.5
            xmax = 0.9
            text = "HH"
        intervals [3]:
            xmin = 0.9
            xmax = 1.5
            text = "AY1"
"#;

    const SHORT: &str = r#"File type = "ooTextFile"
Object class = "TextGrid"

0
2.25
<exists>
2
"IntervalTier"
"phones"
0
2.25
2
0
1.0
"M"
1.0
2.25
"IY"
"TextTier"
"events"
0
2.25
1
1.2
"click"
"#;

    fn parse(source: &str) -> TextGrid {
        TextGrid::parse(source, Path::new("test.TextGrid")).unwrap()
    }

    #[test]
    fn test_long_format() {
        let grid = parse(LONG);

        assert_eq!(grid.xmax, 1.5);
        assert_eq!(grid.tiers.len(), 2);
        assert_eq!(grid.tiers[0].intervals()[1].text, "say \"hi\"");

        let phones = grid.tier_by_name("phones").unwrap();
        assert_eq!(phones.intervals().len(), 3);
        assert_eq!(
            phones.intervals()[2],
            Interval {
                xmin: 0.9,
                xmax: 1.5,
                text: "AY1".to_string()
            }
        );
    }

    #[test]
    fn test_short_format_with_point_tier() {
        let grid = parse(SHORT);

        assert_eq!(grid.tiers.len(), 2);
        assert_eq!(grid.tier(0).unwrap().intervals()[1].text, "IY");
        assert_eq!(
            grid.tier(1).unwrap().kind,
            TierKind::Points(vec![Point {
                time: 1.2,
                mark: "click".to_string()
            }])
        );
        assert!(grid.tier(1).unwrap().intervals().is_empty());
    }

    #[test]
    fn test_absent_tiers() {
        let source = "File type = \"ooTextFile\"\nObject class = \"TextGrid\"\n0\n1\n<absent>\n";
        assert!(parse(source).tiers.is_empty());
    }

    #[test]
    fn test_truncated_file_reports_line() {
        let truncated: String = LONG.lines().take(20).collect::<Vec<_>>().join("\n");
        let err = TextGrid::parse(&truncated, Path::new("cut.TextGrid")).unwrap_err();
        match err {
            DatasetError::ParseError { line, .. } => assert!(line >= 19),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_huge_counts_are_parse_errors() {
        let tiers = "File type = \"ooTextFile\"\nObject class = \"TextGrid\"\n0\n1\n<exists>\n1e300\n";
        assert!(matches!(
            TextGrid::parse(tiers, Path::new("x")),
            Err(DatasetError::ParseError { .. })
        ));

        let intervals = LONG.replacen("intervals: size = 2", "intervals: size = 18446744073709551615", 1);
        assert!(matches!(
            TextGrid::parse(&intervals, Path::new("x")),
            Err(DatasetError::ParseError { .. })
        ));
    }

    #[test]
    fn test_rejects_other_objects() {
        let source = "File type = \"ooTextFile\"\nObject class = \"Sound\"\n";
        assert!(TextGrid::parse(source, Path::new("x")).is_err());
    }

    #[test]
    fn test_decode_utf16_le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "\"ə\"".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_text(&bytes).unwrap(), "\"ə\"");
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("a.TextGrid");
        std::fs::write(&path, LONG).unwrap();

        let grid = TextGrid::from_file(&path).unwrap();
        assert_eq!(grid.tier(1).unwrap().name, "phones");
    }
}
