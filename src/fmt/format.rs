//! Format specifications are parsed once into segments so the emit path only
//! substitutes values.
//!
//! Placeholders look like `%{verb}` or `%{verb:arg}`. For `time` the argument is a
//! chrono strftime layout, for `color` it is `bold` or `reset`, and for every other
//! verb it is a printf-style spec such as `-8s`, `.4s` or `03x`. `%%` is a literal
//! percent sign.

use super::Color;
use crate::error::Error;
use crate::output::Record;
use chrono::format::{Item, StrftimeItems};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::OnceLock;

/// Installed by bootstrap and reset, and substituted for an empty specification.
pub const DEFAULT_FORMAT: &str = "%{color}%{time:%Y-%m-%d %H:%M:%S%.3f %Z} [%{module}] %{shortfunc} -> %{level:.4s} %{id:03x}%{color:reset} %{message}";

const DEFAULT_TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// Rendered for `shortfunc`/`longfunc` when the call site did not record a function.
const UNKNOWN: &str = "???";

/// Closed set of placeholder names; anything else is a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Time,
    Module,
    ShortFunc,
    LongFunc,
    ShortFile,
    LongFile,
    Level,
    Id,
    Pid,
    Program,
    Message,
    Color,
}

impl Verb {
    /// Name as written between the braces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Module => "module",
            Self::ShortFunc => "shortfunc",
            Self::LongFunc => "longfunc",
            Self::ShortFile => "shortfile",
            Self::LongFile => "longfile",
            Self::Level => "level",
            Self::Id => "id",
            Self::Pid => "pid",
            Self::Program => "program",
            Self::Message => "message",
            Self::Color => "color",
        }
    }

    pub const ALL: &'static [Self] = &[
        Self::Time,
        Self::Module,
        Self::ShortFunc,
        Self::LongFunc,
        Self::ShortFile,
        Self::LongFile,
        Self::Level,
        Self::Id,
        Self::Pid,
        Self::Program,
        Self::Message,
        Self::Color,
    ];

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|verb| verb.as_str() == name)
    }

    const fn is_numeric(self) -> bool {
        matches!(self, Self::Id | Self::Pid)
    }
}

/// How a value is turned into text before padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Conversion {
    #[default]
    Str,
    Decimal,
    LowerHex,
    UpperHex,
}

/// Width, precision and alignment for one placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Spec {
    pub left_align: bool,
    pub zero_pad: bool,
    pub width: Option<usize>,
    /// Maximum number of characters kept from a string value.
    pub precision: Option<usize>,
    pub conversion: Conversion,
}

/// Upper bound for widths and precisions; larger values are rejected at parse time.
pub const MAX_WIDTH: usize = 1_000_000;

impl Spec {
    fn parse(verb: Verb, arg: &str) -> Result<Self, Error> {
        let bad = || {
            Error::InvalidFormat(format!(
                "bad argument '{arg}' for %{{{}}}",
                verb.as_str()
            ))
        };

        let mut spec = Self::default();
        let mut rest = arg;

        if let Some(r) = rest.strip_prefix('-') {
            spec.left_align = true;
            rest = r;
        }
        if let Some(r) = rest.strip_prefix('0') {
            spec.zero_pad = true;
            rest = r;
        }

        let digits = leading_digits(rest);
        if digits > 0 {
            spec.width = Some(bounded(&rest[..digits]).ok_or_else(bad)?);
            rest = &rest[digits..];
        }

        if let Some(r) = rest.strip_prefix('.') {
            let digits = leading_digits(r);
            if digits == 0 {
                return Err(bad());
            }
            spec.precision = Some(bounded(&r[..digits]).ok_or_else(bad)?);
            rest = &r[digits..];
        }

        spec.conversion = match rest {
            "s" => Conversion::Str,
            "d" if verb.is_numeric() => Conversion::Decimal,
            "x" if verb.is_numeric() => Conversion::LowerHex,
            "X" if verb.is_numeric() => Conversion::UpperHex,
            _ => return Err(bad()),
        };

        Ok(spec)
    }

    fn pad(&self, value: &str, out: &mut String) {
        let truncated;
        let value = match self.precision {
            Some(max) if self.conversion == Conversion::Str => {
                truncated = value.chars().take(max).collect::<String>();
                truncated.as_str()
            }
            _ => value,
        };

        let fill = self
            .width
            .map_or(0, |width| width.saturating_sub(value.chars().count()));

        if self.left_align {
            out.push_str(value);
            out.extend(std::iter::repeat_n(' ', fill));
        } else {
            let pad = if self.zero_pad && self.conversion != Conversion::Str {
                '0'
            } else {
                ' '
            };
            out.extend(std::iter::repeat_n(pad, fill));
            out.push_str(value);
        }
    }

    fn number(&self, n: u64, out: &mut String) {
        let digits = match self.conversion {
            Conversion::LowerHex => format!("{n:x}"),
            Conversion::UpperHex => format!("{n:X}"),
            Conversion::Decimal | Conversion::Str => n.to_string(),
        };
        self.pad(&digits, out);
    }
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn bounded(digits: &str) -> Option<usize> {
    digits.parse().ok().filter(|n| *n <= MAX_WIDTH)
}

/// What a `%{color}` placeholder switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorStyle {
    /// The record's level color.
    Level,
    Bold,
    Reset,
}

/// One piece of a parsed specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// strftime layout, validated at parse time.
    Time(String),
    Color(ColorStyle),
    Field { verb: Verb, spec: Spec },
}

/// A compiled format specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    source: String,
    segments: Vec<Segment>,
}

impl Default for Formatter {
    /// Same segments as parsing [`DEFAULT_FORMAT`], built without a fallible parse.
    fn default() -> Self {
        let literal = |s: &str| Segment::Literal(s.to_string());
        let field = |verb| Segment::Field {
            verb,
            spec: Spec::default(),
        };

        Self {
            source: DEFAULT_FORMAT.to_string(),
            segments: vec![
                Segment::Color(ColorStyle::Level),
                Segment::Time("%Y-%m-%d %H:%M:%S%.3f %Z".to_string()),
                literal(" ["),
                field(Verb::Module),
                literal("] "),
                field(Verb::ShortFunc),
                literal(" -> "),
                Segment::Field {
                    verb: Verb::Level,
                    spec: Spec {
                        precision: Some(4),
                        ..Spec::default()
                    },
                },
                literal(" "),
                Segment::Field {
                    verb: Verb::Id,
                    spec: Spec {
                        zero_pad: true,
                        width: Some(3),
                        conversion: Conversion::LowerHex,
                        ..Spec::default()
                    },
                },
                Segment::Color(ColorStyle::Reset),
                literal(" "),
                field(Verb::Message),
            ],
        }
    }
}

impl Formatter {
    /// Compiles a format specification. An empty specification means [`DEFAULT_FORMAT`].
    ///
    /// # Errors
    /// [`Error::InvalidFormat`] for unknown verbs, unterminated placeholders,
    /// malformed arguments and invalid time layouts.
    pub fn parse(spec: &str) -> Result<Self, Error> {
        if spec.is_empty() {
            return Ok(Self::default());
        }

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = spec;

        while let Some(pos) = rest.find('%') {
            literal.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            if let Some(r) = after.strip_prefix('%') {
                literal.push('%');
                rest = r;
                continue;
            }
            let Some(body) = after.strip_prefix('{') else {
                literal.push('%');
                rest = after;
                continue;
            };

            let end = body.find('}').ok_or_else(|| {
                Error::InvalidFormat(format!("unterminated placeholder in '{spec}'"))
            })?;
            let (name, arg) = match body[..end].split_once(':') {
                Some((name, arg)) => (name, Some(arg)),
                None => (&body[..end], None),
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Self::placeholder(name, arg)?);
            rest = &body[end + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: spec.to_string(),
            segments,
        })
    }

    fn placeholder(name: &str, arg: Option<&str>) -> Result<Segment, Error> {
        let verb = Verb::from_name(name)
            .ok_or_else(|| Error::InvalidFormat(format!("unknown placeholder '%{{{name}}}'")))?;

        match verb {
            Verb::Time => {
                let layout = arg.filter(|a| !a.is_empty()).unwrap_or(DEFAULT_TIME_LAYOUT);
                if StrftimeItems::new(layout).any(|item| matches!(item, Item::Error)) {
                    return Err(Error::InvalidFormat(format!(
                        "invalid time layout '{layout}'"
                    )));
                }
                Ok(Segment::Time(layout.to_string()))
            }
            Verb::Color => match arg.unwrap_or("") {
                "" => Ok(Segment::Color(ColorStyle::Level)),
                "bold" => Ok(Segment::Color(ColorStyle::Bold)),
                "reset" => Ok(Segment::Color(ColorStyle::Reset)),
                other => Err(Error::InvalidFormat(format!(
                    "unknown color argument '{other}'"
                ))),
            },
            _ => {
                let spec = match arg {
                    Some(arg) => Spec::parse(verb, arg)?,
                    None => Spec::default(),
                };
                Ok(Segment::Field { verb, spec })
            }
        }
    }

    /// The specification this formatter was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Renders one record. Color placeholders produce nothing unless `colors` is set.
    #[must_use]
    pub fn render(&self, record: &Record<'_>, colors: bool) -> String {
        let mut out = String::with_capacity(128);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Time(layout) => {
                    let _ = write!(out, "{}", record.time.format(layout));
                }
                Segment::Color(style) => {
                    if colors {
                        match style {
                            ColorStyle::Level => out.push_str(&record.level.color().fg_ansi()),
                            ColorStyle::Bold => out.push_str(Color::BOLD),
                            ColorStyle::Reset => out.push_str(Color::RESET),
                        }
                    }
                }
                Segment::Field { verb, spec } => render_field(*verb, spec, record, &mut out),
            }
        }

        out
    }
}

fn render_field(verb: Verb, spec: &Spec, record: &Record<'_>, out: &mut String) {
    let file = record.location.file();
    let line = record.location.line();

    match verb {
        Verb::Module => spec.pad(record.module, out),
        Verb::Message => spec.pad(record.message, out),
        Verb::Level => spec.pad(record.level.as_str(), out),
        Verb::ShortFunc => {
            let name = record.function.map_or(UNKNOWN, |f| {
                f.rsplit("::").next().unwrap_or(f)
            });
            spec.pad(name, out);
        }
        Verb::LongFunc => spec.pad(record.function.unwrap_or(UNKNOWN), out),
        Verb::ShortFile => {
            let base = Path::new(file)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(file);
            spec.pad(&format!("{base}:{line}"), out);
        }
        Verb::LongFile => spec.pad(&format!("{file}:{line}"), out),
        Verb::Id => spec.number(record.id, out),
        Verb::Pid => spec.number(u64::from(std::process::id()), out),
        Verb::Program => spec.pad(program_name(), out),
        Verb::Time | Verb::Color => {}
    }
}

fn program_name() -> &'static str {
    static PROGRAM: OnceLock<String> = OnceLock::new();
    PROGRAM.get_or_init(|| {
        std::env::args_os()
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| UNKNOWN.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_parsed_default_format() {
        let parsed = Formatter::parse(DEFAULT_FORMAT).unwrap();
        assert_eq!(parsed, Formatter::default());
    }

    #[test]
    fn empty_spec_is_default() {
        assert_eq!(Formatter::parse("").unwrap(), Formatter::default());
    }

    #[test]
    fn spec_parses_flags_width_and_precision() {
        let spec = Spec::parse(Verb::Level, "-8.3s").unwrap();
        assert!(spec.left_align);
        assert_eq!(spec.width, Some(8));
        assert_eq!(spec.precision, Some(3));
    }

    #[test]
    fn hex_conversion_only_for_numbers() {
        assert!(Spec::parse(Verb::Id, "x").is_ok());
        assert!(Spec::parse(Verb::Module, "x").is_err());
    }

    #[test]
    fn oversized_width_and_precision_rejected() {
        assert!(Spec::parse(Verb::Message, "1099511627776s").is_err());
        assert!(Spec::parse(Verb::Message, ".1000001s").is_err());
        assert!(Spec::parse(Verb::Message, "99999999999999999999999s").is_err());
        assert!(matches!(
            Formatter::parse("%{message:1099511627776s}"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn width_at_limit_accepted() {
        let spec = Spec::parse(Verb::Message, "1000000s").unwrap();
        assert_eq!(spec.width, Some(MAX_WIDTH));
    }

    #[test]
    fn precision_needs_digits() {
        assert!(Spec::parse(Verb::Level, ".s").is_err());
    }

    #[test]
    fn zero_pad_ignored_for_strings() {
        let spec = Spec::parse(Verb::Module, "05s").unwrap();
        let mut out = String::new();
        spec.pad("ab", &mut out);
        assert_eq!(out, "   ab");
    }
}
