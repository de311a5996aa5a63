//! crates/scopelog/src/template.rs
//! printf-style runtime templates.
//!
//! The logging macros rely on [`format_args!`], which rejects mismatched
//! arguments at compile time. Templates that are only known at runtime (read
//! from configuration, or forwarded from another component) go through
//! [`render`] instead, which substitutes [`Arg`] values positionally and
//! reports every mismatch as a [`TemplateError`].
//!
//! Supported conversions are `%s %c %d %i %u %x %X %o %f %F %e %E` and the
//! literal `%%`, with the `-`, `0`, `+`, space and `#` flags, a field width, a
//! precision, and C length modifiers (`h`, `l`, `ll`, `z`, ...) which are
//! accepted and ignored.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use thiserror::Error;

/// One positional argument for a runtime template.
#[derive(Clone, Copy)]
pub enum Arg<'a> {
    /// Text, accepted by `%s`.
    Str(&'a str),
    /// Signed integer, accepted by the integer conversions.
    Int(i64),
    /// Unsigned integer, accepted by the integer conversions.
    UInt(u64),
    /// Floating point value, accepted by `%f` and `%e`.
    Float(f64),
    /// Single character, accepted by `%c` and `%s`.
    Char(char),
    /// Any displayable value, accepted by `%s`.
    Display(&'a dyn fmt::Display),
}

impl Arg<'_> {
    /// Returns a short description of the argument's type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "a string",
            Self::Int(_) => "a signed integer",
            Self::UInt(_) => "an unsigned integer",
            Self::Float(_) => "a float",
            Self::Char(_) => "a character",
            Self::Display(_) => "a display value",
        }
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.debug_tuple("Str").field(value).finish(),
            Self::Int(value) => f.debug_tuple("Int").field(value).finish(),
            Self::UInt(value) => f.debug_tuple("UInt").field(value).finish(),
            Self::Float(value) => f.debug_tuple("Float").field(value).finish(),
            Self::Char(value) => f.debug_tuple("Char").field(value).finish(),
            Self::Display(value) => f.debug_tuple("Display").field(&value.to_string()).finish(),
        }
    }
}

macro_rules! impl_arg_from {
    ($variant:ident, $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Arg<'_> {
                fn from(value: $source) -> Self {
                    Self::$variant(<$target>::from(value))
                }
            }
        )+
    };
}

impl_arg_from!(Int, i64: i8, i16, i32, i64);
impl_arg_from!(UInt, u64: u8, u16, u32, u64);
impl_arg_from!(Float, f64: f32, f64);

impl From<isize> for Arg<'_> {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Arg<'_> {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

impl From<char> for Arg<'_> {
    fn from(value: char) -> Self {
        Self::Char(value)
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Self::Str(if value { "true" } else { "false" })
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Self::Str(value)
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(value: &'a String) -> Self {
        Self::Str(value.as_str())
    }
}

/// Reasons a runtime template cannot be rendered.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TemplateError {
    /// A conversion had no argument left to consume.
    #[error("conversion at byte {offset} needs argument {index}, which was not supplied")]
    MissingArgument {
        /// Zero-based index of the missing argument.
        index: usize,
        /// Byte offset of the conversion's `%`.
        offset: usize,
    },
    /// More arguments were supplied than the template consumes.
    #[error("template consumes {expected} argument(s) but {supplied} were supplied")]
    UnusedArguments {
        /// Number of arguments the template consumed.
        expected: usize,
        /// Number of arguments passed.
        supplied: usize,
    },
    /// An argument's type does not fit its conversion.
    #[error("argument {index} is {found} but `%{conversion}` expects {expected}")]
    TypeMismatch {
        /// Zero-based index of the offending argument.
        index: usize,
        /// Conversion character.
        conversion: char,
        /// Description of the accepted types.
        expected: &'static str,
        /// Description of the supplied type.
        found: &'static str,
    },
    /// The conversion character is not supported.
    #[error("unsupported conversion `%{found}` at byte {offset}")]
    UnsupportedConversion {
        /// Byte offset of the conversion's `%`.
        offset: usize,
        /// Offending conversion character.
        found: char,
    },
    /// The template ends in the middle of a conversion.
    #[error("template ends inside the conversion starting at byte {offset}")]
    IncompleteSpecifier {
        /// Byte offset of the conversion's `%`.
        offset: usize,
    },
}

/// Substitutes `args` into `template`.
///
/// # Examples
///
/// ```
/// use scopelog::{Arg, TemplateError, render_template};
///
/// let text = render_template("value=%d (%s)", &[Arg::from(42), Arg::from("ok")])?;
/// assert_eq!(text, "value=42 (ok)");
///
/// let error = render_template("%s and %s", &[Arg::from("one")]).unwrap_err();
/// assert!(matches!(error, TemplateError::MissingArgument { index: 1, .. }));
/// # Ok::<(), TemplateError>(())
/// ```
pub fn render(template: &str, args: &[Arg<'_>]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.char_indices().peekable();
    let mut consumed = 0;

    while let Some((offset, ch)) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }

        let spec = Spec::parse(&mut chars, offset)?;
        if spec.conversion == '%' {
            out.push('%');
            continue;
        }

        let arg = args.get(consumed).ok_or(TemplateError::MissingArgument {
            index: consumed,
            offset,
        })?;
        spec.write(&mut out, arg, consumed)?;
        consumed += 1;
    }

    if consumed == args.len() {
        Ok(out)
    } else {
        Err(TemplateError::UnusedArguments {
            expected: consumed,
            supplied: args.len(),
        })
    }
}

#[derive(Debug, Default)]
struct Spec {
    offset: usize,
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    space_sign: bool,
    alternate: bool,
    width: Option<usize>,
    precision: Option<usize>,
    conversion: char,
}

const INTEGER: &str = "an integer";
const TEXT: &str = "a string, character or display value";

impl Spec {
    fn parse(chars: &mut Peekable<CharIndices<'_>>, offset: usize) -> Result<Self, TemplateError> {
        let mut spec = Self {
            offset,
            ..Self::default()
        };

        while let Some((_, flag)) = chars.next_if(|&(_, c)| matches!(c, '-' | '0' | '+' | ' ' | '#')) {
            match flag {
                '-' => spec.left_align = true,
                '0' => spec.zero_pad = true,
                '+' => spec.plus_sign = true,
                ' ' => spec.space_sign = true,
                _ => spec.alternate = true,
            }
        }

        spec.width = take_number(chars);
        if chars.next_if(|&(_, c)| c == '.').is_some() {
            spec.precision = Some(take_number(chars).unwrap_or(0));
        }
        while chars
            .next_if(|&(_, c)| matches!(c, 'h' | 'l' | 'j' | 'z' | 't' | 'L' | 'q'))
            .is_some()
        {}

        let (_, conversion) = chars
            .next()
            .ok_or(TemplateError::IncompleteSpecifier { offset })?;
        spec.conversion = conversion;
        Ok(spec)
    }

    fn mismatch(&self, index: usize, expected: &'static str, arg: &Arg<'_>) -> TemplateError {
        TemplateError::TypeMismatch {
            index,
            conversion: self.conversion,
            expected,
            found: arg.kind(),
        }
    }

    fn write(&self, out: &mut String, arg: &Arg<'_>, index: usize) -> Result<(), TemplateError> {
        match self.conversion {
            's' => {
                let text = match arg {
                    Arg::Str(value) => (*value).to_owned(),
                    Arg::Char(value) => value.to_string(),
                    Arg::Display(value) => value.to_string(),
                    _ => return Err(self.mismatch(index, TEXT, arg)),
                };
                let text = match self.precision {
                    Some(limit) => text.chars().take(limit).collect(),
                    None => text,
                };
                self.pad(out, "", "", &text, false);
            }
            'c' => match arg {
                Arg::Char(value) => self.pad(out, "", "", &value.to_string(), false),
                _ => return Err(self.mismatch(index, "a character", arg)),
            },
            'd' | 'i' => {
                let (negative, magnitude) = match *arg {
                    Arg::Int(value) => (value < 0, value.unsigned_abs()),
                    Arg::UInt(value) => (false, value),
                    _ => return Err(self.mismatch(index, INTEGER, arg)),
                };
                let digits = self.integer_digits(magnitude.to_string());
                self.pad(out, self.sign(negative), "", &digits, true);
            }
            'u' | 'x' | 'X' | 'o' => {
                let value = match *arg {
                    Arg::Int(value) => value as u64,
                    Arg::UInt(value) => value,
                    _ => return Err(self.mismatch(index, INTEGER, arg)),
                };
                let (digits, prefix) = match self.conversion {
                    'x' => (format!("{value:x}"), "0x"),
                    'X' => (format!("{value:X}"), "0X"),
                    'o' => (format!("{value:o}"), "0"),
                    _ => (value.to_string(), ""),
                };
                let prefix = if self.alternate && value != 0 { prefix } else { "" };
                self.pad(out, "", prefix, &self.integer_digits(digits), true);
            }
            'f' | 'F' | 'e' | 'E' => {
                let Arg::Float(value) = *arg else {
                    return Err(self.mismatch(index, "a float", arg));
                };
                let upper = self.conversion.is_ascii_uppercase();
                let precision = self.precision.unwrap_or(6);
                let magnitude = value.abs();
                let body = if value.is_nan() {
                    "nan".to_owned()
                } else if value.is_infinite() {
                    "inf".to_owned()
                } else if matches!(self.conversion, 'e' | 'E') {
                    c_exponent(magnitude, precision)
                } else {
                    format!("{magnitude:.precision$}")
                };
                let body = if upper { body.to_ascii_uppercase() } else { body };
                let negative = value.is_sign_negative() && !value.is_nan();
                self.pad(out, self.sign(negative), "", &body, value.is_finite());
            }
            found => {
                return Err(TemplateError::UnsupportedConversion {
                    offset: self.offset,
                    found,
                });
            }
        }
        Ok(())
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        }
    }

    fn integer_digits(&self, digits: String) -> String {
        match self.precision {
            Some(precision) if digits.len() < precision => {
                format!("{digits:0>precision$}")
            }
            _ => digits,
        }
    }

    fn pad(&self, out: &mut String, sign: &str, prefix: &str, body: &str, numeric: bool) {
        let len = sign.len() + prefix.len() + body.chars().count();
        let fill = self.width.unwrap_or(0).saturating_sub(len);
        // Integer precision disables the `0` flag, as in C.
        let zero_fill = numeric
            && self.zero_pad
            && !self.left_align
            && (self.precision.is_none() || matches!(self.conversion, 'f' | 'F' | 'e' | 'E'));

        if self.left_align {
            out.push_str(sign);
            out.push_str(prefix);
            out.push_str(body);
            out.extend(std::iter::repeat_n(' ', fill));
        } else if zero_fill {
            out.push_str(sign);
            out.push_str(prefix);
            out.extend(std::iter::repeat_n('0', fill));
            out.push_str(body);
        } else {
            out.extend(std::iter::repeat_n(' ', fill));
            out.push_str(sign);
            out.push_str(prefix);
            out.push_str(body);
        }
    }
}

fn take_number(chars: &mut Peekable<CharIndices<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some((_, digit)) = chars.next_if(|&(_, c)| c.is_ascii_digit()) {
        let digit = digit.to_digit(10).map_or(0, |d| d as usize);
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit));
    }
    value
}

/// Formats a non-negative finite value as C's `%e`: one leading digit, a
/// signed exponent with at least two digits.
fn c_exponent(magnitude: f64, precision: usize) -> String {
    let rendered = format!("{magnitude:.precision$e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs())
        }
        None => rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(template: &str, args: &[Arg<'_>]) -> String {
        render(template, args).expect("template renders")
    }

    #[test]
    fn substitutes_in_order() {
        assert_eq!(ok("value=%d", &[Arg::from(42)]), "value=42");
        assert_eq!(
            ok("%s moved to %s", &[Arg::from("a"), Arg::from("b")]),
            "a moved to b"
        );
    }

    #[test]
    fn literal_percent_consumes_nothing() {
        assert_eq!(ok("100%% done", &[]), "100% done");
    }

    #[test]
    fn missing_argument_is_reported_with_position() {
        let error = render("%s and %s", &[Arg::from("one")]).expect_err("missing");
        assert_eq!(error, TemplateError::MissingArgument { index: 1, offset: 7 });
    }

    #[test]
    fn surplus_arguments_are_reported() {
        let error = render("%d", &[Arg::from(1), Arg::from(2)]).expect_err("surplus");
        assert_eq!(
            error,
            TemplateError::UnusedArguments {
                expected: 1,
                supplied: 2
            }
        );
    }

    #[test]
    fn type_mismatch_is_reported() {
        let error = render("%d", &[Arg::from("x")]).expect_err("mismatch");
        assert_eq!(
            error,
            TemplateError::TypeMismatch {
                index: 0,
                conversion: 'd',
                expected: INTEGER,
                found: "a string",
            }
        );
    }

    #[test]
    fn unsupported_conversion_is_reported() {
        let error = render("bad %y", &[Arg::from(1)]).expect_err("unsupported");
        assert_eq!(
            error,
            TemplateError::UnsupportedConversion {
                offset: 4,
                found: 'y'
            }
        );
    }

    #[test]
    fn dangling_percent_is_reported() {
        assert_eq!(
            render("50%", &[]),
            Err(TemplateError::IncompleteSpecifier { offset: 2 })
        );
        assert_eq!(
            render("%5", &[Arg::from(1)]),
            Err(TemplateError::IncompleteSpecifier { offset: 0 })
        );
    }

    #[test]
    fn width_and_alignment() {
        let args = [Arg::from(42), Arg::from(42), Arg::from(42)];
        assert_eq!(ok("%5d|%-5d|%05d", &args), "   42|42   |00042");
        assert_eq!(ok("%-8s|", &[Arg::from("ab")]), "ab      |");
    }

    #[test]
    fn signs_and_zero_padding() {
        assert_eq!(ok("%+d", &[Arg::from(5)]), "+5");
        assert_eq!(ok("%05d", &[Arg::from(-42)]), "-0042");
        assert_eq!(ok("% d", &[Arg::from(7)]), " 7");
    }

    #[test]
    fn integer_precision_pads_digits() {
        assert_eq!(ok("%.3d", &[Arg::from(7)]), "007");
        assert_eq!(ok("%6.3d", &[Arg::from(7)]), "   007");
    }

    #[test]
    fn radix_conversions() {
        let args = [Arg::from(255); 4];
        assert_eq!(ok("%x %X %#x %o", &args), "ff FF 0xff 377");
        assert_eq!(ok("%#x", &[Arg::from(0)]), "0");
    }

    #[test]
    fn unsigned_and_length_modifiers() {
        assert_eq!(ok("%u", &[Arg::from(u64::MAX)]), u64::MAX.to_string());
        assert_eq!(ok("%ld %llu %zu", &[Arg::from(5), Arg::from(6u8), Arg::from(7usize)]), "5 6 7");
    }

    #[test]
    fn float_conversions() {
        assert_eq!(ok("%.2f", &[Arg::from(1.23456)]), "1.23");
        assert_eq!(ok("%f", &[Arg::from(1.5)]), "1.500000");
        assert_eq!(ok("%e", &[Arg::from(1234.5)]), "1.234500e+03");
        assert_eq!(ok("%.1E", &[Arg::from(0.00012)]), "1.2E-04");
        assert_eq!(ok("%08.2f", &[Arg::from(-3.5)]), "-0003.50");
    }

    #[test]
    fn float_rejects_integers() {
        let error = render("%f", &[Arg::from(3)]).expect_err("mismatch");
        assert!(matches!(error, TemplateError::TypeMismatch { conversion: 'f', .. }));
    }

    #[test]
    fn string_precision_truncates() {
        assert_eq!(ok("%.3s", &[Arg::from("abcdef")]), "abc");
    }

    #[test]
    fn characters_and_display_values() {
        let addr = std::net::Ipv4Addr::LOCALHOST;
        assert_eq!(ok("%c", &[Arg::from('z')]), "z");
        assert_eq!(ok("%s", &[Arg::Display(&addr)]), "127.0.0.1");
        assert_eq!(ok("%s", &[Arg::from(true)]), "true");
        let owned = String::from("owned");
        assert_eq!(ok("%s", &[Arg::from(&owned)]), "owned");
    }

    #[test]
    fn non_ascii_text_passes_through() {
        assert_eq!(ok("Δ≈%.2f ✓", &[Arg::from(1.23456)]), "Δ≈1.23 ✓");
    }

    #[test]
    fn debug_renders_display_values() {
        let rendered = format!("{:?}", Arg::Display(&7));
        assert_eq!(rendered, "Display(\"7\")");
    }
}
