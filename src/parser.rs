//! Parser of the decimal text representation.
//!
//! Grammar: `[+|-] digits [. digits] [(e|E) [+|-] digits]`, with at least one mantissa digit,
//! or one of `inf`, `infinity`, `nan` in any letter case.

use crate::defs::Error;
use crate::defs::Sign;
use core::str::Chars;

// Larger decimal exponents are out of range for any precision.
const EXP_LIMIT: i64 = 1 << 40;

/// Classification of the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParsedKind {
    Finite,
    Inf,
    NaN,
}

/// Result of parsing: `digits * 10^e` with the sign `sign`.
#[derive(Debug)]
pub(crate) struct ParserState<'a> {
    chars: Chars<'a>,
    cur_ch: Option<char>,
    s_len: usize,
    sign: Sign,
    digits: Vec<u8>,
    e: i64,
    kind: ParsedKind,
}

impl<'a> ParserState<'a> {
    fn new(s: &'a str) -> Self {
        ParserState {
            chars: s.chars(),
            cur_ch: None,
            s_len: s.len(),
            sign: Sign::Pos,
            digits: Vec::new(),
            e: 0,
            kind: ParsedKind::Finite,
        }
    }

    // Next character in lower case, or None at the end of the string.
    fn next_char(&mut self) -> Option<char> {
        self.cur_ch = self.chars.next().map(|c| c.to_ascii_lowercase());
        self.cur_ch
    }

    fn cur_char(&self) -> Option<char> {
        self.cur_ch
    }

    pub fn kind(&self) -> ParsedKind {
        self.kind
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Significant decimal digits without leading and trailing zeroes, the decimal exponent of the last digit.
    /// Empty digits stand for zero.
    pub fn raw_parts(&self) -> (&[u8], i64) {
        (&self.digits, self.e)
    }
}

/// Parses a decimal number.
///
/// ## Errors
///
///  - Parse: the text does not match the grammar.
///  - MemoryAllocation: failed to allocate memory.
pub(crate) fn parse(s: &str) -> Result<ParserState, Error> {
    let mut ps = ParserState::new(s);
    let mut ch = ps.next_char();

    match ch {
        Some('+') => ch = ps.next_char(),
        Some('-') => {
            ps.sign = Sign::Neg;
            ch = ps.next_char();
        }
        _ => {}
    }

    match ch {
        Some('i') | Some('n') => parse_word(&mut ps)?,
        Some('.') | Some('0'..='9') => parse_num(&mut ps)?,
        _ => return Err(Error::Parse),
    }

    Ok(ps)
}

fn parse_word(ps: &mut ParserState) -> Result<(), Error> {
    let mut w = String::new();
    w.try_reserve_exact(ps.s_len)?;

    let mut ch = ps.cur_char();
    while let Some(c) = ch {
        w.push(c);
        ch = ps.next_char();
    }

    ps.kind = match w.as_str() {
        "inf" | "infinity" => ParsedKind::Inf,
        "nan" => ParsedKind::NaN,
        _ => return Err(Error::Parse),
    };

    Ok(())
}

fn parse_num(ps: &mut ParserState) -> Result<(), Error> {
    ps.digits.try_reserve_exact(ps.s_len)?;

    let int_len = parse_digits(ps);
    let mut frac_len = 0;

    if Some('.') == ps.cur_char() {
        ps.next_char();
        frac_len = parse_digits(ps);
    }

    if int_len + frac_len == 0 {
        return Err(Error::Parse);
    }

    let mut e = 0;
    if Some('e') == ps.cur_char() {
        ps.next_char();
        e = parse_exp(ps)?;
    }

    if ps.cur_char().is_some() {
        return Err(Error::Parse);
    }

    // leading zeroes do not affect the value
    let lz = ps.digits.iter().take_while(|d| **d == 0).count();
    ps.digits.drain(..lz);

    let tz = ps.digits.iter().rev().take_while(|d| **d == 0).count();
    ps.digits.truncate(ps.digits.len() - tz);

    ps.e = if ps.digits.is_empty() { 0 } else { e - frac_len as i64 + tz as i64 };

    Ok(())
}

// Consumes decimal digits, returns their count.
fn parse_digits(ps: &mut ParserState) -> usize {
    let mut len = 0;
    let mut ch = ps.cur_char();

    while let Some(c) = ch {
        match c.to_digit(10) {
            Some(d) => {
                ps.digits.push(d as u8);
                len += 1;
            }
            None => break,
        }
        ch = ps.next_char();
    }

    len
}

fn parse_exp(ps: &mut ParserState) -> Result<i64, Error> {
    let mut neg = false;

    match ps.cur_char() {
        Some('+') => {
            ps.next_char();
        }
        Some('-') => {
            neg = true;
            ps.next_char();
        }
        _ => {}
    }

    let mut e: i64 = 0;
    let mut len = 0;
    let mut ch = ps.cur_char();

    while let Some(c) = ch {
        match c.to_digit(10) {
            Some(d) => {
                e = (e * 10 + d as i64).min(EXP_LIMIT);
                len += 1;
            }
            None => break,
        }
        ch = ps.next_char();
    }

    if len == 0 {
        return Err(Error::Parse);
    }

    Ok(if neg { -e } else { e })
}
