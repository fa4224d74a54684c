use crate::domain::payment::{FieldValue, NormalizedInput, RawSubmission};
use regex::Regex;
use std::sync::OnceLock;

pub const MIN_BASE_AMOUNT: i64 = 100_000;
pub const MAX_BASE_AMOUNT: i64 = 10_000_000;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static email pattern"))
}

/// Trims and coerces a raw submission, then checks every rule. All violated
/// rules are reported, in form order.
pub fn validate(raw: RawSubmission) -> Result<NormalizedInput, Vec<String>> {
    let name = raw.name.as_ref().and_then(text).unwrap_or_default();
    let email = raw.email.as_ref().and_then(text).unwrap_or_default();
    let student_id = raw.student_id.as_ref().and_then(text).unwrap_or_default();
    let program = raw.program.as_ref().and_then(text).unwrap_or_default();
    let semester = raw.semester.as_ref().and_then(leading_int);
    let base_amount = raw.base_amount.as_ref().and_then(leading_int);
    let unique_code = raw
        .unique_code
        .as_ref()
        .and_then(text)
        .and_then(|s| parse_unique_code(&s));

    let mut errors = Vec::new();

    if utf16_len(&name) < 3 {
        errors.push("Nama minimal 3 karakter".to_string());
    }
    if !email_pattern().is_match(&email) {
        errors.push("Email tidak valid".to_string());
    }
    if utf16_len(&student_id) < 5 {
        errors.push("NIM minimal 5 karakter".to_string());
    }
    if program.is_empty() {
        errors.push("Program studi wajib dipilih".to_string());
    }
    let semester = match semester {
        Some(s @ 1..=8) => Some(s as u8),
        _ => {
            errors.push("Semester harus 1–8".to_string());
            None
        }
    };
    let base_amount = match base_amount {
        None | Some(0) => {
            errors.push("Jumlah pembayaran tidak valid".to_string());
            None
        }
        Some(n) if n < MIN_BASE_AMOUNT => {
            errors.push("Minimal Rp 100.000".to_string());
            None
        }
        Some(n) if n > MAX_BASE_AMOUNT => {
            errors.push("Maksimal Rp 10.000.000".to_string());
            None
        }
        Some(n) => Some(n),
    };
    if unique_code.is_none() {
        errors.push("Kode unik harus 3 digit".to_string());
    }

    match (semester, base_amount, unique_code) {
        (Some(semester), Some(base_amount), Some(unique_code)) if errors.is_empty() => {
            Ok(NormalizedInput {
                name,
                email,
                student_id,
                program,
                semester,
                unique_code,
                base_amount,
            })
        }
        _ => Err(errors),
    }
}

/// Length as browsers and form clients count it, in UTF-16 code units.
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn text(value: &FieldValue) -> Option<String> {
    match value {
        FieldValue::Text(s) => Some(s.trim().to_string()),
        FieldValue::Integer(n) => Some(n.to_string()),
        FieldValue::Float(f) => Some(f.to_string()),
        FieldValue::Other(_) => None,
    }
}

/// Integer prefix of the value: `"12abc"` is 12, `"abc"` is nothing,
/// fractional numbers truncate toward zero.
fn leading_int(value: &FieldValue) -> Option<i64> {
    match value {
        FieldValue::Integer(n) => Some(*n),
        FieldValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        FieldValue::Float(_) | FieldValue::Other(_) => None,
        FieldValue::Text(s) => {
            let s = s.trim_start();
            let (negative, rest) = match s.as_bytes().first() {
                Some(b'-') => (true, &s[1..]),
                Some(b'+') => (false, &s[1..]),
                _ => (false, s),
            };
            let end = rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            let digits = &rest[..end];
            if digits.is_empty() {
                return None;
            }
            let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
            Some(if negative { -magnitude } else { magnitude })
        }
    }
}

fn parse_unique_code(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
