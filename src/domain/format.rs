use chrono::{DateTime, Datelike, Duration, Timelike, Utc};

// Asia/Jakarta has no DST.
const JAKARTA_UTC_OFFSET_HOURS: i64 = 7;

const MONTHS_ID: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Groups digits in thousands with `.`, e.g. `1234567` -> `"1.234.567"`.
pub fn group_digits(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

pub fn rupiah(n: i64) -> String {
    format!("Rp {}", group_digits(n))
}

/// Renders `base_amount` with its trailing `.000` group replaced by the
/// zero-padded unique code. Amounts whose grouped form does not end in
/// `.000` come back unchanged.
pub fn merge_unique_code(base_amount: i64, unique_code: &str) -> String {
    let grouped = group_digits(base_amount);
    let code = format!("{:0>3}", unique_code);
    match grouped.strip_suffix(".000") {
        Some(head) => format!("{head}.{code}"),
        None => grouped,
    }
}

/// Indonesian medium date with short time in Asia/Jakarta, e.g.
/// `19 Okt 2026, 14.05`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    let local = at.naive_utc() + Duration::hours(JAKARTA_UTC_OFFSET_HOURS);
    format!(
        "{} {} {}, {:02}.{:02}",
        local.day(),
        MONTHS_ID[local.month0() as usize],
        local.year(),
        local.hour(),
        local.minute()
    )
}
