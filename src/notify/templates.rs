use crate::domain::format::{group_digits, merge_unique_code, rupiah};
use crate::domain::payment::PaymentRecord;
use chrono::Datelike;

pub const INSTITUTION: &str = "Universitas Annuqayah";

pub const BANK_ACCOUNTS: [(&str, &str); 4] = [
    ("BSI", "7304398878"),
    ("BTN", "14901500142223"),
    ("BRI", "009501004410307"),
    ("BNI", "5516000000"),
];

/// Every value the confirmation renders, formatted once. Both message bodies
/// and the mock log line read from this.
#[derive(Debug, Clone)]
pub struct ConfirmationView {
    pub payment_id: String,
    pub name: String,
    pub email: String,
    pub student_id: String,
    pub program: String,
    pub semester_label: String,
    pub base_formatted: String,
    pub unique_code: String,
    /// Amount to transfer, with the unique code in the last group.
    pub transfer_amount: String,
    pub total_formatted: String,
    pub timestamp: String,
    pub year: i32,
}

impl ConfirmationView {
    pub fn from_record(record: &PaymentRecord) -> Self {
        Self {
            payment_id: record.id.to_string(),
            name: record.name.clone(),
            email: record.email.clone(),
            student_id: record.student_id.clone(),
            program: record.program.clone(),
            semester_label: format!("Semester {}", record.semester),
            base_formatted: rupiah(record.base_amount),
            unique_code: record.unique_code.clone(),
            transfer_amount: transfer_amount(record),
            total_formatted: rupiah(record.total_amount),
            timestamp: record.timestamp.clone(),
            year: chrono::Utc::now().year(),
        }
    }

    pub fn subject(&self) -> String {
        format!("Konfirmasi Pembayaran - {}", self.student_id)
    }
}

/// The merged form only holds when the base ends in `.000`; any other base
/// falls back to the grouped total.
fn transfer_amount(record: &PaymentRecord) -> String {
    let merged = merge_unique_code(record.base_amount, &record.unique_code);
    if merged == group_digits(record.base_amount) {
        group_digits(record.total_amount)
    } else {
        merged
    }
}

pub fn render_text(view: &ConfirmationView) -> String {
    let accounts: Vec<String> = BANK_ACCOUNTS
        .iter()
        .map(|(bank, number)| format!("   - {bank} : {number}"))
        .collect();

    format!(
        "KONFIRMASI PEMBAYARAN BERHASIL

Halo {name},

Pembayaran Anda telah berhasil direkam. Berikut detail pembayaran:

INFORMASI MAHASISWA:
- Nama: {name}
- Email: {email}
- NIM: {nim}
- Program Studi: {prodi}
- Semester: {semester}

DETAIL PEMBAYARAN:
- ID Pembayaran: {id}
- Jumlah Pembayaran: {base}
- Kode Unik: {code}
- Total: {total}
- Waktu: {timestamp}

INSTRUKSI TRANSFER:
1. Transfer tepat sejumlah Rp {transfer}
2. Ke rekening:
{accounts}
3. Atas nama: {institution}
4. Gunakan ID Pembayaran sebagai referensi
5. Simpan bukti transfer untuk verifikasi

Email ini dikirim secara otomatis. Mohon tidak membalas.

Salam,
Sistem Pembayaran Online
{institution}
",
        name = view.name,
        email = view.email,
        nim = view.student_id,
        prodi = view.program,
        semester = view.semester_label,
        id = view.payment_id,
        base = view.base_formatted,
        code = view.unique_code,
        total = view.total_formatted,
        timestamp = view.timestamp,
        transfer = view.transfer_amount,
        accounts = accounts.join("\n"),
        institution = INSTITUTION,
    )
}

pub fn render_html(view: &ConfirmationView) -> String {
    let accounts: String = BANK_ACCOUNTS
        .iter()
        .map(|(bank, number)| format!("<li>{bank} : {number}</li>"))
        .collect();

    format!(
        r##"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Konfirmasi Pembayaran</title>
    <style>
        body {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; line-height: 1.6; color: #333; margin: 0; padding: 0; background-color: #f4f4f4; }}
        .container {{ max-width: 600px; margin: 0 auto; background-color: #ffffff; border-radius: 10px; overflow: hidden; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }}
        .header {{ background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 30px; text-align: center; }}
        .header h1 {{ margin: 0; font-size: 28px; }}
        .content {{ padding: 30px; }}
        .section {{ margin-bottom: 25px; }}
        .section-title {{ color: #4a5568; font-size: 18px; font-weight: 600; margin-bottom: 15px; padding-bottom: 8px; border-bottom: 2px solid #e2e8f0; }}
        .info-grid {{ display: grid; grid-template-columns: 1fr 2fr; gap: 12px; }}
        .info-label {{ color: #718096; font-weight: 500; }}
        .info-value {{ color: #2d3748; font-weight: 600; }}
        .payment-card {{ background: linear-gradient(135deg, #f6d365 0%, #fda085 100%); border-radius: 8px; padding: 20px; color: white; margin: 20px 0; }}
        .amount {{ font-size: 32px; font-weight: bold; text-align: center; margin: 10px 0; }}
        .instructions {{ background-color: #edf2f7; border-radius: 8px; padding: 20px; margin-top: 25px; }}
        .footer {{ background-color: #f7fafc; padding: 20px; text-align: center; color: #718096; font-size: 14px; border-top: 1px solid #e2e8f0; }}
        .success-icon {{ font-size: 48px; color: #48bb78; margin-bottom: 20px; }}
    </style>
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>&#9989; Pembayaran Berhasil</h1>
            <p>Konfirmasi Pembayaran Online</p>
        </div>
        <div class="content">
            <div style="text-align: center;" class="section">
                <div class="success-icon">&#10003;</div>
                <h2 style="color: #2d3748; margin: 0 0 10px 0;">Terima Kasih {name}</h2>
                <p style="color: #718096; margin: 0;">Pembayaran Anda telah berhasil direkam</p>
            </div>
            <div class="section">
                <div class="section-title">Informasi Mahasiswa</div>
                <div class="info-grid">
                    <div class="info-label">Nama Lengkap</div>
                    <div class="info-value">{name}</div>
                    <div class="info-label">Email</div>
                    <div class="info-value">{email}</div>
                    <div class="info-label">NIM</div>
                    <div class="info-value">{nim}</div>
                    <div class="info-label">Program Studi</div>
                    <div class="info-value">{prodi}</div>
                    <div class="info-label">Semester</div>
                    <div class="info-value">{semester}</div>
                </div>
            </div>
            <div class="section">
                <div class="section-title">Detail Pembayaran</div>
                <div class="payment-card">
                    <div style="text-align: center;">
                        <div style="font-size: 14px; opacity: 0.9;">Jumlah yang harus dibayar</div>
                        <div class="amount">Rp {transfer}</div>
                        <div style="font-size: 14px; opacity: 0.9; margin-top: 10px;">
                            <span>{base} + Kode Unik: {code}</span>
                        </div>
                    </div>
                </div>
                <div class="info-grid" style="margin-top: 15px;">
                    <div class="info-label">ID Pembayaran</div>
                    <div class="info-value" style="font-family: monospace;">{id}</div>
                    <div class="info-label">Waktu Transaksi</div>
                    <div class="info-value">{timestamp}</div>
                </div>
            </div>
            <div class="instructions">
                <div class="section-title" style="color: #2d3748;">Instruksi Transfer</div>
                <ol style="margin: 0; padding-left: 20px; color: #4a5568;">
                    <li>Transfer tepat sejumlah <strong>Rp {transfer}</strong></li>
                    <li>Ke rekening:<ul>{accounts}</ul></li>
                    <li>Atas nama: <strong>{institution}</strong></li>
                    <li>Gunakan ID Pembayaran sebagai referensi</li>
                    <li>Simpan bukti transfer untuk verifikasi</li>
                </ol>
            </div>
        </div>
        <div class="footer">
            <p>Email ini dikirim secara otomatis. Mohon tidak membalas email ini.</p>
            <p>Hubungi administrasi jika ada pertanyaan.</p>
            <p>&copy; {year} Sistem Pembayaran Online - {institution}</p>
        </div>
    </div>
</body>
</html>
"##,
        name = escape_html(&view.name),
        email = escape_html(&view.email),
        nim = escape_html(&view.student_id),
        prodi = escape_html(&view.program),
        semester = view.semester_label,
        transfer = view.transfer_amount,
        base = view.base_formatted,
        code = view.unique_code,
        id = view.payment_id,
        timestamp = view.timestamp,
        accounts = accounts,
        institution = INSTITUTION,
        year = view.year,
    )
}

/// One-line summary for the log-only path.
pub fn summary_line(view: &ConfirmationView) -> String {
    format!(
        "nama={} nim={} total=Rp {} ({} + kode unik {})",
        view.name,
        view.student_id,
        view.transfer_amount,
        view.base_formatted,
        view.unique_code
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
