//! User-facing reply texts (Indonesian).
//!
//! Everything sent with [`TextMode::Markdown`](crate::bot::messenger::TextMode) uses
//! Telegram's legacy Markdown.

use crate::database::models::LandingRecord;

/// Liveness reply for non-POST requests.
pub const ALIVE: &str = "🚀 Bot Appendiks aktif.";

pub const START: &str = "👋 *Halo, Petugas Enumerator!*

Selamat datang di *Bot Pendataan Pendaratan Ikan Appendiks* 🐟🚤.

Bot ini membantu Anda *mencatat data pendaratan ikan secara cepat dan rapi* langsung dari Telegram, sehingga Anda *tidak perlu repot mencatat manual dan rekap ulang*.

✨ *Fitur Bot:*
✅ Input data pendaratan langsung via chat
✅ Validasi kode kapal, alat tangkap, dan jenis ikan otomatis
✅ Data langsung tersimpan ke sistem secara real-time
✅ Mudah digunakan kapan saja, di mana saja

✨ *Cara Penggunaan:*
1️⃣ Ketik /format untuk melihat format input.
2️⃣ Ketik /daftar jika Anda belum terdaftar.
3️⃣ Setelah terdaftar, Anda dapat langsung mengirim data pendaratan sesuai format.

🪐 Data Anda akan membantu *pengelolaan sumber daya ikan lebih baik dan akurat*.
Terima kasih telah menjadi bagian dari *Enumerasi Cerdas Appendiks*.

*Salam, Tim Appendiks*";

pub const FORMAT: &str = "✏️ *Format Input:*

```
L OR NL : NL
Kode Kapal : 1422
Kode Alat : JIH
Satuan : KG
Kode Ikan : TNL
Volume : 200
```
_Tekan lama untuk salin._";

pub const ALREADY_REGISTERED: &str = "✅ Anda sudah terdaftar dan dapat menggunakan bot ini.";
pub const REGISTRATION_SUBMITTED: &str = "🕐 Permintaan pendaftaran terkirim. Tunggu verifikasi admin.";
pub const NOT_REGISTERED: &str = "❌ Anda belum terdaftar sebagai petugas.";
pub const INCOMPLETE_FORMAT: &str = "⚠️ Format tidak lengkap. Ketik /format untuk referensi.";
pub const INVALID_VOLUME: &str = "⚠️ Volume tidak valid atau melebihi 500 KG.";
pub const REFERENCE_NOT_FOUND: &str = "❌ Kode Kapal, Alat, atau Ikan tidak ditemukan.";

/// Escape legacy Markdown control characters in interpolated values.
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Confirmation echoed back after a landing is stored.
pub fn landing_saved(record: &LandingRecord) -> String {
    let e = escape_markdown;
    format!(
        "✅ *Data berhasil disimpan:*\n\
         - L OR NL: {}\n\
         - Kapal: {} ({})\n\
         - Alat: {} ({})\n\
         - Jenis Ikan: {} ({})\n\
         - Volume: {} {}",
        e(&record.landing_type),
        e(&record.vessel_name),
        e(&record.vessel_code),
        e(&record.gear_name),
        e(&record.gear_code),
        e(&record.species_name),
        e(&record.species_code),
        e(&record.volume),
        e(&record.unit),
    )
}

/// Plain-text error report sent to the admin chat.
pub fn bot_error(error: &str) -> String {
    format!("🚨 Bot error:\n{error}")
}
