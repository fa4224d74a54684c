use rand::Rng;

pub const MIN_CODE: u16 = 100;
pub const MAX_CODE: u16 = 999;

/// Suggests a fresh unique code for the payment form.
pub fn generate() -> String {
    rand::thread_rng().gen_range(MIN_CODE..=MAX_CODE).to_string()
}
