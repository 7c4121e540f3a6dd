//! Input validation for the payout-details and review steps

use regex::Regex;
use std::sync::OnceLock;

/// Validate a bank card number: 16 to 19 digits, spaces allowed
pub fn validate_card_number(card_number: &str) -> Result<(), String> {
    let card_number = card_number.trim();
    if card_number.is_empty() {
        return Err("Номер карты обязателен".to_string());
    }

    static CARD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = CARD_REGEX
        .get_or_init(|| Regex::new(r"^[0-9 ]+$").expect("Failed to compile card number regex"));

    if !regex.is_match(card_number) {
        return Err("Номер карты может содержать только цифры и пробелы".to_string());
    }

    let digits = card_number.chars().filter(char::is_ascii_digit).count();
    if !(16..=19).contains(&digits) {
        return Err("Номер карты должен содержать от 16 до 19 цифр".to_string());
    }

    Ok(())
}

/// Validate a phone number: optional leading +, 10 to 15 digits
pub fn validate_phone_number(phone: &str) -> Result<(), String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err("Номер телефона обязателен".to_string());
    }

    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| {
        Regex::new(r"^\+?[0-9][0-9 ()-]{8,18}$").expect("Failed to compile phone regex")
    });

    if !regex.is_match(phone) {
        return Err("Неверный формат номера телефона".to_string());
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if !(10..=15).contains(&digits) {
        return Err("Номер телефона должен содержать от 10 до 15 цифр".to_string());
    }

    Ok(())
}

/// Validate a purchase receipt number: digits only
pub fn validate_receipt_number(receipt: &str) -> Result<(), String> {
    let receipt = receipt.trim();
    if receipt.is_empty() {
        return Err("Номер чека обязателен".to_string());
    }

    static RECEIPT_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = RECEIPT_REGEX
        .get_or_init(|| Regex::new(r"^[0-9]{4,32}$").expect("Failed to compile receipt regex"));

    if !regex.is_match(receipt) {
        return Err("Номер чека должен состоять из цифр".to_string());
    }

    Ok(())
}
