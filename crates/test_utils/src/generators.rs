//! Property-Based Test Generators
//!
//! Proptest strategies for phone numbers, names and dates on both sides of
//! the validation rules.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

const SEPARATORS: &[char] = &[' ', '-', '(', ')', '+'];

fn interleave(digits: Vec<u8>, separators: Vec<Option<char>>) -> String {
    let mut phone = String::new();
    for (digit, separator) in digits.into_iter().zip(separators) {
        phone.push(char::from(b'0' + digit));
        if let Some(separator) = separator {
            phone.push(separator);
        }
    }
    phone
}

fn phone_with_digit_count(count: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    prop::collection::vec(0u8..10, count).prop_flat_map(|digits| {
        let len = digits.len();
        (
            Just(digits),
            prop::collection::vec(prop::option::weighted(0.3, prop::sample::select(SEPARATORS)), len),
        )
            .prop_map(|(digits, separators)| interleave(digits, separators))
    })
}

/// Phones with 9 to 15 digits and only allowed separators
pub fn valid_phone_strategy() -> impl Strategy<Value = String> {
    phone_with_digit_count(9..=15)
}

/// Phones with 1 to 8 digits
pub fn short_phone_strategy() -> impl Strategy<Value = String> {
    phone_with_digit_count(1..=8)
}

/// Phones with 16 to 24 digits
pub fn long_phone_strategy() -> impl Strategy<Value = String> {
    phone_with_digit_count(16..=24)
}

/// Otherwise valid phones with one disallowed character spliced in
pub fn phone_with_foreign_char_strategy() -> impl Strategy<Value = String> {
    (
        valid_phone_strategy(),
        prop::sample::select(vec!['a', 'x', '.', '/', '#', '*', '_', 'é']),
        any::<prop::sample::Index>(),
    )
        .prop_map(|(phone, foreign, index)| {
            let mut chars: Vec<char> = phone.chars().collect();
            let at = index.index(chars.len() + 1);
            chars.insert(at, foreign);
            chars.into_iter().collect()
        })
}

/// Names containing at least one visible character
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z '-]{0,40}"
}

/// Dates between 1900-01-01 and `today` inclusive
pub fn past_date_strategy(today: NaiveDate) -> impl Strategy<Value = NaiveDate> {
    let earliest = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(today);
    let span = (today - earliest).num_days().max(0);
    (0..=span).prop_map(move |offset| earliest + Duration::days(offset))
}

/// Dates from one day to ten years after `today`
pub fn future_date_strategy(today: NaiveDate) -> impl Strategy<Value = NaiveDate> {
    (1i64..=3650).prop_map(move |offset| today + Duration::days(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_phones_have_nine_to_fifteen_digits(phone in valid_phone_strategy()) {
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            prop_assert!((9..=15).contains(&digits));
        }

        #[test]
        fn foreign_char_phones_contain_a_foreign_char(phone in phone_with_foreign_char_strategy()) {
            prop_assert!(phone.chars().any(|c| !c.is_ascii_digit() && !SEPARATORS.contains(&c)));
        }
    }
}
