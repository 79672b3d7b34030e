// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The three custom filters every GRIMOIRE template engine implementation
//! must provide.

/// `"dexterity score"|title_case` -> `"Dexterity Score"`.
pub fn title_case(input: String) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"Armor Class"|snake_case` -> `"armor_class"`.
pub fn snake_case(input: String) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_lower_or_digit = false;
    for ch in input.chars() {
        if ch.is_whitespace() || ch == '-' {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            prev_lower_or_digit = false;
            continue;
        }
        if ch.is_uppercase() {
            if prev_lower_or_digit && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(ch);
            prev_lower_or_digit = ch.is_alphanumeric();
        }
    }
    out.trim_matches('_').to_string()
}

/// `3|dice_modifier` -> `"+3"`, `-1|dice_modifier` -> `"-1"`, `0|dice_modifier` -> `"+0"`.
///
/// Renders an ability-score-style modifier the way it is read aloud at the
/// table: always signed.
pub fn dice_modifier(value: i64) -> String {
    if value >= 0 {
        format!("+{value}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
#[path = "filters_tests.rs"]
mod tests;
