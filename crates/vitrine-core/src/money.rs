//! Fixed-locale price formatting.
//!
//! Every price shown anywhere in the catalog is rendered for the `pt-BR`
//! locale in `BRL`: two decimal places, `,` as the decimal separator, `.`
//! as the thousands separator, and the `R$` symbol in front. The amount
//! itself stays currency-agnostic (`f64`, as delivered by the content API);
//! only the rendering is locale-fixed.

/// Formats a numeric amount as a `pt-BR` / `BRL` currency string.
///
/// `19.9` becomes `"R$ 19,90"` and `1000.0` becomes `"R$ 1.000,00"`.
/// Negative amounts carry the sign in front of the symbol (`"-R$ 5,00"`).
/// Non-finite amounts have no digit rendering and fall back to the float's
/// own display (`"R$ NaN"`); upstream documents are expected to carry
/// plain non-negative numbers, and anything else propagates as-is.
#[must_use]
pub fn format_brl(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("R$ {amount}");
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    format!("{sign}R$ {},{fraction}", group_thousands(integer))
}

/// Inserts a `.` between every group of three digits, counting from the
/// right: `"1234567"` becomes `"1.234.567"`.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}
