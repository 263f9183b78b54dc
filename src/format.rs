//! Indian digit grouping for currency output (12,34,56,789)

/// Group digits the Indian way: the last three together, then pairs.
///
/// ```
/// assert_eq!(wealth_calc::format::group_indian(1_161_695), "11,61,695");
/// ```
pub fn group_indian(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    // Leading group may hold one digit when the head length is odd
    let first = head.len() % 2;
    if first == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[first..].chunks(2).enumerate() {
        if i > 0 || first == 1 {
            out.push(',');
        }
        out.push_str(std::str::from_utf8(pair).unwrap_or_default());
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// Rupee amount with the currency sign, e.g. "₹18,000"
pub fn rupees(amount: u64) -> String {
    format!("\u{20b9}{}", group_indian(amount))
}
