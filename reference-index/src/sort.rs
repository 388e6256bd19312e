use crate::NONE_SENTINEL;
use std::cmp::Ordering;

/// Sort key for dropdown choice values.
///
/// Choice values are stored and looked up as plain strings, but several of
/// the columns (scale, years) are numeric-valued, so sorting them as text
/// would put `"100000"` before `"24000"`. A value that parses as a finite
/// number sorts numerically; everything else sorts alphabetically after the
/// numerics. The `"(none)"` sentinel sorts as the number zero so it lands
/// first among numeric siblings.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Classify a choice value for sorting. Never used for equality or
    /// lookup; keys stay canonical strings everywhere else.
    pub fn from_value(value: &str) -> Self {
        if value == NONE_SENTINEL {
            return SortKey::Number(0.0);
        }
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => SortKey::Number(n),
            _ => SortKey::Text(value.to_string()),
        }
    }
}

/// Compare two choice values by multikey order.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    match (SortKey::from_value(a), SortKey::from_value(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(&y),
    }
}

/// Sort a choice list in place by multikey order.
pub fn sort_choices(values: &mut [String]) {
    values.sort_by(|a, b| compare_values(a, b));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sorted(values: &[&str]) -> Vec<String> {
        let mut values: Vec<String> = values.iter().map(|v| (*v).to_string()).collect();
        sort_choices(&mut values);
        values
    }

    #[test]
    fn none_sorts_before_numbers_before_text() {
        assert_eq!(sorted(&["apple", "12", "(none)", "5"]), vec![
            "(none)",
            "5",
            "12",
            "apple"
        ]);
    }

    #[test]
    fn numeric_strings_sort_by_value() {
        assert_eq!(sorted(&["100000", "24000", "62500"]), vec![
            "24000", "62500", "100000"
        ]);
    }

    #[test]
    fn plain_text_sorts_alphabetically() {
        assert_eq!(sorted(&["Oregon", "Guam", "Maine"]), vec![
            "Guam", "Maine", "Oregon"
        ]);
    }

    #[test]
    fn non_finite_parses_are_treated_as_text() {
        // "inf" and "NaN" parse as f64 but must not join the numeric run.
        assert_eq!(sorted(&["inf", "3", "NaN"]), vec!["3", "NaN", "inf"]);
    }

    #[test]
    fn comparator_is_consistent_with_equality() {
        assert_eq!(compare_values("24000", "24000"), Ordering::Equal);
        assert_eq!(compare_values("(none)", "(none)"), Ordering::Equal);
    }
}
