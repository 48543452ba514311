//! Single property-override rule and its value grammar.
//!
//! ```text
//! value      := literal | adjustment ("," adjustment)*
//! adjustment := "*(" number ")" | "+(" number ")"
//! ```
//!
//! Segments are separated by commas and trimmed. A segment that does not parse
//! as an adjustment is ignored when at least one other segment does; when no
//! segment parses, the whole raw value is a literal.

/// A property key paired with its value expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifier {
    pub property: String,
    pub value: String,
}

impl Modifier {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }

    /// Parses the value expression of this modifier.
    pub fn parse(&self) -> ValueExpr<'_> {
        ValueExpr::parse(&self.value)
    }
}

/// Parsed form of a modifier value.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueExpr<'a> {
    /// Arithmetic adjustment.
    ///
    /// `multiplier_delta` is the sum of `(factor - 1)` over all `*(factor)`
    /// terms, so a single `*(2)` doubles the value. `bonus` is the sum of all
    /// `+(delta)` terms.
    Adjustment { multiplier_delta: f64, bonus: f64 },

    /// Literal override with best-effort typed interpretations.
    Literal {
        text: &'a str,
        number: Option<f64>,
        boolean: Option<bool>,
    },
}

impl<'a> ValueExpr<'a> {
    pub fn parse(value: &'a str) -> Self {
        let mut multiplier_delta = 0.0;
        let mut bonus = 0.0;
        let mut adjusted = false;

        let segments: Vec<&str> = if value.contains(',') {
            value.split(',').map(str::trim).collect()
        } else {
            vec![value]
        };

        for segment in segments {
            if let Some(factor) = term(segment, "*(") {
                multiplier_delta += factor - 1.0;
                adjusted = true;
            } else if let Some(delta) = term(segment, "+(") {
                bonus += delta;
                adjusted = true;
            }
        }

        if adjusted {
            return Self::Adjustment {
                multiplier_delta,
                bonus,
            };
        }

        Self::Literal {
            text: value,
            number: value.parse::<f64>().ok().filter(|n| n.is_finite()),
            boolean: match value {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
        }
    }
}

/// Extracts the number from `<prefix><number>)`; malformed numbers yield None.
fn term(segment: &str, prefix: &str) -> Option<f64> {
    segment
        .strip_prefix(prefix)?
        .strip_suffix(')')?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_multiplier() {
        assert_eq!(
            ValueExpr::parse("*(2)"),
            ValueExpr::Adjustment {
                multiplier_delta: 1.0,
                bonus: 0.0
            }
        );
    }

    #[test]
    fn parses_comma_separated_terms_with_whitespace() {
        assert_eq!(
            ValueExpr::parse("*(1.5), +(3) ,+(-1)"),
            ValueExpr::Adjustment {
                multiplier_delta: 0.5,
                bonus: 2.0
            }
        );
    }

    #[test]
    fn malformed_term_degrades_to_literal() {
        assert_eq!(
            ValueExpr::parse("*(abc)"),
            ValueExpr::Literal {
                text: "*(abc)",
                number: None,
                boolean: None
            }
        );
    }

    #[test]
    fn text_segments_are_ignored_next_to_adjustments() {
        assert_eq!(
            ValueExpr::parse("fast,+(2)"),
            ValueExpr::Adjustment {
                multiplier_delta: 0.0,
                bonus: 2.0
            }
        );
    }

    #[test]
    fn literal_gets_numeric_and_boolean_interpretations() {
        assert_eq!(
            ValueExpr::parse("12.5"),
            ValueExpr::Literal {
                text: "12.5",
                number: Some(12.5),
                boolean: None
            }
        );
        assert_eq!(
            ValueExpr::parse("false"),
            ValueExpr::Literal {
                text: "false",
                number: None,
                boolean: Some(false)
            }
        );
        // Only exact lowercase booleans count.
        assert!(matches!(
            ValueExpr::parse("TRUE"),
            ValueExpr::Literal { boolean: None, .. }
        ));
    }
}
