use std::fmt;

/// An opaque cell value. The raw text is kept verbatim; when it reads as a
/// number the parsed value drives equality.
#[derive(Debug, Clone, Default)]
pub struct Scalar {
    raw: String,
    number: Option<f64>,
}

impl Scalar {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let number = raw.parse::<f64>().ok();
        Self { raw, number }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.number
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self.number, other.number) {
            // NaN in the same cell of both traces counts as a match.
            (Some(a), Some(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => self.raw == other.raw,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cells_compare_by_value() {
        assert_eq!(Scalar::new("1"), Scalar::new("1.0"));
        assert_eq!(Scalar::new("-2.50e1"), Scalar::new("-25"));
        assert_ne!(Scalar::new("1"), Scalar::new("1.0001"));
    }

    #[test]
    fn nan_matches_nan() {
        assert_eq!(Scalar::new("nan"), Scalar::new("NaN"));
        assert_ne!(Scalar::new("nan"), Scalar::new("0"));
    }

    #[test]
    fn text_cells_compare_verbatim() {
        assert_eq!(Scalar::new("abc"), Scalar::new("abc"));
        assert_ne!(Scalar::new("abc"), Scalar::new("ABC"));
        assert_ne!(Scalar::new("1"), Scalar::new("one"));
    }
}
