/// Specifies the direction for sorting documents.
///
/// Used both in the schema (`sort` attribute, index directions) and in the
/// resolved sort specification handed to the collection. The numeric
/// conversions follow the document-database convention of `1` for ascending
/// and `-1` for descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    /// Sort from smallest to largest value (A to Z, 0 to 9)
    Ascending,
    /// Sort from largest to smallest value (Z to A, 9 to 0)
    Descending,
}

impl SortOrder {
    /// Returns the numeric direction: `1` for ascending, `-1` for descending.
    pub fn direction(&self) -> i32 {
        match self {
            SortOrder::Ascending => 1,
            SortOrder::Descending => -1,
        }
    }

    /// Interprets a numeric direction; negative values sort descending,
    /// everything else ascending.
    pub fn from_direction(direction: i64) -> SortOrder {
        if direction < 0 {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Ascending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_values() {
        assert_eq!(SortOrder::Ascending.direction(), 1);
        assert_eq!(SortOrder::Descending.direction(), -1);
    }

    #[test]
    fn test_from_direction() {
        assert_eq!(SortOrder::from_direction(1), SortOrder::Ascending);
        assert_eq!(SortOrder::from_direction(0), SortOrder::Ascending);
        assert_eq!(SortOrder::from_direction(-1), SortOrder::Descending);
        assert_eq!(SortOrder::from_direction(-42), SortOrder::Descending);
    }

    #[test]
    fn test_default_is_ascending() {
        assert_eq!(SortOrder::default(), SortOrder::Ascending);
    }
}
