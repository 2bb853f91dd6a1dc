/// `center - before` up to and including `center + after - 1`.  Nothing is
/// validated; whether the years exist is the calendar's business.
pub(crate) fn build_year_range(center: i32, before: i32, after: i32) -> Vec<i32> {
    (center.saturating_sub(before)..center.saturating_add(after)).collect()
}

/// How many years around the cursor's year a year list offers
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct YearSpan {
    pub(crate) before: i32,
    pub(crate) after: i32,
}

impl YearSpan {
    /// Year dropdown in the date picker
    pub(crate) const DROPDOWN: YearSpan = YearSpan {
        before: 110,
        after: 110,
    };

    /// The narrower dropdown of older releases
    pub(crate) const LEGACY_DROPDOWN: YearSpan = YearSpan {
        before: 50,
        after: 50,
    };

    /// One page of the year picker
    pub(crate) const BLOCK: YearSpan = YearSpan {
        before: 4,
        after: 8,
    };

    pub(crate) fn around(self, center: i32) -> Vec<i32> {
        build_year_range(center, self.before, self.after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_years() {
        let years = build_year_range(1403, 50, 50);
        assert_eq!(years.len(), 100);
        assert_eq!(years.first(), Some(&1353));
        assert_eq!(years.last(), Some(&1452));
        assert!(years.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn block() {
        let years = YearSpan::BLOCK.around(1403);
        assert_eq!(years, (1399..=1410).collect::<Vec<_>>());
    }

    #[test]
    fn dropdown() {
        let years = YearSpan::DROPDOWN.around(1403);
        assert_eq!(years.len(), 220);
        assert_eq!(years[0], 1293);
        assert_eq!(years[219], 1512);
        assert_eq!(YearSpan::LEGACY_DROPDOWN.around(1403).len(), 100);
    }

    #[test]
    fn negative_years_pass_through() {
        assert_eq!(build_year_range(2, 4, 1), vec![-2, -1, 0, 1, 2]);
    }
}
