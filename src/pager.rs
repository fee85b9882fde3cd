use crate::record::{Dataset, TripRecord};

pub const PAGE_SIZE: usize = 5;

/// Cursor that hands out a dataset five records at a time.
///
/// The offset moves forward by [`PAGE_SIZE`] on every call, even when fewer
/// records were left. Past the end it keeps returning empty pages.
#[derive(Debug)]
pub struct RawDataPager<'a> {
    dataset: &'a Dataset,
    offset: usize,
}

impl<'a> RawDataPager<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset, offset: 0 }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn next_page(&mut self) -> &'a [TripRecord] {
        let records = self.dataset.records();
        let start = self.offset.min(records.len());
        let end = self.offset.saturating_add(PAGE_SIZE).min(records.len());
        self.offset = self.offset.saturating_add(PAGE_SIZE);
        &records[start..end]
    }

    /// Moves past `pages` pages without reading them.
    pub fn skip_pages(&mut self, pages: usize) {
        self.offset = self
            .offset
            .saturating_add(pages.saturating_mul(PAGE_SIZE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::City;
    use chrono::NaiveDate;

    #[test]
    fn test_pages_in_order() {
        let dataset = dataset_of(12);
        let mut pager = RawDataPager::new(&dataset);

        assert_eq!(pager.next_page(), &dataset.records()[0..5]);
        assert_eq!(pager.next_page(), &dataset.records()[5..10]);
        assert_eq!(pager.next_page(), &dataset.records()[10..12]);
        assert_eq!(pager.offset(), 15);
    }

    #[test]
    fn test_past_end_is_empty_not_error() {
        let dataset = dataset_of(3);
        let mut pager = RawDataPager::new(&dataset);

        assert_eq!(pager.next_page().len(), 3);
        assert!(pager.next_page().is_empty());
        assert!(pager.next_page().is_empty());
        assert_eq!(pager.offset(), 15);
    }

    #[test]
    fn test_skip_pages() {
        let dataset = dataset_of(12);
        let mut pager = RawDataPager::new(&dataset);

        pager.skip_pages(1);
        assert_eq!(pager.next_page(), &dataset.records()[5..10]);

        pager.skip_pages(usize::MAX);
        assert_eq!(pager.offset(), usize::MAX);
        assert!(pager.next_page().is_empty());
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::default();
        let mut pager = RawDataPager::new(&dataset);
        assert!(pager.next_page().is_empty());
    }

    // Helper functions for tests
    fn dataset_of(n: i64) -> Dataset {
        let ts = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let records = (0..n)
            .map(|i| TripRecord::new(City::Chicago, ts, i, "A", "B", "Subscriber"))
            .collect();
        Dataset::new(vec![], records)
    }
}
