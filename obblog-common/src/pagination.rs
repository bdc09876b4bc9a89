#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct Pagination {
    pub total_count: u64,
    pub per_page: u32,
    pub current_page: u32,
}

impl Pagination {
    #[must_use]
    pub fn new(total_count: u64, per_page: u32, current_page: u32) -> Self {
        Self {
            total_count,
            per_page,
            current_page,
        }
    }

    #[must_use]
    pub fn total_pages(self) -> u64 {
        if self.per_page == 0 {
            0
        } else {
            self.total_count.div_ceil(u64::from(self.per_page))
        }
    }

    #[must_use]
    pub fn prev_page(self) -> Option<u32> {
        (self.current_page > 1).then(|| self.current_page - 1)
    }

    #[must_use]
    pub fn next_page(self) -> Option<u32> {
        (u64::from(self.current_page) < self.total_pages()).then(|| self.current_page + 1)
    }

    #[must_use]
    pub fn offset(self) -> u64 {
        page_offset(self.current_page, self.per_page)
    }
}

#[must_use]
pub fn page_offset(page: u32, per_page: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(per_page)
}

#[cfg(test)]
mod tests {
    use crate::pagination::{Pagination, page_offset};

    #[test]
    fn last_page_has_only_previous_link() {
        let pagination = Pagination::new(25, 12, 3);

        assert_eq!(pagination.total_pages(), 3);
        assert_eq!(pagination.next_page(), None);
        assert_eq!(pagination.prev_page(), Some(2));
    }

    #[test]
    fn first_page_has_only_next_link() {
        let pagination = Pagination::new(25, 12, 1);

        assert_eq!(pagination.prev_page(), None);
        assert_eq!(pagination.next_page(), Some(2));
        assert_eq!(pagination.offset(), 0);
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        assert_eq!(Pagination::new(24, 12, 1).total_pages(), 2);
        assert_eq!(Pagination::new(0, 12, 1).total_pages(), 0);
        assert_eq!(Pagination::new(1, 12, 1).total_pages(), 1);
    }

    #[test]
    fn beyond_last_page_is_not_rejected() {
        let pagination = Pagination::new(25, 12, 7);

        assert_eq!(pagination.next_page(), None);
        assert_eq!(pagination.prev_page(), Some(6));
        assert_eq!(pagination.offset(), 72);
    }

    #[test]
    fn offsets() {
        assert_eq!(page_offset(1, 12), 0);
        assert_eq!(page_offset(3, 12), 24);
        assert_eq!(page_offset(0, 12), 0);
    }
}
