use crate::db::models::Question;
use crate::error::TriviaError;

/// One 1-based page of the full, id-ordered question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a> {
    pub number: usize,
    pub items: &'a [Question],
    /// Size of the unsliced list.
    pub total: usize,
    pub last_page: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// `ceil(total / page_size)`; zero for an empty list.
    pub fn last_page(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Slice `[(page-1)*size, page*size)` out of `questions`.
    ///
    /// Only `1 <= page <= last_page` is valid; anything else, including
    /// every page of an empty list, is `NotFound`.
    pub fn page<'a>(&self, questions: &'a [Question], page: i64) -> Result<Page<'a>, TriviaError> {
        let total = questions.len();
        let last_page = self.last_page(total);

        let number = usize::try_from(page)
            .ok()
            .filter(|p| (1..=last_page).contains(p))
            .ok_or_else(|| {
                TriviaError::NotFound(format!("page {page} is outside 1..={last_page}"))
            })?;

        let start = (number - 1) * self.page_size;
        let end = (start + self.page_size).min(total);
        Ok(Page {
            number,
            items: &questions[start..end],
            total,
            last_page,
        })
    }
}
