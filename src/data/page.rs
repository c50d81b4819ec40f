use serde::Serialize;
use std::num::NonZeroU32;

/// A 0-based page index paired with the configured page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub number: u32,
    pub size: NonZeroU32,
}

impl PageRequest {
    pub const fn new(number: u32, size: NonZeroU32) -> Self {
        Self { number, size }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.number) * u64::from(self.size.get())
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.size.get())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let size = request.size.get();
        let total_pages = total_elements.div_ceil(u64::from(size));

        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            number: request.number,
            size,
            total_elements,
            total_pages,
            first: request.number == 0,
            last: u64::from(request.number) + 1 >= total_pages,
        }
    }
}
