/// LIMIT and OFFSET of a SELECT.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Paginator {
    pub maybe_limit: Option<u64>,
    pub maybe_offset: Option<u64>,
}

impl Paginator {
    pub fn limit(&mut self, limit: u64) {
        self.maybe_limit = Some(limit);
    }

    pub fn offset(&mut self, offset: u64) {
        self.maybe_offset = Some(offset);
    }

    /// Zero based `page` of `per_page` rows.
    pub fn paginate(&mut self, page: u64, per_page: u64) {
        self.maybe_limit = Some(per_page);
        self.maybe_offset = Some(page.saturating_mul(per_page));
    }

    pub fn write<W: std::fmt::Write>(&self, writer: &mut W) -> std::fmt::Result {
        if let Some(limit) = self.maybe_limit {
            write!(writer, " LIMIT {limit}")?;
        }
        if let Some(offset) = self.maybe_offset {
            write!(writer, " OFFSET {offset}")?;
        }
        Ok(())
    }
}
