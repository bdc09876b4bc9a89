use obblog_common::{month_range::MonthRange, util::format_instant_millis};
use std::fmt::{Display, Formatter};
use time::{Duration, error::Format};

pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum Collection {
    Blog,
    Categories,
}

impl Collection {
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Collection::Blog => "blog",
            Collection::Categories => "categories",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint())
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum FilterOperator {
    GreaterThan,
    LessThan,
    Contains,
}

impl FilterOperator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FilterOperator::GreaterThan => "greater_than",
            FilterOperator::LessThan => "less_than",
            FilterOperator::Contains => "contains",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
struct Condition {
    field: String,
    operator: FilterOperator,
    value: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    #[must_use]
    pub fn new(field: impl Into<String>, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self::default().and(field, operator, value)
    }

    #[must_use]
    pub fn and(
        mut self,
        field: impl Into<String>,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            operator,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::Contains, value)
    }

    /// Matches every instant of `range`, both ends included.
    ///
    /// The API only compares strictly, so the bounds are widened by one
    /// millisecond on each side.
    pub fn within_month(field: &str, range: MonthRange) -> Result<Self, Format> {
        let after = format_instant_millis(range.start() - Duration::MILLISECOND)?;
        let before = format_instant_millis(range.end() + Duration::MILLISECOND)?;

        Ok(Self::new(field, FilterOperator::GreaterThan, after).and(
            field,
            FilterOperator::LessThan,
            before,
        ))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, condition) in self.conditions.iter().enumerate() {
            if index > 0 {
                f.write_str("[and]")?;
            }
            write!(
                f,
                "{}[{}]{}",
                condition.field,
                condition.operator.as_str(),
                condition.value
            )?;
        }
        Ok(())
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct ContentQuery {
    pub fields: Vec<&'static str>,
    pub filters: Option<Filter>,
    pub q: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

impl ContentQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fields(mut self, fields: &[&'static str]) -> Self {
        self.fields = fields.to_vec();
        self
    }

    #[must_use]
    pub fn filters(mut self, filters: Filter) -> Self {
        self.filters = Some(filters);
        self
    }

    #[must_use]
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if !self.fields.is_empty() {
            params.push(("fields", self.fields.join(",")));
        }
        if let Some(filters) = self.filters.as_ref().filter(|filters| !filters.is_empty()) {
            params.push(("filters", filters.to_string()));
        }
        if let Some(q) = &self.q {
            params.push(("q", q.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }

        params
    }
}
