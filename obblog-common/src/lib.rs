pub mod archive;
pub mod model;
pub mod month_range;
pub mod pagination;
pub mod util;
