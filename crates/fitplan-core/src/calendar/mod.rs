//! Calendar arithmetic: ISO weeks, week starts, month grids.

pub mod date_math;
pub mod month;

pub use date_math::{
    date_at_index, day_offset, day_offset_at, index_of_date, start_of_week, week_number,
    weekday_label, weeks_between,
};
pub use month::{month_grid, MonthGrid, MonthKey, GRID_COLS, GRID_ROWS};
