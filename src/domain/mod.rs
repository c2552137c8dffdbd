pub mod board;
pub mod column;
pub mod data;
pub mod layout;
pub mod row;

pub use board::{BoardModel, ReloadCallback, RowLayout};
pub use column::{Column, ColumnId};
pub use data::{BoardData, ColumnData, RowData};
pub use layout::{LayoutHandle, LayoutMeasurer, LayoutTracker, Rect};
pub use row::{Row, RowId};
