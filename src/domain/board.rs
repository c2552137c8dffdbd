//! Authoritative in-memory board.
//!
//! Rows live in a flat arena keyed by id; columns hold ordered id sequences.
//! The column order held here is the draft that drags mutate. The canonical
//! copy is only replaced by [`BoardModel::update_original_data`].

use crate::domain::column::{Column, ColumnId};
use crate::domain::data::{BoardData, ColumnData, RowData};
use crate::domain::layout::{LayoutHandle, LayoutMeasurer, LayoutTracker, Rect};
use crate::domain::row::{Row, RowId};
use crate::error::{HlaviError, Result};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, info, trace};

/// Structural-change observer. A board holds at most one.
pub type ReloadCallback = Box<dyn FnMut()>;

/// A row together with its cached rectangle
#[derive(Debug, Clone, Copy)]
pub struct RowLayout<'a> {
    pub row: &'a Row,
    pub layout: Option<Rect>,
}

pub struct BoardModel {
    columns: Vec<Column>,
    rows: HashMap<RowId, Row>,
    layout: LayoutTracker,
    measurer: Box<dyn LayoutMeasurer>,
    reload: Option<ReloadCallback>,
    original: BoardData,
    pending_commit: Option<BoardData>,
}

impl fmt::Debug for BoardModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardModel")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("layout", &self.layout)
            .field("has_reload", &self.reload.is_some())
            .field("pending_commit", &self.pending_commit.is_some())
            .finish()
    }
}

struct Structure {
    columns: Vec<Column>,
    rows: HashMap<RowId, Row>,
    original: BoardData,
}

impl BoardModel {
    /// Builds a board from externally supplied data
    pub fn from_data(data: BoardData, measurer: Box<dyn LayoutMeasurer>) -> Result<Self> {
        let structure = Self::build(data)?;
        Ok(Self {
            columns: structure.columns,
            rows: structure.rows,
            layout: LayoutTracker::new(),
            measurer,
            reload: None,
            original: structure.original,
            pending_commit: None,
        })
    }

    /// Registers the structural-change observer at construction time
    pub fn with_reload(mut self, callback: impl FnMut() + 'static) -> Self {
        self.reload = Some(Box::new(callback));
        self
    }

    /// Replaces the structural-change observer
    pub fn set_reload(&mut self, callback: impl FnMut() + 'static) {
        self.reload = Some(Box::new(callback));
    }

    fn build(data: BoardData) -> Result<Structure> {
        let mut columns = Vec::with_capacity(data.columns.len());
        let mut rows = HashMap::new();
        let mut seen_columns = HashSet::new();
        let mut original = BoardData::default();

        for (index, column_data) in data.columns.into_iter().enumerate() {
            let column_id = match column_data.id.as_deref() {
                Some(id) => id.parse::<ColumnId>()?,
                None => ColumnId::generate(),
            };
            if !seen_columns.insert(column_id.clone()) {
                return Err(HlaviError::DuplicateColumnId(column_id.to_string()));
            }

            let mut column = Column::new(column_id.clone(), index, column_data.data.clone());
            let mut normalized = ColumnData::new(column_id.as_str(), column_data.data);

            for row_data in column_data.rows {
                let row_id = match row_data.id.as_deref() {
                    Some(id) => id.parse::<RowId>()?,
                    None => RowId::generate(),
                };
                if rows.contains_key(&row_id) {
                    return Err(HlaviError::DuplicateRowId(row_id.to_string()));
                }

                normalized
                    .rows
                    .push(RowData::new(row_id.as_str(), row_data.data.clone()));
                column.rows.push(row_id.clone());
                rows.insert(
                    row_id.clone(),
                    Row::new(row_id, column_id.clone(), row_data.data),
                );
            }

            original.columns.push(normalized);
            columns.push(column);
        }

        Ok(Structure {
            columns,
            rows,
            original,
        })
    }

    /// Rebuilds the board from new data. Handles of surviving ids are kept,
    /// layout entries of vanished ids are evicted. On error the board is left
    /// untouched.
    pub fn reload(&mut self, data: BoardData) -> Result<()> {
        let mut structure = Self::build(data)?;

        for column in &mut structure.columns {
            column.handle = self.column(&column.id).and_then(|c| c.handle);
        }
        for row in structure.rows.values_mut() {
            row.handle = self.rows.get(&row.id).and_then(|r| r.handle);
        }

        self.columns = structure.columns;
        self.rows = structure.rows;
        self.original = structure.original;

        let column_ids: HashSet<ColumnId> = self.columns.iter().map(|c| c.id.clone()).collect();
        let rows = &self.rows;
        self.layout
            .retain(|id| column_ids.contains(id), |id| rows.contains_key(id));

        info!(
            columns = self.columns.len(),
            rows = self.rows.len(),
            "Board reloaded"
        );
        self.notify();
        Ok(())
    }

    fn notify(&mut self) {
        if let Some(callback) = self.reload.as_mut() {
            callback();
        }
    }

    /// Columns in display order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|col| &col.id == id)
    }

    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.rows.get(id)
    }

    /// Rows of a column in display order
    pub fn rows_in(&self, column_id: &ColumnId) -> Vec<&Row> {
        self.column(column_id)
            .map(|col| col.rows.iter().filter_map(|id| self.rows.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True if any row or column is currently hidden
    pub fn has_hidden(&self) -> bool {
        self.rows.values().any(|row| row.hidden) || self.columns.iter().any(|col| col.hidden)
    }

    pub fn column_layout(&self, id: &ColumnId) -> Option<Rect> {
        self.layout.column(id)
    }

    pub fn row_layout(&self, id: &RowId) -> Option<Rect> {
        self.layout.row(id)
    }

    /// Stores (or clears) the opaque handle of a column's on-screen instance
    pub fn update_column_ref(&mut self, id: &ColumnId, handle: Option<LayoutHandle>) -> Result<()> {
        let column = self
            .columns
            .iter_mut()
            .find(|col| &col.id == id)
            .ok_or_else(|| HlaviError::ColumnNotFound(id.to_string()))?;
        column.handle = handle;
        if handle.is_none() {
            self.layout.set_column(id, None);
        }
        Ok(())
    }

    /// Stores (or clears) the opaque handle of a row's on-screen instance
    pub fn update_row_ref(&mut self, id: &RowId, handle: Option<LayoutHandle>) -> Result<()> {
        let row = self
            .rows
            .get_mut(id)
            .ok_or_else(|| HlaviError::RowNotFound(id.to_string()))?;
        row.handle = handle;
        if handle.is_none() {
            self.layout.set_row(id, None);
        }
        Ok(())
    }

    /// Re-measures one column's rectangle
    pub fn update_column_layout(&mut self, id: &ColumnId) -> Option<Rect> {
        let handle = self.column(id)?.handle;
        let rect = handle.and_then(|h| self.measurer.measure(&h));
        self.layout.set_column(id, rect);
        rect
    }

    /// Re-measures one row's rectangle, hidden or not
    pub fn update_row_layout(&mut self, id: &RowId) -> Option<Rect> {
        let handle = self.rows.get(id)?.handle;
        let rect = handle.and_then(|h| self.measurer.measure(&h));
        self.layout.set_row(id, rect);
        rect
    }

    /// Re-measures every column and every visible row. Hidden rows keep the
    /// rectangle captured when they were hidden.
    pub fn measure_columns_layout(&mut self) {
        for column in &self.columns {
            let rect = column.handle.and_then(|h| self.measurer.measure(&h));
            self.layout.set_column(&column.id, rect);
        }
        for row in self.rows.values().filter(|row| row.is_visible()) {
            let rect = row.handle.and_then(|h| self.measurer.measure(&h));
            self.layout.set_row(&row.id, rect);
        }
        debug!(
            columns = self.layout.column_count(),
            rows = self.layout.row_count(),
            "Measured board layout"
        );
    }

    /// Looks up a row with its cached layout
    pub fn find_row(&self, id: &RowId) -> Option<RowLayout<'_>> {
        self.rows.get(id).map(|row| RowLayout {
            row,
            layout: self.layout.row(id),
        })
    }

    /// Hides a row so its slot renders as a gap. Records the owning column as
    /// the drag origin.
    pub fn hide_row(&mut self, id: &RowId) -> bool {
        let Some(row) = self.rows.get_mut(id) else {
            return false;
        };
        row.hidden = true;
        row.old_column_id = Some(row.column_id.clone());
        self.notify();
        true
    }

    /// Shows a row again and forgets its drag origin
    pub fn show_row(&mut self, id: &RowId) -> bool {
        let Some(row) = self.rows.get_mut(id) else {
            return false;
        };
        row.hidden = false;
        row.old_column_id = None;
        self.notify();
        true
    }

    pub fn hide_column(&mut self, id: &ColumnId) -> bool {
        self.set_column_hidden(id, true)
    }

    pub fn show_column(&mut self, id: &ColumnId) -> bool {
        self.set_column_hidden(id, false)
    }

    fn set_column_hidden(&mut self, id: &ColumnId, hidden: bool) -> bool {
        let Some(column) = self.columns.iter_mut().find(|col| &col.id == id) else {
            return false;
        };
        column.hidden = hidden;
        self.notify();
        true
    }

    /// First measured column whose horizontal span contains `x`
    pub fn column_at(&self, x: f32) -> Option<&Column> {
        self.columns.iter().find(|col| {
            self.layout
                .column(&col.id)
                .map(|rect| rect.contains_x(x))
                .unwrap_or(false)
        })
    }

    /// Slot index for `dragged` in column `column_index`, counted among the
    /// column's rows with `dragged` taken out: the index of the first visible,
    /// measured row whose vertical midpoint lies below `y`, else the end.
    fn insertion_index(&self, column_index: usize, dragged: &RowId, y: f32) -> usize {
        let siblings = self.columns[column_index]
            .rows
            .iter()
            .filter(|id| *id != dragged);
        let mut count = 0;
        for (index, id) in siblings.enumerate() {
            count = index + 1;
            let visible = self.rows.get(id).map(Row::is_visible).unwrap_or(false);
            if !visible {
                continue;
            }
            if let Some(rect) = self.layout.row(id) {
                if rect.mid_y() > y {
                    return index;
                }
            }
        }
        count
    }

    /// Moves `row_id` to the slot under `(x, y)`.
    ///
    /// Returns the id of the column the point falls within, or `None` (and
    /// leaves the board untouched) when the point is outside every measured
    /// column. When the row changes column, `on_column_change(from, to)` is
    /// invoked after the move. Calling this repeatedly with the same point is
    /// a no-op after the first call.
    pub fn move_row<F>(
        &mut self,
        row_id: &RowId,
        x: f32,
        y: f32,
        mut on_column_change: F,
    ) -> Option<ColumnId>
    where
        F: FnMut(&ColumnId, &ColumnId),
    {
        let candidate = self
            .columns
            .iter()
            .position(|col| {
                self.layout
                    .column(&col.id)
                    .map(|rect| rect.contains_x(x))
                    .unwrap_or(false)
            });
        let Some(candidate) = candidate else {
            trace!(x, y, "Pointer outside every column");
            return None;
        };
        let candidate_id = self.columns[candidate].id.clone();
        let current_id = self.rows.get(row_id)?.column_id.clone();

        if candidate_id != current_id {
            let from = self.column_index(&current_id)?;
            self.columns[from].rows.retain(|id| id != row_id);

            let target = self.insertion_index(candidate, row_id, y);
            self.columns[candidate].rows.insert(target, row_id.clone());

            if let Some(row) = self.rows.get_mut(row_id) {
                row.column_id = candidate_id.clone();
                if row.old_column_id.is_none() {
                    row.old_column_id = Some(current_id.clone());
                }
            }

            debug!(
                row = %row_id,
                from = %current_id,
                to = %candidate_id,
                index = target,
                "Row changed column"
            );
            on_column_change(&current_id, &candidate_id);
            self.notify();
        } else {
            let current = self.columns[candidate].position_of(row_id)?;
            let target = self.insertion_index(candidate, row_id, y);
            if target != current {
                let rows = &mut self.columns[candidate].rows;
                let moved = rows.remove(current);
                rows.insert(target, moved);
                debug!(row = %row_id, from = current, to = target, "Row reordered");
                self.notify();
            }
        }

        Some(candidate_id)
    }

    /// Moves a dragged column to the slot under `x`.
    ///
    /// The target slot is the position of the first other visible, measured
    /// column whose horizontal midpoint lies right of `x`, else the end.
    /// Returns the id of the column under the pointer, or `None` without
    /// mutation when `x` is outside every measured column.
    pub fn move_column(&mut self, column_id: &ColumnId, x: f32) -> Option<ColumnId> {
        let under_pointer = self.column_at(x)?.id.clone();
        let current = self.column_index(column_id)?;

        let target = self
            .columns
            .iter()
            .filter(|col| &col.id != column_id)
            .position(|col| {
                !col.hidden
                    && self
                        .layout
                        .column(&col.id)
                        .map(|rect| rect.mid_x() > x)
                        .unwrap_or(false)
            })
            .unwrap_or(self.columns.len() - 1);

        if target != current {
            let moved = self.columns.remove(current);
            self.columns.insert(target, moved);
            for (index, column) in self.columns.iter_mut().enumerate() {
                column.index = index;
            }
            debug!(column = %column_id, from = current, to = target, "Column reordered");
            self.notify();
        }

        Some(under_pointer)
    }

    /// Writes the current order into the canonical snapshot and queues it for
    /// the data source
    pub fn update_original_data(&mut self) -> BoardData {
        let columns = self
            .columns
            .iter()
            .map(|column| ColumnData {
                id: Some(column.id.to_string()),
                data: column.data.clone(),
                rows: column
                    .rows
                    .iter()
                    .filter_map(|id| self.rows.get(id))
                    .map(|row| RowData::new(row.id.as_str(), row.data.clone()))
                    .collect(),
            })
            .collect();
        let snapshot = BoardData::new(columns);

        self.original = snapshot.clone();
        self.pending_commit = Some(snapshot.clone());
        info!(columns = self.columns.len(), "Board order committed");
        snapshot
    }

    /// Canonical snapshot as of the last reload or commit
    pub fn original_data(&self) -> &BoardData {
        &self.original
    }

    /// Takes the commit queued by the last `update_original_data`, if any
    pub fn take_pending_commit(&mut self) -> Option<BoardData> {
        self.pending_commit.take()
    }
}
