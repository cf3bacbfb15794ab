//! Windowed (virtualized) grid: a fixed slot pool sliding over a large list.
//!
//! The pool covers `(visible_rows + buffer_rows) * columns` cells and never
//! changes length after [`WindowedGrid::initialize`]. Scrolling only rebinds
//! and repositions slots, so per-scroll work is bounded by the pool size no
//! matter how long the logical list is.

use std::marker::PhantomData;
use std::ops::Range;
use std::rc::Rc;

use slotgrid_types::config::WindowConfig;
use slotgrid_types::error::{GridError, Result};

use crate::layout::CellLayout;
use crate::selectable::{FocusChange, SelectableGrid};
use crate::slot::{FocusTarget, HandleAllocator, SlotHandle, SlotTemplate, SlotView};

/// Absorbs rounding when an offset lands exactly on a row boundary.
const ROW_EPSILON: f64 = 1e-6;

struct WindowSlot<V> {
    handle: SlotHandle,
    view: V,
    data_index: Option<usize>,
}

/// Builder for [`WindowedGrid`].
pub struct WindowedGridBuilder<T, S> {
    config: WindowConfig,
    template: Option<S>,
    _item: PhantomData<fn(T)>,
}

impl<T, S: SlotTemplate<T>> WindowedGridBuilder<T, S> {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            config,
            template: None,
            _item: PhantomData,
        }
    }

    pub fn template(mut self, template: S) -> Self {
        self.template = Some(template);
        self
    }

    pub fn build(self) -> Result<WindowedGrid<T, S>> {
        if let Err(e) = self.config.validate() {
            log::error!("Windowed grid rejected: {e}");
            return Err(e);
        }
        let Some(template) = self.template else {
            let e = GridError::Template("windowed grid has no slot template".into());
            log::error!("Windowed grid rejected: {e}");
            return Err(e);
        };
        Ok(WindowedGrid {
            template,
            layout: CellLayout::from_config(&self.config),
            viewport_height: f64::from(self.config.viewport_height),
            config: self.config,
            slots: Vec::new(),
            handles: HandleAllocator::default(),
            data: Vec::new(),
            scroll_offset: 0.0,
            first_visible_row: 0,
            initialized: false,
        })
    }
}

/// A virtualized grid over an arbitrarily long list.
pub struct WindowedGrid<T, S: SlotTemplate<T>> {
    template: S,
    config: WindowConfig,
    layout: CellLayout,
    viewport_height: f64,
    slots: Vec<WindowSlot<S::View>>,
    handles: HandleAllocator,
    data: Vec<Rc<T>>,
    scroll_offset: f64,
    first_visible_row: usize,
    initialized: bool,
}

impl<T, S: SlotTemplate<T>> WindowedGrid<T, S> {
    pub fn builder(config: WindowConfig) -> WindowedGridBuilder<T, S> {
        WindowedGridBuilder::new(config)
    }

    /// Install `data`, size the pool on first use, and bind the window.
    ///
    /// Returns the total virtual extent for the scroll surface's track.
    pub fn initialize(&mut self, data: Vec<Rc<T>>) -> f64 {
        self.ensure_pool();
        self.data = data;
        let offset = self.scroll_offset.min(self.max_scroll_offset());
        self.on_scroll(offset);
        log::debug!(
            "Windowed grid holds {} items in {} slots (extent {:.0})",
            self.data.len(),
            self.slots.len(),
            self.content_extent()
        );
        self.content_extent()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn pool_len(&self) -> usize {
        self.slots.len()
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn item(&self, data_index: usize) -> Option<&Rc<T>> {
        self.data.get(data_index)
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn first_visible_row(&self) -> usize {
        self.first_visible_row
    }

    /// `ceil(len / columns) * row_height`.
    pub fn content_extent(&self) -> f64 {
        self.layout.extent(self.data.len())
    }

    pub fn max_scroll_offset(&self) -> f64 {
        (self.content_extent() - self.viewport_height).max(0.0)
    }

    /// Data indices currently bound to slots.
    pub fn bound_range(&self) -> Range<usize> {
        let start = self.first_visible_row.saturating_mul(self.config.columns);
        let end = start
            .saturating_add(self.slots.len())
            .min(self.data.len());
        start.min(end)..end
    }

    /// Slot currently showing `data_index`.
    pub fn slot_for_data_index(&self, data_index: usize) -> Option<SlotHandle> {
        let offset = data_index.checked_sub(self.bound_range().start)?;
        self.slots
            .get(offset)
            .filter(|s| s.data_index == Some(data_index))
            .map(|s| s.handle)
    }

    pub fn view(&self, handle: SlotHandle) -> Option<&S::View> {
        self.slot(handle).map(|s| &s.view)
    }

    fn slot(&self, handle: SlotHandle) -> Option<&WindowSlot<S::View>> {
        self.slots.iter().find(|s| s.handle == handle)
    }

    fn ensure_pool(&mut self) {
        if self.initialized {
            return;
        }
        let len = self.config.pool_len();
        self.slots.reserve_exact(len);
        for _ in 0..len {
            let handle = self.handles.issue();
            let mut view = self.template.instantiate(handle);
            view.set_active(false);
            self.slots.push(WindowSlot {
                handle,
                view,
                data_index: None,
            });
        }
        self.initialized = true;
        log::debug!(
            "Windowed pool sized to {len} ({} visible + {} buffer rows x {} columns)",
            self.config.visible_rows(),
            self.config.buffer_rows,
            self.config.columns
        );
    }

    /// React to a scroll-position change. Negative offsets count as 0.
    pub fn on_scroll(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
        self.scroll_offset = offset;
        let row = (offset / self.layout.row_height() + ROW_EPSILON).floor() as usize;
        if row != self.first_visible_row {
            log::trace!("Window moved: first row {} -> {row}", self.first_visible_row);
            self.first_visible_row = row;
        }
        self.rebind();
    }

    fn rebind(&mut self) {
        let base = self.first_visible_row.saturating_mul(self.config.columns);
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let index = base.saturating_add(i);
            match self.data.get(index) {
                Some(item) => {
                    slot.view.bind(Some(item));
                    let pos = self.layout.position(index);
                    slot.view.set_position(pos.x, pos.y);
                    if slot.data_index.is_none() {
                        slot.view.set_active(true);
                    }
                    slot.data_index = Some(index);
                },
                None => {
                    if slot.data_index.take().is_some() {
                        slot.view.set_active(false);
                    }
                },
            }
        }
    }

    /// Scroll `index` into view and return the slot now showing it.
    ///
    /// Out-of-range indices are ignored.
    pub fn select_logical_index(&mut self, index: usize) -> Option<FocusTarget> {
        if index >= self.data.len() {
            return None;
        }
        let top = self.layout.row_top(self.layout.row_of(index));
        let bottom = top + self.layout.row_height();
        let mut offset = self.scroll_offset;
        if top < offset {
            offset = top;
        } else if bottom > offset + self.viewport_height {
            offset = bottom - self.viewport_height;
        }
        self.on_scroll(offset);
        self.slot_for_data_index(index)
            .map(|handle| FocusTarget { handle, index })
    }

    /// Swap the logical list without touching the pool.
    ///
    /// With `reset_selection` the window returns to the top and the first
    /// selectable slot is suggested. Otherwise the offset is clamped to the
    /// new extent and focus follows the item shown by `focused` (matched by
    /// identity) to its new index; when that item is gone, the first
    /// focusable slot of the clamped window is suggested instead.
    pub fn set_data(
        &mut self,
        data: Vec<Rc<T>>,
        reset_selection: bool,
        focused: Option<SlotHandle>,
    ) -> FocusChange {
        self.ensure_pool();
        let captured = if reset_selection {
            None
        } else {
            focused
                .and_then(|h| self.data_index(h))
                .and_then(|i| self.data.get(i).cloned())
        };
        self.data = data;
        let offset = if reset_selection {
            0.0
        } else {
            self.scroll_offset.min(self.max_scroll_offset())
        };
        self.on_scroll(offset);

        if let Some(item) = captured
            && let Some(index) = self.data.iter().position(|d| Rc::ptr_eq(d, &item))
            && let Some(target) = self.select_logical_index(index)
        {
            return FocusChange::Restored(target);
        }
        let fallback = if reset_selection {
            None
        } else {
            self.first_bound_focusable()
        };
        match fallback.or_else(|| self.first_selectable()) {
            Some(target) => FocusChange::First(target),
            None => FocusChange::Cleared,
        }
    }

    /// First focusable slot in the current window, without scrolling.
    fn first_bound_focusable(&self) -> Option<FocusTarget> {
        self.slots.iter().find_map(|s| match s.data_index {
            Some(index) if s.view.is_interactive() => Some(FocusTarget {
                handle: s.handle,
                index,
            }),
            _ => None,
        })
    }
}

impl<T, S: SlotTemplate<T>> SelectableGrid for WindowedGrid<T, S> {
    fn columns(&self) -> usize {
        self.config.columns
    }

    fn selectable_count(&self) -> usize {
        self.data.len()
    }

    fn selectable_slots(&self) -> Vec<SlotHandle> {
        self.slots
            .iter()
            .filter(|s| s.data_index.is_some())
            .map(|s| s.handle)
            .collect()
    }

    fn resolve_index(&mut self, index: usize) -> Option<SlotHandle> {
        self.select_logical_index(index).map(|t| t.handle)
    }

    fn resolve_focusable(&mut self, index: usize) -> Option<SlotHandle> {
        let offset = self.scroll_offset;
        let handle = self
            .resolve_index(index)
            .filter(|&h| self.is_interactive(h));
        if handle.is_none() && self.scroll_offset != offset {
            log::trace!("Index {index} not focusable; window back to {offset}");
            self.on_scroll(offset);
        }
        handle
    }

    fn index_of(&self, handle: SlotHandle) -> Option<usize> {
        self.slot(handle).and_then(|s| s.data_index)
    }

    fn is_interactive(&self, handle: SlotHandle) -> bool {
        self.slot(handle)
            .is_some_and(|s| s.data_index.is_some() && s.view.is_interactive())
    }

    fn data_index(&self, handle: SlotHandle) -> Option<usize> {
        self.index_of(handle)
    }

    fn select_data_index(&mut self, data_index: usize) -> Option<FocusTarget> {
        self.select_logical_index(data_index)
    }

    fn first_selectable(&mut self) -> Option<FocusTarget> {
        self.select_logical_index(0)?;
        self.first_bound_focusable()
    }
}
