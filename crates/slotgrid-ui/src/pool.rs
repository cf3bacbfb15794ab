//! Bounded-pool grid: one slot per item plus a trailing run of empty slots.
//!
//! The pool is resized to exactly `items.len() + trailing_buffer` on every
//! refresh. Growth and shrink only touch the tail, so lower slots keep their
//! handle and position across refreshes.

use std::marker::PhantomData;
use std::rc::Rc;

use slotgrid_types::config::PoolConfig;
use slotgrid_types::error::{GridError, Result};

use crate::schedule::TokenSource;
use crate::selectable::{FocusChange, RefreshOutcome, SelectableGrid};
use crate::slot::{FocusTarget, HandleAllocator, SlotHandle, SlotTemplate, SlotView};
use crate::transition::{PendingRefresh, TransitionHooks, TransitionTicket};

struct PoolSlot<T, V> {
    handle: SlotHandle,
    view: V,
    item: Option<Rc<T>>,
    active: bool,
}

/// Builder for [`BoundedGrid`].
pub struct BoundedGridBuilder<T, S> {
    config: PoolConfig,
    template: Option<S>,
    hooks: Option<Box<dyn TransitionHooks>>,
    _item: PhantomData<fn(T)>,
}

impl<T, S: SlotTemplate<T>> BoundedGridBuilder<T, S> {
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            template: None,
            hooks: None,
            _item: PhantomData,
        }
    }

    /// Template that creates and destroys slot views.
    pub fn template(mut self, template: S) -> Self {
        self.template = Some(template);
        self
    }

    /// Hooks that time animated refreshes. Without hooks every refresh
    /// rebinds immediately.
    pub fn transitions(mut self, hooks: impl TransitionHooks + 'static) -> Self {
        self.hooks = Some(Box::new(hooks));
        self
    }

    pub fn build(self) -> Result<BoundedGrid<T, S>> {
        if let Err(e) = self.config.validate() {
            log::error!("Bounded grid rejected: {e}");
            return Err(e);
        }
        let Some(template) = self.template else {
            let e = GridError::Template("bounded grid has no slot template".into());
            log::error!("Bounded grid rejected: {e}");
            return Err(e);
        };
        Ok(BoundedGrid {
            template,
            columns: self.config.columns,
            trailing_buffer: self.config.trailing_buffer,
            placeholders_selectable: self.config.placeholders_selectable,
            slots: Vec::new(),
            handles: HandleAllocator::default(),
            item_count: 0,
            hooks: self.hooks,
            tickets: TokenSource::default(),
            pending: None,
        })
    }
}

/// A grid whose pool tracks the current item count.
pub struct BoundedGrid<T, S: SlotTemplate<T>> {
    template: S,
    columns: usize,
    trailing_buffer: usize,
    placeholders_selectable: bool,
    slots: Vec<PoolSlot<T, S::View>>,
    handles: HandleAllocator,
    item_count: usize,
    hooks: Option<Box<dyn TransitionHooks>>,
    tickets: TokenSource,
    pending: Option<PendingRefresh<T>>,
}

impl<T, S: SlotTemplate<T>> BoundedGrid<T, S> {
    pub fn builder(config: PoolConfig) -> BoundedGridBuilder<T, S> {
        BoundedGridBuilder::new(config)
    }

    /// Current pool length (including trailing empty slots).
    pub fn pool_len(&self) -> usize {
        self.slots.len()
    }

    /// Number of real items bound by the last completed refresh.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn trailing_buffer(&self) -> usize {
        self.trailing_buffer
    }

    /// Follow a layout change. The pool is untouched; 0 means unmeasured.
    pub fn set_columns(&mut self, columns: usize) {
        if columns != self.columns {
            log::debug!("Bounded grid columns {} -> {columns}", self.columns);
            self.columns = columns;
        }
    }

    /// Handle of the slot at pool position `index`.
    pub fn handle_at(&self, index: usize) -> Option<SlotHandle> {
        self.slots.get(index).map(|s| s.handle)
    }

    /// Item bound to `handle`, if any.
    pub fn item(&self, handle: SlotHandle) -> Option<&Rc<T>> {
        self.slot(handle).and_then(|s| s.item.as_ref())
    }

    /// View behind `handle`.
    pub fn view(&self, handle: SlotHandle) -> Option<&S::View> {
        self.slot(handle).map(|s| &s.view)
    }

    pub fn is_transitioning(&self) -> bool {
        self.pending.is_some()
    }

    fn slot(&self, handle: SlotHandle) -> Option<&PoolSlot<T, S::View>> {
        self.position(handle).map(|i| &self.slots[i])
    }

    fn position(&self, handle: SlotHandle) -> Option<usize> {
        self.slots.iter().position(|s| s.handle == handle)
    }

    /// Replace the displayed items.
    ///
    /// `focused` is the slot currently holding focus; unless
    /// `reset_selection` is set, the item it shows is looked up again after
    /// the rebind. With a nonzero `direction`, visible slots and installed
    /// hooks, the rebind waits for the exit phase and the outcome is
    /// [`RefreshOutcome::Deferred`]. A refresh issued while another is
    /// deferred supersedes it.
    pub fn refresh(
        &mut self,
        items: Vec<Rc<T>>,
        reset_selection: bool,
        direction: i32,
        focused: Option<SlotHandle>,
    ) -> RefreshOutcome {
        let captured = if reset_selection {
            None
        } else {
            focused.and_then(|h| self.item(h).cloned())
        };

        if let Some(old) = self.pending.take() {
            log::debug!("Refresh transition {:?} superseded", old.ticket);
            if let Some(hooks) = self.hooks.as_mut() {
                hooks.cancel(old.ticket);
            }
        }

        let any_active = self.slots.iter().any(|s| s.active);
        let Some(hooks) = self.hooks.as_mut().filter(|_| direction != 0 && any_active) else {
            return RefreshOutcome::Applied(self.rebind(items, reset_selection, captured));
        };

        let ticket = self.tickets.issue();
        log::debug!(
            "Refresh of {} items deferred behind exit phase {ticket:?}",
            items.len()
        );
        hooks.begin_exit(ticket, direction);
        self.pending = Some(PendingRefresh {
            ticket,
            direction,
            items,
            reset_selection,
            captured,
        });
        RefreshOutcome::Deferred(ticket)
    }

    /// Advance an in-flight transition. Returns the focus outcome once the
    /// rebind has happened.
    pub fn tick(&mut self, dt_ms: u32) -> Option<FocusChange> {
        self.pending.as_ref()?;
        let finished = self.hooks.as_mut().is_some_and(|h| h.poll_exit(dt_ms));
        if finished { self.finish_transition() } else { None }
    }

    /// Report that the exit phase for `ticket` finished. Stale tickets are
    /// ignored.
    pub fn complete_exit(&mut self, ticket: TransitionTicket) -> Option<FocusChange> {
        match &self.pending {
            Some(p) if p.ticket == ticket => self.finish_transition(),
            _ => {
                log::warn!("Ignoring completion for stale transition {ticket:?}");
                None
            },
        }
    }

    fn finish_transition(&mut self) -> Option<FocusChange> {
        let pending = self.pending.take()?;
        let change = self.rebind(pending.items, pending.reset_selection, pending.captured);
        if let Some(hooks) = self.hooks.as_mut() {
            hooks.begin_enter(pending.direction);
        }
        Some(change)
    }

    fn rebind(
        &mut self,
        items: Vec<Rc<T>>,
        reset_selection: bool,
        captured: Option<Rc<T>>,
    ) -> FocusChange {
        let needed = items.len() + self.trailing_buffer;
        self.resize(needed);

        for slot in &mut self.slots {
            slot.active = false;
            slot.view.set_active(false);
        }
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let item = items.get(i).cloned();
            slot.view.bind(item.as_ref());
            slot.item = item;
            slot.active = true;
            slot.view.set_active(true);
        }
        self.item_count = items.len();

        if !reset_selection
            && let Some(item) = captured
            && let Some(index) = self
                .slots
                .iter()
                .position(|s| s.item.as_ref().is_some_and(|i| Rc::ptr_eq(i, &item)))
        {
            return FocusChange::Restored(FocusTarget {
                handle: self.slots[index].handle,
                index,
            });
        }
        match self.first_item_slot() {
            Some(target) => FocusChange::First(target),
            None => FocusChange::Cleared,
        }
    }

    fn resize(&mut self, needed: usize) {
        let before = self.slots.len();
        while self.slots.len() < needed {
            let handle = self.handles.issue();
            let view = self.template.instantiate(handle);
            self.slots.push(PoolSlot {
                handle,
                view,
                item: None,
                active: false,
            });
        }
        while self.slots.len() > needed {
            if let Some(slot) = self.slots.pop() {
                self.template.release(slot.handle, slot.view);
            }
        }
        if before != needed {
            log::debug!("Bounded pool resized {before} -> {needed}");
        }
    }

    fn first_item_slot(&self) -> Option<FocusTarget> {
        self.slots
            .iter()
            .enumerate()
            .find(|(_, s)| s.active && s.item.is_some() && s.view.is_interactive())
            .map(|(index, s)| FocusTarget {
                handle: s.handle,
                index,
            })
    }
}

impl<T, S: SlotTemplate<T>> SelectableGrid for BoundedGrid<T, S> {
    fn columns(&self) -> usize {
        self.columns
    }

    fn selectable_count(&self) -> usize {
        let active = self.slots.iter().filter(|s| s.active).count();
        if self.placeholders_selectable {
            active
        } else {
            active.min(self.item_count)
        }
    }

    fn selectable_slots(&self) -> Vec<SlotHandle> {
        self.slots
            .iter()
            .filter(|s| s.active)
            .take(self.selectable_count())
            .map(|s| s.handle)
            .collect()
    }

    fn resolve_index(&mut self, index: usize) -> Option<SlotHandle> {
        self.slots.get(index).filter(|s| s.active).map(|s| s.handle)
    }

    fn index_of(&self, handle: SlotHandle) -> Option<usize> {
        self.position(handle).filter(|&i| self.slots[i].active)
    }

    fn is_interactive(&self, handle: SlotHandle) -> bool {
        self.slot(handle).is_some_and(|s| {
            s.active
                && (s.item.is_some() || self.placeholders_selectable)
                && s.view.is_interactive()
        })
    }

    fn data_index(&self, handle: SlotHandle) -> Option<usize> {
        self.position(handle).filter(|&i| i < self.item_count)
    }

    fn select_data_index(&mut self, data_index: usize) -> Option<FocusTarget> {
        if data_index >= self.item_count {
            return None;
        }
        let handle = self.handle_at(data_index)?;
        Some(FocusTarget {
            handle,
            index: data_index,
        })
    }

    fn first_selectable(&mut self) -> Option<FocusTarget> {
        self.first_item_slot()
    }
}
