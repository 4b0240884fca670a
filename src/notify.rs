//! Host notifications.
//!
//! Every event goes through one generic call carrying `(row, col, event)`.
//! The only response the grid acts on is `Cancel` to [`GridEvent::BeginEdit`].

/// Events delivered to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridEvent {
    RowCountChanged,
    ColumnCountChanged,
    /// A selection gesture or programmatic change is about to modify the selection
    SelChanging,
    /// The selection changed
    SelChanged,
    BeginEdit,
    EndEdit,
    /// Rows were reordered by a sort
    Sorted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyResponse {
    #[default]
    Continue,
    Cancel,
}

pub trait GridHost {
    fn notify(&mut self, row: u32, col: u32, event: GridEvent) -> NotifyResponse;
}

/// Records every notification; handy for tests and for hosts that poll.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<(u32, u32, GridEvent)>,
    /// When set, `BeginEdit` is answered with `Cancel`
    pub veto_edits: bool,
}

impl GridHost for EventLog {
    fn notify(&mut self, row: u32, col: u32, event: GridEvent) -> NotifyResponse {
        self.events.push((row, col, event));
        if self.veto_edits && event == GridEvent::BeginEdit {
            NotifyResponse::Cancel
        } else {
            NotifyResponse::Continue
        }
    }
}

impl<H: GridHost + ?Sized> GridHost for std::rc::Rc<std::cell::RefCell<H>> {
    fn notify(&mut self, row: u32, col: u32, event: GridEvent) -> NotifyResponse {
        self.borrow_mut().notify(row, col, event)
    }
}
