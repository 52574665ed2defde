//! Client side of the page-fetch contract.
//!
//! One request is tracked at a time. Issuing a new request supersedes the
//! previous one: its ticket stops being accepted, so a late response for it
//! is dropped instead of overwriting newer data.

use crate::config::GridOptions;
use crate::interaction::FetchTicket;
use crate::model::DataSource;
use crate::render::Edge;
use crate::types::PageRequest;

/// What an issued request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page; the response replaces everything and may carry the column
    /// model.
    Initial,
    /// Another page beyond one edge of the loaded window.
    Edge(Edge),
}

/// Generation counter for page requests.
#[derive(Debug, Clone, Default)]
pub struct FetchTracker {
    generation: u64,
    in_flight: Option<(FetchTicket, FetchKind)>,
}

impl FetchTracker {
    /// Register a new request and return its ticket.
    pub fn issue(&mut self, kind: FetchKind) -> FetchTicket {
        self.generation += 1;
        let ticket = FetchTicket(self.generation);
        if let Some((old, old_kind)) = self.in_flight.replace((ticket, kind)) {
            log::debug!("fetch {old:?} ({old_kind:?}) superseded by {ticket:?}");
        }
        log::debug!("fetch {ticket:?} issued for {kind:?}");
        ticket
    }

    /// Claim a response. Returns what the request was for, or `None` when
    /// the ticket is stale.
    pub fn accept(&mut self, ticket: FetchTicket) -> Option<FetchKind> {
        match self.in_flight {
            Some((current, kind)) if current == ticket => {
                self.in_flight = None;
                Some(kind)
            }
            _ => {
                log::warn!("dropping response for stale fetch {ticket:?}");
                None
            }
        }
    }

    /// Kind of the request currently outstanding.
    pub fn in_flight(&self) -> Option<FetchKind> {
        self.in_flight.map(|(_, kind)| kind)
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    /// Forget the outstanding request; its response will be dropped.
    pub fn abandon(&mut self) {
        if let Some((ticket, _)) = self.in_flight.take() {
            log::debug!("fetch {ticket:?} abandoned");
        }
    }
}

/// The first page request of an ajax grid. It asks for the column model.
pub fn initial_request(options: &GridOptions) -> PageRequest {
    PageRequest::new(options.page_size, 0).with_column_model(true)
}

/// Request for the page beyond `edge` of the loaded window, if there is one.
pub fn edge_request(edge: Edge, data: &DataSource, options: &GridOptions) -> Option<PageRequest> {
    match edge {
        Edge::South if data.has_more_south() => Some(PageRequest::new(
            options.page_size,
            data.south_offset(),
        )),
        Edge::North if data.has_more_north() => {
            let (offset, size) = data.north_page(options.page_size);
            (size > 0).then(|| PageRequest::new(size, offset))
        }
        _ => None,
    }
}
