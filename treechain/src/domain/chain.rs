//! Chain of request handlers stored by position.
//!
//! A [`Chain`] owns its handlers; successor links are [`HandlerId`]s into the
//! same chain and never own anything. Pushing a request always yields an
//! [`Outcome`], so "nobody took it" is observable instead of silently dropped.

use std::fmt;

use tracing::{debug, instrument, trace};

use crate::domain::error::{ChainError, ChainResult};

/// Position of a handler inside its [`Chain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(usize);

impl HandlerId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler#{}", self.0)
    }
}

/// Predicate a handler applies to decide whether it takes a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    /// Accepts requests in the half-open range `start..end`.
    Range { start: i64, end: i64 },
}

impl HandlerKind {
    /// The stock handler: accepts `0..10`.
    pub fn concrete() -> Self {
        HandlerKind::Range { start: 0, end: 10 }
    }

    pub fn accepts(&self, request: i64) -> bool {
        match *self {
            HandlerKind::Range { start, end } => (start..end).contains(&request),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    name: String,
    kind: HandlerKind,
    successor: Option<HandlerId>,
}

impl Handler {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    pub fn successor(&self) -> Option<HandlerId> {
        self.successor
    }
}

/// Result of pushing one request into a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// `by` accepted the request after `hops` forwards.
    Handled {
        request: i64,
        by: HandlerId,
        handler: String,
        hops: usize,
    },
    /// No handler accepted; `visited` handlers were consulted.
    Unhandled { request: i64, visited: usize },
}

impl Outcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, Outcome::Handled { .. })
    }

    pub fn handled_by(&self) -> Option<HandlerId> {
        match self {
            Outcome::Handled { by, .. } => Some(*by),
            Outcome::Unhandled { .. } => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Handled {
                request, handler, ..
            } => write!(f, "{request} handled by {handler}"),
            Outcome::Unhandled { request, visited } => {
                let noun = if *visited == 1 { "handler" } else { "handlers" };
                write!(f, "{request} not handled (passed through {visited} {noun})")
            }
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Chain {
    handlers: Vec<Handler>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "trace", skip(self, name), fields(name = %name.as_ref()))]
    pub fn add_handler(&mut self, name: impl AsRef<str>, kind: HandlerKind) -> HandlerId {
        self.handlers.push(Handler {
            name: name.as_ref().to_string(),
            kind,
            successor: None,
        });
        HandlerId(self.handlers.len() - 1)
    }

    pub fn get(&self, id: HandlerId) -> Option<&Handler> {
        self.handlers.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn handler(&self, id: HandlerId) -> ChainResult<&Handler> {
        self.get(id).ok_or(ChainError::UnknownHandler(id))
    }

    pub fn successor(&self, id: HandlerId) -> ChainResult<Option<HandlerId>> {
        Ok(self.handler(id)?.successor)
    }

    /// Points `id` at `next`, replacing any previous successor.
    ///
    /// Rejected if `id` is already reachable from `next`.
    #[instrument(level = "debug", skip(self))]
    pub fn set_successor(&mut self, id: HandlerId, next: HandlerId) -> ChainResult<()> {
        self.handler(id)?;
        self.handler(next)?;

        let mut cursor = Some(next);
        while let Some(current) = cursor {
            if current == id {
                return Err(ChainError::CycleDetected {
                    handler: id,
                    successor: next,
                });
            }
            cursor = self.handlers[current.0].successor;
        }

        self.handlers[id.0].successor = Some(next);
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn clear_successor(&mut self, id: HandlerId) -> ChainResult<()> {
        self.handler(id)?;
        self.handlers[id.0].successor = None;
        Ok(())
    }

    /// Links `ids` in order: each one becomes the successor of the one before.
    pub fn link(&mut self, ids: &[HandlerId]) -> ChainResult<()> {
        for pair in ids.windows(2) {
            self.set_successor(pair[0], pair[1])?;
        }
        Ok(())
    }

    /// Offers `request` to `head` and forwards it unchanged down the chain
    /// until a handler accepts it or the chain ends.
    #[instrument(level = "debug", skip(self))]
    pub fn handle_request(&self, head: HandlerId, request: i64) -> ChainResult<Outcome> {
        let mut cursor = Some(head);
        let mut visited = 0;

        while let Some(id) = cursor {
            let handler = self.handler(id)?;
            visited += 1;
            if handler.kind.accepts(request) {
                debug!(handler = %handler.name, "request handled");
                return Ok(Outcome::Handled {
                    request,
                    by: id,
                    handler: handler.name.clone(),
                    hops: visited - 1,
                });
            }
            trace!(handler = %handler.name, "forwarding");
            cursor = handler.successor;
        }

        debug!(visited, "request not handled");
        Ok(Outcome::Unhandled { request, visited })
    }
}
