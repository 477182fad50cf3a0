//! Container lifecycle.
//!
//! ```text
//! new() ──> Live ──destroy()──> Destroyed
//! ```
//!
//! The transition to `Destroyed` is final. Dropping a live container frees
//! its memory without going through `destroy`.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum State {
    #[default]
    Live,
    Destroyed,
}

impl State {
    /// Fails with [`Error::NullReference`] once destroyed.
    #[inline]
    pub(crate) fn ensure_live(self) -> Result<()> {
        match self {
            State::Live => Ok(()),
            State::Destroyed => Err(Error::NullReference),
        }
    }
}
