//! Core-Domänentypen: Visible Set und Sichtbarkeits-Session.

pub mod session;
pub mod visible_set;

pub use session::{
    ActiveModel, LoadOutcome, LoadTicket, SessionPhase, SessionSettings, ViewerError,
    ViewerSession, SUBSET_CUSTOM_ID,
};
pub use visible_set::VisibleSet;
