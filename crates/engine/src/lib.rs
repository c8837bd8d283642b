//! Configuration rules: availability, pricing, and the ordered selection flow.
//!
//! Everything here is deterministic domain logic (no IO). Catalog retrieval and
//! rendering are collaborators that call into this crate.

pub mod availability;
pub mod display;
pub mod export;
pub mod pricing;
pub mod selection;
pub mod session;

pub use availability::{Availability, is_selectable};
pub use display::{OptionView, option_views};
pub use export::{ConfigurationRecord, serialize_configuration};
pub use pricing::{Pricing, price, resolve_option_amount};
pub use selection::{Selection, SelectionStage};
pub use session::{LoadOutcome, LoadState, LoadTicket, Session, default_categories};
