//! One module per message variant.

pub mod alias;
pub mod group;
pub mod identify;
pub mod page;
pub mod screen;
pub mod track;

pub use alias::{AliasBuilder, AliasMessage, AliasPayload};
pub use group::{GroupBuilder, GroupMessage, GroupPayload};
pub use identify::{IdentifyBuilder, IdentifyMessage, IdentifyPayload};
pub use page::{PageBuilder, PageMessage, PagePayload};
pub use screen::{ScreenBuilder, ScreenMessage, ScreenPayload};
pub use track::{TrackBuilder, TrackMessage, TrackPayload};
