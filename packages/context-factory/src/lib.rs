#![doc = include_str!("../README.md")]
#![doc(html_logo_url = "https://avatars.githubusercontent.com/u/79236386")]
#![doc(html_favicon_url = "https://avatars.githubusercontent.com/u/79236386")]
#![warn(missing_docs)]
#![allow(clippy::type_complexity)]

mod accessor;
pub use accessor::*;

mod error;
pub use error::*;

mod factory;
pub use factory::*;

mod provider;
pub use provider::*;

mod slot;
pub use slot::{Slot, SlotId};
