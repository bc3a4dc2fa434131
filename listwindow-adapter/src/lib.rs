//! Flat and sectioned list facades over [`listwindow`].
//!
//! Both adapters flatten their structure (list header and footer, section headers and
//! footers, item and section separators) into one contiguous virtual index space, then let a
//! [`listwindow::VirtualizedList`] decide which slots to mount. Rendering maps the mounted
//! slots back to typed [`ListChild`] values that borrow the caller's data.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod child;
mod flat_list;
mod flatten;
mod props;
mod section_list;
mod source;

#[cfg(test)]
mod tests;

pub use child::{ListChild, SlotInfo};
pub use flat_list::{FlatList, FlatListProps};
pub use flatten::{FlatIndexSpace, FlatSlot, SectionDecorations, SectionIndexSpace, SectionSlot};
pub use props::{
    DEFAULT_HEADER_LENGTH, DEFAULT_SECTION_HEADER_LENGTH, DEFAULT_SEPARATOR_LENGTH, ItemKeyOf,
    ItemLengthOf, ListCallbacks, SectionLengthFn, SectionPart, SlotLengths,
};
pub use section_list::{ScrollToLocationParams, Section, SectionList, SectionListProps};
pub use source::DataSource;

