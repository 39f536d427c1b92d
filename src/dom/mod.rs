//! Page segmentation module
//!
//! This module turns an arbitrary HTML document into candidate regions for
//! independent conversion. It includes:
//! - Section: One labeled region with its serialized markup
//! - SectionSet: Ordered, capped, de-duplicated collection of sections
//! - Segmenter: Tiered segmentation (semantic tags, headings, whole page)
//! - ScrapedPage: Title and asset extraction for a fetched document

pub mod labels;
pub mod page;
pub mod section;
pub mod section_set;
pub mod segmenter;

pub use labels::infer_label;
pub use page::ScrapedPage;
pub use section::{Section, SectionRequest};
pub use section_set::{Admission, SectionSet};
pub use segmenter::{MAX_SECTIONS, Segmenter, SegmenterConfig, segment};
