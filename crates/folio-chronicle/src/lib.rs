//! folio-chronicle - Layout roles of a chronicle page
//!
//! A chronicle page carries up to four parts: the political history, the
//! ecclesiastical and secular columns, and footnotes. Given the regions the
//! cutter found, [`classify`] assigns each one a [`Role`] from the number
//! of regions and their width relative to the page. Pages that match no
//! known layout are [`Role::Unchecked`] and left for manual review.
//!
//! [`rename_regions`] and [`mark_unchecked`] record the outcome on disk:
//! region files gain a `_<role>` suffix and pages needing review have their
//! region directory renamed with an `_unchecked` suffix. Both are
//! idempotent.

pub mod classify;
mod error;
pub mod rename;
pub mod role;

pub use classify::{PageClassification, WIDE_RATIO, classify, classify_widths};
pub use error::{ChronicleError, ChronicleResult};
pub use rename::{
    UNCHECKED_SUFFIX, is_unchecked_dir, mark_unchecked, rename_regions, rename_with_role,
    role_file_name,
};
pub use role::Role;
