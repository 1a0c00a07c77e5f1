//! Role assignment by region count and width
//!
//! Each supported region count maps to a rule: a pure function from the
//! width ratios of the regions (region width over page width, in scan
//! order) to one role per region. Counts without a rule abandon the page.

use crate::Role;
use folio_layout::Region;
use log::{debug, warn};
use std::collections::BTreeMap;

/// Width ratio at or above which a region counts as wide
pub const WIDE_RATIO: f64 = 0.5;

type Rule = fn(&[f64]) -> Vec<Role>;

const RULES: [(usize, Rule); 3] = [(4, four_parts), (3, three_parts), (2, two_parts)];

fn is_wide(ratio: f64) -> bool {
    ratio >= WIDE_RATIO
}

/// Header, two columns, footnotes
fn four_parts(ratios: &[f64]) -> Vec<Role> {
    vec![
        Role::Political,
        if is_wide(ratios[1]) { Role::Political } else { Role::Ecclesiastical },
        if is_wide(ratios[2]) { Role::Political } else { Role::Secular },
        Role::Footnotes,
    ]
}

fn three_parts(ratios: &[f64]) -> Vec<Role> {
    vec![
        if is_wide(ratios[0]) { Role::Political } else { Role::Ecclesiastical },
        if is_wide(ratios[1]) { Role::Political } else { Role::Misc },
        Role::Footnotes,
    ]
}

fn two_parts(ratios: &[f64]) -> Vec<Role> {
    vec![
        if is_wide(ratios[0]) { Role::Political } else { Role::Unchecked },
        Role::Footnotes,
    ]
}

/// Roles assigned to the regions of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageClassification {
    roles: Vec<Role>,
    abandoned: bool,
}

impl PageClassification {
    fn abandoned(count: usize) -> Self {
        Self {
            roles: vec![Role::Unchecked; count],
            abandoned: true,
        }
    }

    /// Role of each region, in region order
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Role of the region at `index` (0-based)
    pub fn role(&self, index: usize) -> Option<Role> {
        self.roles.get(index).copied()
    }

    /// Number of regions covered
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// True if the page had no regions
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// True if no rule matched the region count
    pub fn is_abandoned(&self) -> bool {
        self.abandoned
    }

    /// True if the page must be reviewed by hand
    pub fn needs_review(&self) -> bool {
        self.abandoned || self.roles.contains(&Role::Unchecked)
    }

    /// Indices of the regions labelled `role`, in region order
    pub fn regions(&self, role: Role) -> Vec<usize> {
        self.roles
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == role)
            .map(|(i, _)| i)
            .collect()
    }

    /// Region indices grouped by role
    pub fn by_role(&self) -> BTreeMap<Role, Vec<usize>> {
        let mut map: BTreeMap<Role, Vec<usize>> = BTreeMap::new();
        for (i, role) in self.roles.iter().enumerate() {
            map.entry(*role).or_default().push(i);
        }
        map
    }
}

/// Classify the regions of a page of `page_width` pixels
pub fn classify(regions: &[Region], page_width: u32) -> PageClassification {
    let widths: Vec<u32> = regions.iter().map(Region::width).collect();
    classify_widths(&widths, page_width)
}

/// Classify a page from the widths of its regions, in region order
///
/// Never fails: an unsupported region count, or a zero page width, yields
/// an abandoned classification with every region [`Role::Unchecked`].
pub fn classify_widths(widths: &[u32], page_width: u32) -> PageClassification {
    if page_width == 0 {
        warn!("page width is zero, {} region(s) left unchecked", widths.len());
        return PageClassification::abandoned(widths.len());
    }

    let Some((_, rule)) = RULES.iter().find(|(count, _)| *count == widths.len()) else {
        warn!("no layout rule for {} region(s), page left unchecked", widths.len());
        return PageClassification::abandoned(widths.len());
    };

    let ratios: Vec<f64> = widths
        .iter()
        .map(|&w| w as f64 / page_width as f64)
        .collect();
    let roles = rule(&ratios);
    debug!("ratios {:?} -> {:?}", ratios, roles);

    PageClassification {
        roles,
        abandoned: false,
    }
}
