//! The agency's featured work, as shown on the home page carousel.

/// One portfolio entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    /// Display name.
    pub name: &'static str,
    /// Client sector.
    pub sector: &'static str,
    /// One-line summary.
    pub summary: &'static str,
}

/// Featured projects in display order.
pub const PROJECTS: &[Project] = &[
    Project {
        name: "Harbor Freight Co.",
        sector: "Logistics",
        summary: "Shipment tracking portal with live route maps",
    },
    Project {
        name: "Lumen Studio",
        sector: "Photography",
        summary: "Portfolio site with full-bleed galleries",
    },
    Project {
        name: "Atlas Outdoor",
        sector: "Retail",
        summary: "Storefront rebuild, checkout time cut in half",
    },
    Project {
        name: "Fable Books",
        sector: "Publishing",
        summary: "Author pages and a pre-order campaign",
    },
    Project {
        name: "Quill Legal",
        sector: "Professional services",
        summary: "Brand refresh and accessible intake forms",
    },
];
