//! Layout cursor
//!
//! The vertical write position and the current page number are the only
//! mutable layout state. Placement is a pure function of the cursor, the
//! height of the next line and the page geometry, so page break decisions can
//! be tested without a drawing surface.

/// Vertical band that message lines may occupy on every page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// First y position below the header band
    pub content_top: f64,
    /// Lowest y position a line's bottom edge may reach
    pub content_bottom: f64,
}

impl PageGeometry {
    /// Height of the content band
    pub fn content_height(&self) -> f64 {
        self.content_bottom - self.content_top
    }
}

/// Current write position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
    /// Top edge of the next line
    pub y: f64,
    /// 1-based page number
    pub page: u32,
}

/// Where a line goes and the cursor after it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Top edge of the placed line
    pub top: f64,
    /// Cursor after writing the line
    pub cursor: Cursor,
    /// Whether a new page has to be started before writing the line
    pub page_break: bool,
}

impl Cursor {
    /// Cursor at the top of the content band on page 1
    pub fn start(geometry: &PageGeometry) -> Self {
        Self {
            y: geometry.content_top,
            page: 1,
        }
    }

    /// Place a line of `height` below the cursor.
    ///
    /// A line that would cross the content bottom moves to the top of the next
    /// page. On a page with nothing written yet the line is placed anyway, so a
    /// line taller than the whole band cannot break forever.
    pub fn place(self, height: f64, geometry: &PageGeometry) -> Placement {
        let overflows = self.y + height > geometry.content_bottom;
        let page_is_empty = self.y <= geometry.content_top;

        if overflows && !page_is_empty {
            let top = geometry.content_top;
            Placement {
                top,
                cursor: Cursor {
                    y: top + height,
                    page: self.page + 1,
                },
                page_break: true,
            }
        } else {
            Placement {
                top: self.y,
                cursor: Cursor {
                    y: self.y + height,
                    page: self.page,
                },
                page_break: false,
            }
        }
    }

    /// Advance by `height` of blank spacing.
    ///
    /// Spacing never breaks the page: it stops at the content bottom, and the
    /// next line that is actually written triggers the break.
    pub fn advance(self, height: f64, geometry: &PageGeometry) -> Self {
        Self {
            y: (self.y + height).min(geometry.content_bottom.max(self.y)),
            page: self.page,
        }
    }

    /// Move down without writing anything
    pub fn skip(self, gap: f64) -> Self {
        Self {
            y: self.y + gap,
            page: self.page,
        }
    }
}
