//! Candidate entries and the list model behind the owner-drawn language
//! combos.
//!
//! The native combo neither stores nor paints entries itself; it holds an
//! index into a [`LangList`] arena and asks for a paint plan when an item
//! needs drawing. Entries are immutable once inserted and owned by the list
//! until `release` frees their slot.

use std::cmp::Ordering;

use crate::model::constants::*;
use crate::{dark, Rgb};

/// One selectable language option: a file reference paired with the
/// human-readable description extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEntry {
    /// Resource file name relative to the scan directory; empty for the
    /// built-in default entry.
    pub file_name: String,
    /// Name shown right-aligned: the file name, or the host executable's
    /// name for the default entry.
    pub display_name: String,
    /// Localized language name; empty when the resource was unreadable.
    pub description: String,
}

impl CandidateEntry {
    pub fn new(file_name: String, display_name: String, description: String) -> Self {
        Self {
            file_name,
            display_name,
            description,
        }
    }

    /// True for the synthetic "use built-in resources" entry.
    pub fn is_builtin(&self) -> bool {
        self.file_name.is_empty()
    }

    /// Sort order used by the list: case-insensitive comparison of the
    /// descriptions. Absent entries compare equal, matching the native
    /// compare contract for items without data.
    pub fn cmp_entries(a: Option<&CandidateEntry>, b: Option<&CandidateEntry>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => cmp_descriptions(a, b),
            _ => Ordering::Equal,
        }
    }
}

fn cmp_descriptions(a: &CandidateEntry, b: &CandidateEntry) -> Ordering {
    a.description
        .to_lowercase()
        .cmp(&b.description.to_lowercase())
}

/// Arena-backed list of candidate entries with a tracked selection.
///
/// Slot indices are stable for the lifetime of an entry (they are what the
/// combo stores as item data); display order is maintained separately,
/// sorted by description.
#[derive(Debug, Default)]
pub struct LangList {
    slots: Vec<Option<CandidateEntry>>,
    order: Vec<usize>,
    selection: Option<usize>,
}

impl LangList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, keeping the display order sorted by description.
    /// Returns the entry's slot index.
    pub fn insert(&mut self, entry: CandidateEntry) -> usize {
        let slot = self.slots.len();
        let pos = self.order.partition_point(|&s| {
            CandidateEntry::cmp_entries(self.slots[s].as_ref(), Some(&entry)) != Ordering::Greater
        });
        self.slots.push(Some(entry));
        self.order.insert(pos, slot);
        slot
    }

    /// Free the entry in `slot`. Clears the selection if it pointed there.
    pub fn release(&mut self, slot: usize) {
        if slot >= self.slots.len() || self.slots[slot].is_none() {
            return;
        }
        self.slots[slot] = None;
        self.order.retain(|&s| s != slot);
        if self.selection == Some(slot) {
            self.selection = None;
        }
    }

    /// Drop all entries and the selection.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.order.clear();
        self.selection = None;
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&CandidateEntry> {
        self.slots.get(slot).and_then(|e| e.as_ref())
    }

    /// Mark the entry in `slot` as selected. Ignored for freed slots.
    pub fn set_selection(&mut self, slot: usize) -> bool {
        if self.get(slot).is_some() {
            self.selection = Some(slot);
            true
        } else {
            false
        }
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// File name of the selected entry, or an empty string when nothing is
    /// selected. Mirrors reading the current combo selection.
    pub fn selected_file_name(&self) -> String {
        self.selection
            .and_then(|slot| self.get(slot))
            .map(|e| e.file_name.clone())
            .unwrap_or_default()
    }

    /// Entries in display order, with their slot indices.
    pub fn iter_ordered(&self) -> impl Iterator<Item = (usize, &CandidateEntry)> {
        self.order
            .iter()
            .filter_map(move |&slot| self.get(slot).map(|e| (slot, e)))
    }

    /// Display position of a slot, if it is live.
    pub fn position_of(&self, slot: usize) -> Option<usize> {
        self.order.iter().position(|&s| s == slot)
    }

    /// Slot index at a display position.
    pub fn slot_at(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }
}

// === Owner-draw paint contract ===

/// Height of every list item for a given UI font line height.
pub fn item_height(font_line_height: i32) -> i32 {
    font_line_height + ITEM_HEIGHT_PAD
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Symbolic colors resolved against a [`Palette`] at draw time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintRole {
    Window,
    Highlight,
    WindowText,
    HighlightText,
    DimText,
}

/// One piece of text inside an item rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub align: Align,
    pub color: PaintRole,
}

/// Everything needed to paint one item: background fill plus two text runs
/// composed transparently over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPaint<'a> {
    pub background: PaintRole,
    pub runs: [TextRun<'a>; 2],
}

/// Build the paint plan for an entry: description left-aligned, display
/// name right-aligned and de-emphasized unless the item is selected.
pub fn paint_plan(entry: &CandidateEntry, selected: bool) -> ItemPaint<'_> {
    let text_color = if selected {
        PaintRole::HighlightText
    } else {
        PaintRole::WindowText
    };
    let name_color = if selected {
        PaintRole::HighlightText
    } else {
        PaintRole::DimText
    };
    ItemPaint {
        background: if selected {
            PaintRole::Highlight
        } else {
            PaintRole::Window
        },
        runs: [
            TextRun {
                text: &entry.description,
                align: Align::Left,
                color: text_color,
            },
            TextRun {
                text: &entry.display_name,
                align: Align::Right,
                color: name_color,
            },
        ],
    }
}

/// Concrete colors for the paint roles. The Windows layer fills this from
/// the system colors; everywhere else the fallback palette applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub window: Rgb,
    pub highlight: Rgb,
    pub window_text: Rgb,
    pub highlight_text: Rgb,
    pub dim_text: Rgb,
}

impl Palette {
    /// Classic system-like colors; the dim text is derived by darkening the
    /// window background.
    pub fn fallback() -> Self {
        let window = (255, 255, 255);
        Self {
            window,
            highlight: (0, 0, 128),
            window_text: (0, 0, 0),
            highlight_text: (255, 255, 255),
            dim_text: dark(window),
        }
    }

    pub fn color(&self, role: PaintRole) -> Rgb {
        match role {
            PaintRole::Window => self.window,
            PaintRole::Highlight => self.highlight,
            PaintRole::WindowText => self.window_text,
            PaintRole::HighlightText => self.highlight_text,
            PaintRole::DimText => self.dim_text,
        }
    }
}
