//! Overlapping window generation
//!
//! For every pivot the generator decides which items are hidden, which are
//! revealed as context and which stay placeholders. Ranges are computed on
//! the pivot timeline first and only then clamped to the item bounds, so a
//! window that runs past either end of the list silently shrinks. With
//! `ramp` enabled this is what makes the hidden window grow in at the start
//! of the list and shrink out at its end.

use std::ops::Range;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::cloze::format_range;
use crate::error::{OverlapError, Result};
use crate::item::{Field, Item, Slot};
use crate::options::{ContextSize, WindowSizes};
use crate::trace_time;

/// Upper bound on card slots a single generation call will pad to
pub const MAX_SLOT_LIMIT: usize = 1000;

/// Window sizes plus the boundary flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WindowConfig {
    pub sizes: WindowSizes,
    /// Never reveal context after the hidden window on the first card
    pub no_context_first: bool,
    /// Never reveal context before the hidden window on the last card
    pub no_context_last: bool,
    /// Grow and shrink the hidden window at the list ends instead of
    /// starting with a full window
    pub ramp: bool,
}

impl WindowConfig {
    pub fn new(sizes: WindowSizes) -> Self {
        Self {
            sizes,
            ..Default::default()
        }
    }

    /// First pivot and total pivot count for a list of `len` items.
    ///
    /// `None` when the ramped pivot count does not fit in a `usize`.
    pub fn pivot_range(&self, len: usize) -> Option<PivotRange> {
        let prompt = self.sizes.prompt;
        if self.ramp {
            let total = len.checked_add(prompt)?.saturating_sub(1);
            Some(PivotRange { first: 1, total })
        } else {
            Some(PivotRange {
                first: prompt,
                total: len,
            })
        }
    }
}

/// The pivots `first..=total` for one generation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PivotRange {
    pub first: usize,
    pub total: usize,
}

impl PivotRange {
    pub fn pivots(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.total
    }

    /// Number of cards generated
    pub fn count(&self) -> usize {
        self.pivots().count()
    }

    /// Per-pivot windows on the timeline, in pivot order
    pub fn windows<'a>(
        &'a self,
        config: &'a WindowConfig,
    ) -> impl Iterator<Item = PivotWindow> + 'a {
        self.pivots()
            .map(move |pivot| PivotWindow::compute(pivot, self, config))
    }
}

/// Ranges claimed by one pivot, on the pivot timeline (not yet clamped)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PivotWindow {
    pub pivot: usize,
    pub ordinal: usize,
    pub hidden: Range<usize>,
    pub before: Option<Range<usize>>,
    pub after: Option<Range<usize>>,
}

impl PivotWindow {
    fn compute(pivot: usize, range: &PivotRange, config: &WindowConfig) -> Self {
        let hidden_start = hidden_start(pivot, config.sizes.prompt, range.total);
        let before = before_start(pivot, hidden_start, range, config).map(|s| s..hidden_start);
        let after = after_end(pivot, range, config).map(|e| pivot..e);

        Self {
            pivot,
            ordinal: pivot - range.first + 1,
            hidden: hidden_start..pivot,
            before,
            after,
        }
    }

    /// Fill a field for `items` according to this window
    fn build_field(&self, items: &[Item]) -> Field {
        let len = items.len();
        let mut field = Field::placeholders(len);

        for range in [&self.before, &self.after].into_iter().flatten() {
            let range = clamp(range, len);
            for (slot, item) in field.slots[range.clone()].iter_mut().zip(&items[range]) {
                *slot = Slot::Context { item: item.clone() };
            }
        }

        let hidden = clamp(&self.hidden, len);
        let clozed = format_range(&items[hidden.clone()], self.ordinal);
        for (slot, item) in field.slots[hidden].iter_mut().zip(clozed) {
            *slot = Slot::Cloze {
                ordinal: self.ordinal,
                item,
            };
        }

        field
    }
}

/// Cards produced by one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationResult {
    /// One field per pivot, padded with `None` up to the slot count
    pub fields: Vec<Option<Field>>,
    /// Every item hidden under an ordinal past the last slot
    pub full: Field,
    pub pivots: PivotRange,
}

impl GenerationResult {
    /// Generated (non-padding) fields
    pub fn cards(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().flatten()
    }
}

/// Reject slot counts that cannot be padded to or that leave no room for
/// the full field's ordinal
pub fn check_max_slots(max_slots: usize) -> Result<()> {
    if max_slots == 0 || max_slots > MAX_SLOT_LIMIT {
        return Err(OverlapError::InvalidSlotCount {
            requested: max_slots,
            limit: MAX_SLOT_LIMIT,
        });
    }
    Ok(())
}

/// Generate one field per pivot plus the full field.
///
/// Fails with `OutOfRange` when more pivots are needed than `max_slots`,
/// with `InvalidOptions` for a zero prompt size and with `InvalidSlotCount`
/// when `max_slots` is outside `1..=MAX_SLOT_LIMIT`.
#[tracing::instrument(skip(items, config), fields(items = items.len(), sizes = %config.sizes, ramp = config.ramp))]
pub fn generate(items: &[Item], config: &WindowConfig, max_slots: usize) -> Result<GenerationResult> {
    let start = Instant::now();

    if config.sizes.prompt == 0 {
        return Err(OverlapError::invalid_options(config.sizes.to_string()));
    }
    check_max_slots(max_slots)?;

    let range = config
        .pivot_range(items.len())
        .ok_or(OverlapError::OutOfRange {
            required: usize::MAX,
            available: max_slots,
        })?;
    if range.total > max_slots {
        return Err(OverlapError::OutOfRange {
            required: range.total,
            available: max_slots,
        });
    }
    debug!(first = range.first, total = range.total, "pivot range");

    let mut fields: Vec<Option<Field>> = range
        .windows(config)
        .map(|window| {
            trace!(
                pivot = window.pivot,
                ordinal = window.ordinal,
                hidden = ?window.hidden,
                before = ?window.before,
                after = ?window.after,
                "window"
            );
            Some(window.build_field(items))
        })
        .collect();
    fields.resize(max_slots, None);

    let full_ordinal = max_slots + 1;
    let full = Field {
        slots: format_range(items, full_ordinal)
            .into_iter()
            .map(|item| Slot::Cloze {
                ordinal: full_ordinal,
                item,
            })
            .collect(),
    };

    trace_time!(start, "generate");

    Ok(GenerationResult {
        fields,
        full,
        pivots: range,
    })
}

/// Start of the hidden window, looking back from the pivot
fn hidden_start(pivot: usize, prompt: usize, total: usize) -> usize {
    if pivot < prompt || pivot > total {
        0
    } else {
        pivot - prompt
    }
}

/// Start of the context before the hidden window, if any is revealed
fn before_start(
    pivot: usize,
    hidden_start: usize,
    range: &PivotRange,
    config: &WindowConfig,
) -> Option<usize> {
    let size = config.sizes.before;
    if size.is_zero() || hidden_start < 1 || (config.no_context_last && pivot == range.total) {
        return None;
    }
    match size {
        ContextSize::Limit(n) if n <= hidden_start => Some(hidden_start - n),
        _ => Some(0),
    }
}

/// End of the context after the hidden window, if any is revealed
fn after_end(pivot: usize, range: &PivotRange, config: &WindowConfig) -> Option<usize> {
    let size = config.sizes.after;
    let left = range.total - pivot;
    if size.is_zero() || left < 1 || (config.no_context_first && pivot == range.first) {
        return None;
    }
    match size {
        ContextSize::Limit(n) if n <= left => Some(pivot + n),
        _ => Some(range.total),
    }
}

/// Truncate a timeline range to the item bounds
fn clamp(range: &Range<usize>, len: usize) -> Range<usize> {
    range.start.min(len)..range.end.min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::leaves;
    use crate::options::normalize_options;

    const MAX: usize = 20;

    fn config(before: ContextSize, prompt: usize, after: ContextSize) -> WindowConfig {
        WindowConfig::new(WindowSizes::new(before, prompt, after))
    }

    fn limits(before: usize, prompt: usize, after: usize) -> WindowConfig {
        config(ContextSize::Limit(before), prompt, ContextSize::Limit(after))
    }

    /// Render a field as compact strings for readable assertions
    fn render(field: &Field) -> Vec<String> {
        field
            .rendered()
            .iter()
            .map(|item| item.flat_text())
            .collect()
    }

    #[test]
    fn test_window_with_context_on_both_sides() {
        let items = leaves(["a", "b", "c", "d", "e"]);
        let result = generate(&items, &limits(1, 2, 1), MAX).unwrap();

        assert_eq!(result.pivots, PivotRange { first: 2, total: 5 });
        assert_eq!(result.cards().count(), 4);
        let cards: Vec<Vec<String>> = result.cards().map(render).collect();
        assert_eq!(cards[0], ["{{c1::a}}", "{{c1::b}}", "c", "...", "..."]);
        assert_eq!(cards[1], ["a", "{{c2::b}}", "{{c2::c}}", "d", "..."]);
        assert_eq!(cards[2], ["...", "b", "{{c3::c}}", "{{c3::d}}", "e"]);
        assert_eq!(cards[3], ["...", "...", "c", "{{c4::d}}", "{{c4::e}}"]);
    }

    #[test]
    fn test_single_item_windows_without_context() {
        let items = leaves(["a", "b", "c"]);
        let result = generate(&items, &limits(0, 1, 0), MAX).unwrap();

        let cards: Vec<Vec<String>> = result.cards().map(render).collect();
        assert_eq!(
            cards,
            vec![
                vec!["{{c1::a}}", "...", "..."],
                vec!["...", "{{c2::b}}", "..."],
                vec!["...", "...", "{{c3::c}}"],
            ]
        );
        for card in result.cards() {
            assert_eq!(card.hidden_positions().len(), 1);
            assert!(card.context_positions().is_empty());
        }
    }

    #[test]
    fn test_out_of_range() {
        let items = leaves(["a", "b", "c", "d", "e", "f"]);
        let result = generate(&items, &limits(1, 6, 0), 3);
        assert!(matches!(
            result,
            Err(OverlapError::OutOfRange {
                required: 6,
                available: 3
            })
        ));
    }

    #[test]
    fn test_exactly_max_slots_is_allowed() {
        let items = leaves(["a", "b", "c"]);
        let result = generate(&items, &limits(1, 1, 0), 3).unwrap();
        assert_eq!(result.fields.len(), 3);
        assert!(result.fields.iter().all(Option::is_some));
    }

    #[test]
    fn test_padding_fills_to_max_slots() {
        let items = leaves(["a", "b", "c", "d"]);
        let result = generate(&items, &limits(1, 1, 0), MAX).unwrap();
        assert_eq!(result.fields.len(), MAX);
        assert_eq!(result.cards().count(), 4);
        assert!(result.fields[4..].iter().all(Option::is_none));
    }

    #[test]
    fn test_full_field_uses_ordinal_past_max() {
        let items = vec![
            Item::leaf("a"),
            Item::Nested(vec![Item::leaf("b"), Item::leaf("c")]),
        ];
        let result = generate(&items, &limits(1, 1, 0), MAX).unwrap();
        assert_eq!(result.full.len(), 2);
        assert_eq!(result.full.ordinal(), Some(MAX + 1));
        assert_eq!(
            result.full.rendered(),
            vec![
                Item::leaf("{{c21::a}}"),
                Item::Nested(vec![Item::leaf("{{c21::b}}"), Item::leaf("{{c21::c}}")]),
            ]
        );
    }

    #[test]
    fn test_ordinals_start_at_one_and_increase() {
        let items = leaves(["a", "b", "c", "d", "e", "f"]);
        for cfg in [limits(1, 1, 0), limits(2, 3, 1), {
            let mut c = limits(1, 2, 1);
            c.ramp = true;
            c
        }] {
            let result = generate(&items, &cfg, MAX).unwrap();
            let ordinals: Vec<usize> = result.cards().filter_map(Field::ordinal).collect();
            let expected: Vec<usize> = (1..=result.pivots.count()).collect();
            assert_eq!(ordinals, expected);
            assert!(ordinals.iter().all(|o| *o != MAX + 1));
        }
    }

    #[test]
    fn test_every_field_matches_item_count() {
        let items = leaves(["a", "b", "c", "d", "e", "f", "g"]);
        for prompt in 1..=4 {
            for ramp in [false, true] {
                let mut cfg = config(ContextSize::Unbounded, prompt, ContextSize::Limit(2));
                cfg.ramp = ramp;
                let result = generate(&items, &cfg, MAX).unwrap();
                assert!(result.cards().all(|f| f.len() == items.len()));
            }
        }
    }

    #[test]
    fn test_windows_never_overlap() {
        let cfg = config(ContextSize::Unbounded, 3, ContextSize::Unbounded);
        for ramp in [false, true] {
            let cfg = WindowConfig { ramp, ..cfg };
            let range = cfg.pivot_range(8).unwrap();
            for window in range.windows(&cfg) {
                if let Some(before) = &window.before {
                    assert!(before.end <= window.hidden.start);
                }
                if let Some(after) = &window.after {
                    assert!(window.hidden.end <= after.start);
                }
            }
        }
    }

    #[test]
    fn test_zero_before_never_reveals_preceding_items() {
        let items = leaves(["a", "b", "c", "d", "e", "f"]);
        let cfg = config(ContextSize::Limit(0), 2, ContextSize::Unbounded);
        let result = generate(&items, &cfg, MAX).unwrap();
        for card in result.cards() {
            let first_hidden = card.hidden_positions()[0];
            assert!(card.context_positions().iter().all(|p| *p > first_hidden));
        }
    }

    #[test]
    fn test_unbounded_context_reveals_everything() {
        let items = leaves(["a", "b", "c", "d"]);
        let cfg = config(ContextSize::Unbounded, 1, ContextSize::Unbounded);
        let result = generate(&items, &cfg, MAX).unwrap();
        let cards: Vec<Vec<String>> = result.cards().map(render).collect();
        assert_eq!(cards[0], ["{{c1::a}}", "b", "c", "d"]);
        assert_eq!(cards[2], ["a", "b", "{{c3::c}}", "d"]);
        assert_eq!(cards[3], ["a", "b", "c", "{{c4::d}}"]);
    }

    #[test]
    fn test_ramp_grows_and_shrinks_hidden_window() {
        let items = leaves(["a", "b", "c", "d"]);
        let mut cfg = limits(0, 2, 0);
        cfg.ramp = true;
        let result = generate(&items, &cfg, MAX).unwrap();

        assert_eq!(result.pivots, PivotRange { first: 1, total: 5 });
        let cards: Vec<Vec<String>> = result.cards().map(render).collect();
        assert_eq!(
            cards,
            vec![
                vec!["{{c1::a}}", "...", "...", "..."],
                vec!["{{c2::a}}", "{{c2::b}}", "...", "..."],
                vec!["...", "{{c3::b}}", "{{c3::c}}", "..."],
                vec!["...", "...", "{{c4::c}}", "{{c4::d}}"],
                vec!["...", "...", "...", "{{c5::d}}"],
            ]
        );
    }

    #[test]
    fn test_ramp_context_is_clamped_to_items() {
        let items = leaves(["a", "b", "c"]);
        let mut cfg = limits(1, 2, 2);
        cfg.ramp = true;
        let result = generate(&items, &cfg, MAX).unwrap();
        let cards: Vec<Vec<String>> = result.cards().map(render).collect();
        // pivot 1: hidden [0,1), after [1,3)
        assert_eq!(cards[0], ["{{c1::a}}", "b", "c"]);
        // pivot 3: before [0,1), hidden [1,3), after [3,4) runs off the end
        assert_eq!(cards[2], ["a", "{{c3::b}}", "{{c3::c}}"]);
        // pivot 4: hidden [2,4) shrinks to the last item
        assert_eq!(cards[3], ["...", "b", "{{c4::c}}"]);
    }

    #[test]
    fn test_no_context_first_suppresses_after_on_first_pivot() {
        let items = leaves(["a", "b", "c", "d"]);
        let mut cfg = limits(1, 1, 1);
        cfg.no_context_first = true;
        let result = generate(&items, &cfg, MAX).unwrap();
        let cards: Vec<Vec<String>> = result.cards().map(render).collect();
        assert_eq!(cards[0], ["{{c1::a}}", "...", "...", "..."]);
        assert_eq!(cards[1], ["a", "{{c2::b}}", "c", "..."]);
    }

    #[test]
    fn test_no_context_last_suppresses_before_on_last_pivot() {
        let items = leaves(["a", "b", "c", "d"]);
        let mut cfg = limits(1, 1, 1);
        cfg.no_context_last = true;
        let result = generate(&items, &cfg, MAX).unwrap();
        let cards: Vec<Vec<String>> = result.cards().map(render).collect();
        assert_eq!(cards[2], ["...", "b", "{{c3::c}}", "d"]);
        assert_eq!(cards[3], ["...", "...", "...", "{{c4::d}}"]);
    }

    #[test]
    fn test_suppression_also_applies_to_unbounded_context() {
        let items = leaves(["a", "b", "c"]);
        let mut cfg = config(ContextSize::Unbounded, 1, ContextSize::Unbounded);
        cfg.no_context_first = true;
        cfg.no_context_last = true;
        let result = generate(&items, &cfg, MAX).unwrap();
        let cards: Vec<Vec<String>> = result.cards().map(render).collect();
        assert_eq!(cards[0], ["{{c1::a}}", "...", "..."]);
        assert_eq!(cards[2], ["...", "...", "{{c3::c}}"]);
    }

    #[test]
    fn test_nested_items_are_revealed_and_hidden_whole() {
        let items = vec![
            Item::leaf("a"),
            Item::Nested(vec![Item::leaf("b1"), Item::leaf("b2")]),
            Item::leaf("c"),
        ];
        let result = generate(&items, &limits(1, 1, 0), MAX).unwrap();
        let second = result.fields[1].as_ref().unwrap();
        assert_eq!(
            second.slots[1],
            Slot::Cloze {
                ordinal: 2,
                item: Item::Nested(vec![Item::leaf("{{c2::b1}}"), Item::leaf("{{c2::b2}}")]),
            }
        );
        let third = result.fields[2].as_ref().unwrap();
        assert_eq!(
            third.slots[1],
            Slot::Context {
                item: items[1].clone()
            }
        );
    }

    #[test]
    fn test_tiny_inputs_do_not_panic() {
        for len in 0..3 {
            let items: Vec<Item> = (0..len).map(|i| Item::leaf(i.to_string())).collect();
            for prompt in 1..4 {
                for ramp in [false, true] {
                    let mut cfg = config(ContextSize::Unbounded, prompt, ContextSize::Unbounded);
                    cfg.ramp = ramp;
                    let result = generate(&items, &cfg, MAX).unwrap();
                    assert_eq!(result.fields.len(), MAX);
                    assert_eq!(result.cards().count(), result.pivots.count());
                    assert!(result.cards().all(|f| f.len() == len));
                }
            }
        }
    }

    #[test]
    fn test_prompt_larger_than_list_generates_nothing() {
        let items = leaves(["a", "b"]);
        let result = generate(&items, &limits(1, 3, 0), MAX).unwrap();
        assert_eq!(result.cards().count(), 0);
        assert_eq!(result.full.len(), 2);
    }

    #[test]
    fn test_zero_prompt_is_rejected() {
        let items = leaves(["a", "b", "c"]);
        let result = generate(&items, &limits(1, 0, 0), MAX);
        assert!(matches!(result, Err(OverlapError::InvalidOptions { .. })));
    }

    #[test]
    fn test_empty_list_still_counts_ramped_card() {
        let mut cfg = limits(1, 2, 0);
        cfg.ramp = true;
        let result = generate(&[], &cfg, MAX).unwrap();
        assert_eq!(result.pivots, PivotRange { first: 1, total: 1 });
        assert_eq!(result.cards().count(), 1);
        assert!(result.fields[0].as_ref().is_some_and(Field::is_empty));
        assert!(result.fields[1].is_none());
    }

    #[test]
    fn test_huge_ramped_prompt_is_out_of_range() {
        let options = normalize_options("18446744073709551615", &WindowSizes::default()).unwrap();
        let mut cfg = WindowConfig::new(options.sizes);
        cfg.ramp = true;
        assert_eq!(cfg.pivot_range(3), None);
        let result = generate(&leaves(["a", "b", "c"]), &cfg, MAX);
        assert!(matches!(
            result,
            Err(OverlapError::OutOfRange { available: MAX, .. })
        ));
    }

    #[test]
    fn test_huge_prompt_without_ramp_generates_nothing() {
        let cfg = limits(1, usize::MAX, 0);
        let result = generate(&leaves(["a", "b", "c"]), &cfg, MAX).unwrap();
        assert_eq!(result.cards().count(), 0);
    }

    #[test]
    fn test_max_slots_is_bounded() {
        let items = leaves(["a", "b", "c"]);
        let cfg = limits(1, 1, 0);
        for max_slots in [0, MAX_SLOT_LIMIT + 1, usize::MAX] {
            assert!(matches!(
                generate(&items, &cfg, max_slots),
                Err(OverlapError::InvalidSlotCount { requested, limit: MAX_SLOT_LIMIT })
                    if requested == max_slots
            ));
        }
        let result = generate(&items, &cfg, MAX_SLOT_LIMIT).unwrap();
        assert_eq!(result.full.ordinal(), Some(MAX_SLOT_LIMIT + 1));
    }
}
