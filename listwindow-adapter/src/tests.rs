use crate::*;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use listwindow::{
    EndReached, ScrollCommand, ScrollPosition, ScrollTelemetry, ScrollToIndexParams,
};
use std::sync::Arc;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_bool(&mut self) -> bool {
        self.next_u64() & (1 << 32) != 0
    }
}

fn keys<T>(children: &[ListChild<'_, T>]) -> Vec<String> {
    children.iter().map(|c| c.key().to_string()).collect()
}

fn scroll_to(commands: &[ScrollCommand]) -> Vec<f64> {
    commands
        .iter()
        .filter_map(|c| match c {
            ScrollCommand::ScrollTo(ScrollPosition { y, .. }) => Some(*y),
            ScrollCommand::FlashScrollIndicators => None,
        })
        .collect()
}

#[test]
fn flat_space_places_header_and_footer_around_items() {
    let space = FlatIndexSpace::new(3).with_header(true).with_footer(true);
    assert_eq!(space.total_count(), 5);
    assert_eq!(space.classify(0), Some(FlatSlot::Header));
    assert_eq!(space.classify(1), Some(FlatSlot::Item(0)));
    assert_eq!(space.classify(3), Some(FlatSlot::Item(2)));
    assert_eq!(space.classify(4), Some(FlatSlot::Footer));
    assert_eq!(space.classify(5), None);

    assert_eq!(space.key(0), "header");
    assert_eq!(space.key(2), "item_1");
    assert_eq!(space.key(4), "footer");
    assert_eq!(space.key(9), "invalid_9");
}

#[test]
fn flat_space_interleaves_separators() {
    let space = FlatIndexSpace::new(4)
        .with_header(true)
        .with_separators(true);
    assert_eq!(space.total_count(), 8);
    assert_eq!(space.classify(1), Some(FlatSlot::Item(0)));
    assert_eq!(space.classify(2), Some(FlatSlot::Separator(0)));
    assert_eq!(space.classify(3), Some(FlatSlot::Item(1)));
    assert_eq!(space.classify(7), Some(FlatSlot::Item(3)));
    assert_eq!(space.key(6), "separator_2");
    assert_eq!(space.index_of_item(3), Some(7));
    assert_eq!(space.index_of_item(4), None);

    // No trailing separator for an empty list.
    let empty = FlatIndexSpace::new(0)
        .with_header(true)
        .with_footer(true)
        .with_separators(true);
    assert_eq!(empty.total_count(), 2);
    assert_eq!(empty.classify(1), Some(FlatSlot::Footer));
    assert_eq!(FlatIndexSpace::new(0).total_count(), 0);
}

#[test]
fn section_space_with_section_headers() {
    let space = SectionIndexSpace::new(
        [3, 3],
        SectionDecorations {
            section_header: true,
            ..SectionDecorations::default()
        },
    );
    assert_eq!(space.total_count(), 8);
    assert_eq!(space.classify(0), Some(SectionSlot::SectionHeader(0)));
    for i in 0..3 {
        assert_eq!(
            space.classify(1 + i),
            Some(SectionSlot::Item { section: 0, item: i })
        );
        assert_eq!(
            space.classify(5 + i),
            Some(SectionSlot::Item { section: 1, item: i })
        );
    }
    assert_eq!(space.classify(4), Some(SectionSlot::SectionHeader(1)));
    assert_eq!(space.index_of(1, 1), Some(6));
    assert_eq!(space.key(4), "section_header_1");
    assert_eq!(space.key(6), "item_1_1");
}

#[test]
fn section_space_with_every_decoration() {
    let all = SectionDecorations {
        header: true,
        footer: true,
        section_header: true,
        section_footer: true,
        item_separator: true,
        section_separator: true,
    };
    let space = SectionIndexSpace::new([2, 0, 1], all);

    let expected = [
        SectionSlot::Header,
        SectionSlot::SectionHeader(0),
        SectionSlot::Item { section: 0, item: 0 },
        SectionSlot::ItemSeparator { section: 0, item: 0 },
        SectionSlot::Item { section: 0, item: 1 },
        SectionSlot::SectionFooter(0),
        SectionSlot::SectionSeparator(0),
        SectionSlot::SectionHeader(1),
        SectionSlot::SectionFooter(1),
        SectionSlot::SectionSeparator(1),
        SectionSlot::SectionHeader(2),
        SectionSlot::Item { section: 2, item: 0 },
        SectionSlot::SectionFooter(2),
        SectionSlot::Footer,
    ];
    assert_eq!(space.total_count(), expected.len());
    for (index, slot) in expected.iter().enumerate() {
        assert_eq!(space.classify(index), Some(*slot), "index {index}");
    }
    assert_eq!(space.classify(expected.len()), None);

    assert_eq!(space.index_of(2, 0), Some(11));
    assert_eq!(space.index_of(1, 0), None);
    assert_eq!(space.index_of(3, 0), None);
    assert_eq!(space.section_start(1), Some(7));
    assert_eq!(space.key(3), "item_separator_0_0");
    assert_eq!(space.key(9), "section_separator_1");
    assert_eq!(space.key(12), "section_footer_2");
}

#[test]
fn section_space_round_trips_random_shapes() {
    let mut rng = Lcg::new(7);
    for _ in 0..200 {
        let sections = rng.gen_range_usize(0, 6);
        let counts: Vec<usize> = (0..sections).map(|_| rng.gen_range_usize(0, 5)).collect();
        let decorations = SectionDecorations {
            header: rng.gen_bool(),
            footer: rng.gen_bool(),
            section_header: rng.gen_bool(),
            section_footer: rng.gen_bool(),
            item_separator: rng.gen_bool(),
            section_separator: rng.gen_bool(),
        };
        let space = SectionIndexSpace::new(counts.iter().copied(), decorations);

        for (section, &count) in counts.iter().enumerate() {
            for item in 0..count {
                let index = space.index_of(section, item).unwrap();
                assert_eq!(space.classify(index), Some(SectionSlot::Item { section, item }));
            }
        }

        let mut items = 0;
        for index in 0..space.total_count() {
            match space.classify(index) {
                Some(SectionSlot::Item { section, item }) => {
                    items += 1;
                    assert_eq!(space.index_of(section, item), Some(index));
                }
                Some(_) => {}
                None => panic!("unclassified index {index} in {space:?}"),
            }
        }
        assert_eq!(items, counts.iter().sum::<usize>());
    }
}

#[test]
fn flat_list_renders_typed_children() {
    let props = FlatListProps::new().with_header(true).with_footer(true);
    let list = FlatList::new(alloc::vec!["a", "b", "c"], props);
    let children = list.render();

    assert_eq!(
        keys(&children),
        ["spacer_before", "header", "item_0", "item_1", "item_2", "footer", "spacer_after"]
    );
    let items: Vec<&str> = children.iter().filter_map(|c| c.item().copied()).collect();
    assert_eq!(items, ["a", "b", "c"]);
    match &children[3] {
        ListChild::Item { index, slot, .. } => {
            assert_eq!(*index, 1);
            assert_eq!(slot.index, 2);
            assert_eq!(slot.offset, 100.0);
        }
        other => panic!("unexpected child {other:?}"),
    }
    assert_eq!(list.render_item(3), Some(children[4].clone()));
    assert!(list.render_item(5).is_none());
}

#[test]
fn flat_list_separators_are_thin_slots() {
    let props = FlatListProps::new().with_separators(true);
    let list = FlatList::new(alloc::vec![1u32, 2, 3], props);
    let children = list.render();
    assert_eq!(
        keys(&children),
        [
            "spacer_before",
            "item_0",
            "separator_0",
            "item_1",
            "separator_1",
            "item_2",
            "spacer_after"
        ]
    );
    let offsets: Vec<f64> = children
        .iter()
        .filter_map(|c| c.slot().map(|s| s.offset))
        .collect();
    assert_eq!(offsets, [0.0, 50.0, 51.0, 101.0, 102.0]);
    assert_eq!(list.list().content_length(), 152.0);
}

#[test]
fn flat_list_uses_item_length_and_key_functions() {
    let props = FlatListProps::new()
        .with_item_length(|s: &&str, _| s.len() as f64 * 10.0)
        .with_key_extractor(|s: &&str, _| s.to_string());
    let list = FlatList::new(alloc::vec!["a", "bb", "ccc"], props);

    assert_eq!(list.slot_length(1), Some(20.0));
    assert_eq!(list.slot_length(3), None);
    assert_eq!(list.key_for(2), "ccc");
    assert_eq!(list.key_for(3), "invalid_3");
    assert_eq!(list.list().content_length(), 60.0);
    assert_eq!(keys(&list.render())[1..4], ["a", "bb", "ccc"]);
}

#[test]
fn flat_list_empty_component_sits_between_header_and_footer() {
    let props = FlatListProps::new()
        .with_header(true)
        .with_footer(true)
        .with_empty_component(true);
    let list = FlatList::new(Vec::<u32>::new(), props);
    assert_eq!(
        keys(&list.render()),
        ["spacer_before", "header", "empty", "footer", "spacer_after"]
    );

    let bare = FlatList::new(Vec::<u32>::new(), FlatListProps::new().with_empty_component(true));
    assert_eq!(bare.render(), [ListChild::Empty]);

    let nothing = FlatList::new(Vec::<u32>::new(), FlatListProps::new());
    assert!(nothing.render().is_empty());
}

#[test]
fn flat_list_window_follows_scroll_through_header() {
    let data: Vec<u32> = (0..200).collect();
    let mut list = FlatList::new(data, FlatListProps::new().with_header(true));
    let update = list.on_scroll(&ScrollTelemetry::vertical(5050.0, 600.0, 10_050.0), 0);
    assert!(update.window_changed);

    let children = list.render();
    assert_eq!(children.len(), 34);
    assert_eq!(children[0], ListChild::SpacerBefore { length: 4550.0 });
    match &children[1] {
        ListChild::Item { item, index, slot, .. } => {
            assert_eq!((**item, *index, slot.index), (90, 90, 91));
        }
        other => panic!("unexpected child {other:?}"),
    }
    assert_eq!(children[33], ListChild::SpacerAfter { length: 3900.0 });
}

#[test]
fn flat_list_scroll_to_index_maps_data_indices() {
    let data: Vec<u32> = (0..20).collect();
    let props = FlatListProps::new().with_header(true).with_separators(true);
    let list = FlatList::new(data, props);
    let mut commands = Vec::new();

    assert_eq!(list.scroll_to_index(ScrollToIndexParams::new(3), &mut commands), Some(203.0));
    // Clamped to the last item.
    assert_eq!(
        list.scroll_to_index(ScrollToIndexParams::new(100), &mut commands),
        Some(1019.0)
    );
    assert_eq!(
        list.scroll_to_item(|v| *v == 5, false, &mut commands),
        Some(305.0)
    );
    assert_eq!(list.scroll_to_item(|v| *v == 99, false, &mut commands), None);
    assert_eq!(scroll_to(&commands), [203.0, 1019.0, 305.0]);
    assert_eq!(
        commands[2],
        ScrollCommand::ScrollTo(ScrollPosition {
            x: 0.0,
            y: 305.0,
            animated: false
        })
    );

    let empty = FlatList::new(Vec::<u32>::new(), FlatListProps::new().with_header(true));
    let mut none = Vec::new();
    assert_eq!(empty.scroll_to_index(ScrollToIndexParams::new(0), &mut none), None);
    assert!(none.is_empty());
}

#[test]
fn flat_list_set_data_discards_measurements() {
    let mut list = FlatList::new(alloc::vec![1u32, 2, 3], FlatListProps::new());
    assert!(list.on_item_layout(1, 50.0, 80.0).layout_changed);
    assert_eq!(list.list().item_length(1), Some(80.0));

    let update = list.set_data(alloc::vec![4u32, 5, 6, 7, 8], 0);
    assert!(update.layout_changed);
    assert!(list.list().layout_cache().is_empty());
    assert_eq!(list.list().item_count(), 5);
    assert_eq!(list.data().len(), 5);
    assert_eq!(list.list().item_length(1), Some(50.0));

    let update = list.set_props(FlatListProps::new().with_footer(true), 0);
    assert!(update.layout_changed);
    assert_eq!(list.list().item_count(), 6);
    assert_eq!(list.classify(5), Some(FlatSlot::Footer));
}

#[test]
fn flat_list_forwards_callbacks() {
    let ended = Arc::new(AtomicUsize::new(0));
    let scrolled = Arc::new(AtomicUsize::new(0));
    let callbacks = ListCallbacks::default()
        .with_on_end_reached(Some({
            let ended = Arc::clone(&ended);
            move |_: EndReached| {
                ended.fetch_add(1, Ordering::SeqCst);
            }
        }))
        .with_on_scroll(Some({
            let scrolled = Arc::clone(&scrolled);
            move |_: &ScrollTelemetry| {
                scrolled.fetch_add(1, Ordering::SeqCst);
            }
        }));
    let data: Vec<u32> = (0..20).collect();
    let mut list = FlatList::new(data, FlatListProps::new().with_callbacks(callbacks));

    let _ = list.on_scroll(&ScrollTelemetry::vertical(100.0, 600.0, 1000.0), 0);
    assert_eq!(ended.load(Ordering::SeqCst), 0);
    let _ = list.on_scroll(&ScrollTelemetry::vertical(400.0, 600.0, 1000.0), 16);
    assert_eq!(ended.load(Ordering::SeqCst), 1);
    assert_eq!(scrolled.load(Ordering::SeqCst), 2);
}

fn grouped() -> Vec<Section<&'static str>> {
    alloc::vec![
        Section::new(alloc::vec!["a0", "a1", "a2"]),
        Section::new(alloc::vec!["b0", "b1", "b2"]),
    ]
}

fn with_section_headers() -> SectionListProps<&'static str> {
    SectionListProps::new().with_decorations(SectionDecorations {
        section_header: true,
        ..SectionDecorations::default()
    })
}

#[test]
fn section_list_renders_sections_in_order() {
    let list = SectionList::new(grouped(), with_section_headers());
    let children = list.render();
    assert_eq!(
        keys(&children),
        [
            "spacer_before",
            "section_header_0",
            "item_0_0",
            "item_0_1",
            "item_0_2",
            "section_header_1",
            "item_1_0",
            "item_1_1",
            "item_1_2",
            "spacer_after"
        ]
    );
    match &children[7] {
        ListChild::Item {
            item,
            section,
            index,
            slot,
        } => {
            assert_eq!((**item, *section, *index, slot.index), ("b1", 1, 1, 6));
            assert_eq!(slot.offset, 288.0);
        }
        other => panic!("unexpected child {other:?}"),
    }
    assert!(matches!(
        children[5],
        ListChild::SectionHeader { section: 1, .. }
    ));
    assert_eq!(list.render_item(7), Some(children[8].clone()));
    assert!(list.render_item(8).is_none());
}

#[test]
fn section_list_scroll_to_location() {
    let list = SectionList::new(grouped(), with_section_headers());
    let mut commands = Vec::new();

    assert_eq!(list.location_index(1, 1), Some(6));
    assert_eq!(
        list.scroll_to_location(ScrollToLocationParams::new(1, 1), &mut commands),
        Some(288.0)
    );
    assert_eq!(
        list.scroll_to_location(ScrollToLocationParams::new(1, 3), &mut commands),
        None
    );
    assert_eq!(
        list.scroll_to_location(ScrollToLocationParams::new(2, 0), &mut commands),
        None
    );
    assert_eq!(scroll_to(&commands), [288.0]);
}

#[test]
fn section_list_section_lengths_and_keys() {
    let props = with_section_headers()
        .with_section_length(|section, part| match part {
            SectionPart::Header => 30.0 + section as f64 * 10.0,
            SectionPart::Footer => 20.0,
        })
        .with_key_extractor(|s: &&str, _| s.to_string());
    let list = SectionList::new(grouped(), props);

    assert_eq!(list.slot_length(0), Some(30.0));
    assert_eq!(list.slot_length(4), Some(40.0));
    assert_eq!(list.slot_length(5), None);
    assert_eq!(list.key_for(5), "b0");
    assert_eq!(list.key_for(4), "section_header_1");
    assert_eq!(list.list().content_length(), 370.0);
}

#[test]
fn section_list_set_sections_rebuilds_index_space() {
    let mut list = SectionList::new(grouped(), with_section_headers());
    let _ = list.on_item_layout(1, 44.0, 70.0);
    let update = list.set_sections(alloc::vec![Section::from(alloc::vec!["x"])], 0);
    assert!(update.layout_changed);
    assert_eq!(list.index_space().total_count(), 2);
    assert_eq!(list.sections().len(), 1);
    assert!(list.list().layout_cache().is_empty());
    assert_eq!(keys(&list.render())[1..3], ["section_header_0", "item_0_0"]);

    let props = with_section_headers().with_empty_component(true);
    let empty = SectionList::new(alloc::vec![Section::<&str>::default()], props);
    assert_eq!(
        keys(&empty.render()),
        ["spacer_before", "section_header_0", "empty", "spacer_after"]
    );
}

#[cfg(feature = "serde")]
#[test]
fn section_decorations_decode_from_camel_case() {
    let decorations: SectionDecorations =
        serde_json::from_str(r#"{"sectionHeader":true,"itemSeparator":true}"#).unwrap();
    assert!(decorations.section_header && decorations.item_separator);
    assert!(!decorations.footer);

    let params: ScrollToLocationParams =
        serde_json::from_str(r#"{"section":1,"item":2,"viewPosition":0.5}"#).unwrap();
    assert_eq!(params.section, 1);
    assert!(params.animated);
    assert_eq!(params.view_position, 0.5);
}
