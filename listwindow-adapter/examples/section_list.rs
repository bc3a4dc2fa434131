// Example: a sectioned list with headers, separators and scroll-to-location.
use listwindow::ScrollTelemetry;
use listwindow_adapter::{
    ListChild, ScrollToLocationParams, Section, SectionDecorations, SectionList, SectionListProps,
};

fn main() {
    let sections: Vec<Section<String>> = (0..26u8)
        .map(|s| {
            let letter = char::from(b'A' + s);
            Section::new((0..40).map(|i| format!("{letter}{i}")).collect())
        })
        .collect();

    let props = SectionListProps::new()
        .with_decorations(SectionDecorations {
            header: true,
            section_header: true,
            item_separator: true,
            ..SectionDecorations::default()
        })
        .with_key_extractor(|name: &String, _| name.clone());
    let mut list = SectionList::new(sections, props);
    list.mount(0);
    println!("virtual slots={}", list.index_space().total_count());

    let mut commands = Vec::new();
    let offset = list
        .scroll_to_location(ScrollToLocationParams::new(12, 5), &mut commands)
        .unwrap_or_default();
    println!("scroll_to_location(12, 5) offset={offset}");

    // The container reports the scroll back as telemetry.
    let content = list.list().content_length();
    let _ = list.on_scroll(&ScrollTelemetry::vertical(offset, 600.0, content), 16);

    for child in list.render() {
        match child {
            ListChild::SectionHeader { section, slot } => {
                println!("[header {section}] at {}", slot.offset);
            }
            ListChild::Item { item, slot, .. } => println!("  {item} at {}", slot.offset),
            ListChild::SpacerBefore { length } | ListChild::SpacerAfter { length } => {
                println!("spacer {length}");
            }
            _ => {}
        }
    }
}
