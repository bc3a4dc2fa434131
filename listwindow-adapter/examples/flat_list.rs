// Example: a flat list with header, footer and measured items.
use listwindow::{EndReached, ScrollTelemetry, WindowConfig};
use listwindow_adapter::{FlatList, FlatListProps, ListCallbacks};

fn main() {
    let messages: Vec<String> = (0..500).map(|i| format!("message {i}")).collect();
    let callbacks = ListCallbacks::default()
        .with_on_end_reached(Some(|end: EndReached| {
            println!("end reached, {} left", end.distance_from_end)
        }));
    let props = FlatListProps::new()
        .with_config(WindowConfig::default().with_window_size(5))
        .with_header(true)
        .with_footer(true)
        .with_separators(true)
        .with_item_length(|text: &String, _| 24.0 + text.len() as f64)
        .with_callbacks(callbacks);
    let mut list = FlatList::new(messages, props);
    list.mount(0);

    // Native layout reports the real height of the first message.
    let _ = list.on_item_layout(1, 50.0, 64.0);

    let content = list.list().content_length();
    let _ = list.on_scroll(&ScrollTelemetry::vertical(content - 600.0, 600.0, content), 16);
    let children = list.render();
    println!(
        "mounted={} first={:?} last={:?}",
        children.len(),
        children.get(1).map(|c| c.key()),
        children.iter().rev().nth(1).map(|c| c.key()),
    );
}
