// Example: minimal usage, scroll telemetry and scroll-to helpers.
use listwindow::{
    ListOptions, ScrollCommand, ScrollTelemetry, ScrollToIndexParams, VirtualizedList,
};

fn main() {
    let mut list = VirtualizedList::new(ListOptions::new(100_000).with_item_length(40.0));
    list.mount(0);
    println!("initial window={:?}", list.window());

    let telemetry = ScrollTelemetry::vertical(123_456.0, 800.0, list.content_length());
    let update = list.on_scroll(&telemetry, 16);
    println!(
        "window_changed={} window={:?}",
        update.window_changed,
        list.window()
    );

    let (before, after) = list.spacer_lengths().unwrap_or_default();
    println!("spacers: before={before} after={after}");

    let mut commands: Vec<ScrollCommand> = Vec::new();
    let offset = list.scroll_to_index(
        ScrollToIndexParams::new(99_999).with_view_position(1.0),
        &mut commands,
    );
    println!("scroll_to_index offset={offset:?} commands={commands:?}");
}
